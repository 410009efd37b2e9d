use futures::task::noop_waker;
use std::task::{Context, Poll};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Broadcast registry for preferred-name changes, standing in for the
/// page-wide CustomEvent the controllers used to listen on. Subscribers
/// drain their channel on tick; a closed receiver drops out of the
/// registry on the next publish.
#[derive(Debug, Default)]
pub struct NameChanges {
    subscribers: Vec<UnboundedSender<String>>,
}

impl NameChanges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> NameChangeFeed {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        NameChangeFeed { rx }
    }

    /// Delivers `name` (possibly empty, meaning "cleared") to every live
    /// subscriber.
    pub fn publish(&mut self, name: &str) {
        self.subscribers.retain(|tx| tx.send(name.to_owned()).is_ok());
    }
}

#[derive(Debug)]
pub struct NameChangeFeed {
    rx: UnboundedReceiver<String>,
}

impl NameChangeFeed {
    /// Drains pending notifications without blocking, keeping only the most
    /// recent one.
    pub fn poll_latest(&mut self) -> Option<String> {
        let waker = noop_waker();
        let mut cx = Context::from_waker(&waker);

        let mut latest = None;
        while let Poll::Ready(Some(name)) = self.rx.poll_recv(&mut cx) {
            latest = Some(name);
        }
        latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_reaches_every_subscriber() {
        let mut bus = NameChanges::new();
        let mut a = bus.subscribe();
        let mut b = bus.subscribe();

        bus.publish("Riley");

        assert_eq!(a.poll_latest(), Some("Riley".to_owned()));
        assert_eq!(b.poll_latest(), Some("Riley".to_owned()));
    }

    #[test]
    fn poll_keeps_only_the_latest() {
        let mut bus = NameChanges::new();
        let mut feed = bus.subscribe();

        bus.publish("first");
        bus.publish("");
        bus.publish("last");

        assert_eq!(feed.poll_latest(), Some("last".to_owned()));
        assert_eq!(feed.poll_latest(), None);
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let mut bus = NameChanges::new();
        let feed = bus.subscribe();
        drop(feed);

        bus.publish("anyone there");
        assert!(bus.subscribers.is_empty());
    }
}
