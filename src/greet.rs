use crate::notify::NameChangeFeed;
use chrono::{DateTime, Local, Timelike};

fn salutation(hour: u32) -> &'static str {
    if hour < 12 {
        "Good morning"
    } else if hour < 18 {
        "Good afternoon"
    } else {
        "Good evening"
    }
}

/// Time-of-day greeting that follows preferred-name changes.
#[derive(Debug)]
pub struct Greeting {
    name: String,
    feed: NameChangeFeed,
}

impl Greeting {
    pub fn new(name: String, feed: NameChangeFeed) -> Self {
        Self { name, feed }
    }

    pub fn tick(&mut self) {
        if let Some(name) = self.feed.poll_latest() {
            self.name = name;
        }
    }

    pub fn line_at(&self, now: DateTime<Local>) -> String {
        let salutation = salutation(now.hour());
        if self.name.is_empty() {
            format!("{salutation}, welcome to my portfolio.")
        } else {
            format!("{salutation}, {}! Welcome back.", self.name)
        }
    }

    pub fn line(&self) -> String {
        self.line_at(Local::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NameChanges;
    use chrono::TimeZone;

    fn at_hour(hour: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, 10, hour, 30, 0).unwrap()
    }

    #[test]
    fn salutation_follows_the_clock() {
        assert_eq!(salutation(0), "Good morning");
        assert_eq!(salutation(11), "Good morning");
        assert_eq!(salutation(12), "Good afternoon");
        assert_eq!(salutation(17), "Good afternoon");
        assert_eq!(salutation(18), "Good evening");
        assert_eq!(salutation(23), "Good evening");
    }

    #[test]
    fn line_without_name_stays_general() {
        let mut bus = NameChanges::new();
        let greeting = Greeting::new(String::new(), bus.subscribe());
        assert_eq!(
            greeting.line_at(at_hour(9)),
            "Good morning, welcome to my portfolio."
        );
    }

    #[test]
    fn line_uses_the_current_name() {
        let mut bus = NameChanges::new();
        let greeting = Greeting::new("Sam".to_owned(), bus.subscribe());
        assert_eq!(
            greeting.line_at(at_hour(20)),
            "Good evening, Sam! Welcome back."
        );
    }

    #[test]
    fn tick_applies_broadcast_changes() {
        let mut bus = NameChanges::new();
        let mut greeting = Greeting::new("Sam".to_owned(), bus.subscribe());

        bus.publish("");
        greeting.tick();

        assert_eq!(
            greeting.line_at(at_hour(9)),
            "Good morning, welcome to my portfolio."
        );
    }
}
