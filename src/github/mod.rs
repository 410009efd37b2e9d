use crate::config::Config;
use futures::task::noop_waker;
use log::{error, info};
use serde::Deserialize;
use std::task::{Context, Poll};
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

/// At most this many repositories are requested and rendered.
pub const MAX_REPOS: usize = 5;

const USER_AGENT: &str = concat!("folio/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Error,
}

/// Human-readable feed condition; always the outcome of the most recent
/// operation.
#[derive(Debug, Clone)]
pub struct FeedStatus {
    pub message: String,
    pub tone: Tone,
}

impl FeedStatus {
    fn info(message: &str) -> Self {
        Self {
            message: message.to_owned(),
            tone: Tone::Info,
        }
    }

    fn success(message: &str) -> Self {
        Self {
            message: message.to_owned(),
            tone: Tone::Success,
        }
    }

    fn error(message: &str) -> Self {
        Self {
            message: message.to_owned(),
            tone: Tone::Error,
        }
    }
}

/// One repository as the listing endpoint reports it.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoSummary {
    pub name: String,
    pub html_url: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub updated_at: String,
    pub stargazers_count: u64,
    pub forks_count: u64,
    #[serde(default)]
    pub topics: Vec<String>,
}

impl RepoSummary {
    /// "May 3, 2026"-style label; an unparseable timestamp renders empty.
    pub fn updated_label(&self) -> String {
        match chrono::DateTime::parse_from_rfc3339(&self.updated_at) {
            Ok(date) => date.format("%b %-d, %Y").to_string(),
            Err(_) => String::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FeedCache {
    pub repos: Vec<RepoSummary>,
    pub fetched_at: Instant,
}

#[derive(Debug)]
enum FeedEvent {
    Fetched(Vec<RepoSummary>),
    Failed(String),
}

/// Fetches, caches, and renders the account's most recently updated public
/// repositories. Requests run in a spawned task and report back over a
/// channel polled on tick; at most one request is in flight, and a refresh
/// issued while one is pending coalesces into it.
pub struct GithubFeed {
    endpoint: String,
    cooldown: Duration,
    timeout: Duration,
    cache: Option<FeedCache>,
    shown: Vec<RepoSummary>,
    status: FeedStatus,
    tx: UnboundedSender<FeedEvent>,
    rx: UnboundedReceiver<FeedEvent>,
    in_flight: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for GithubFeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("GithubFeed {}")
    }
}

impl GithubFeed {
    pub fn new(config: &Config) -> Self {
        Self::with_endpoint(
            format!(
                "https://api.github.com/users/{}/repos?sort=updated&per_page={}",
                config.github_user(),
                MAX_REPOS
            ),
            config.cooldown(),
            config.refresh_timeout(),
        )
    }

    pub fn with_endpoint(endpoint: String, cooldown: Duration, timeout: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            endpoint,
            cooldown,
            timeout,
            cache: None,
            shown: Vec::new(),
            status: FeedStatus::info("Loading GitHub repositories..."),
            tx,
            rx,
            in_flight: None,
        }
    }

    /// The cards currently on screen.
    pub fn repos(&self) -> &[RepoSummary] {
        &self.shown
    }

    pub fn status(&self) -> &FeedStatus {
        &self.status
    }

    /// Non-forced fetches inside the cooldown window re-render the cache
    /// without touching the network; everything else issues (or joins) a
    /// request.
    pub fn fetch(&mut self, force: bool) {
        if !force {
            if let Some(cache) = &self.cache {
                if cache.fetched_at.elapsed() < self.cooldown {
                    self.shown = cache.repos.clone();
                    self.status =
                        FeedStatus::info("Showing cached GitHub activity from the last sync.");
                    return;
                }
            }
        }

        if self.in_flight.as_ref().is_some_and(|h| !h.is_finished()) {
            info!("repository fetch already in flight, coalescing");
            return;
        }

        self.status = FeedStatus::info("Loading GitHub repositories...");

        let url = self.endpoint.clone();
        let timeout = self.timeout;
        let tx = self.tx.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let event = match request_repos(&url, timeout).await {
                Ok(repos) => FeedEvent::Fetched(repos),
                Err(err) => FeedEvent::Failed(format!("{err:#}")),
            };
            let _ = tx.send(event);
        }));
    }

    /// Drains completed request events. Failures keep the previous cache
    /// and its timestamp but clear the screen, so a stale list is never
    /// left standing behind an error banner.
    pub fn tick(&mut self) {
        let waker = noop_waker();
        let mut cx = Context::from_waker(&waker);

        match self.rx.poll_recv(&mut cx) {
            Poll::Ready(Some(FeedEvent::Fetched(mut repos))) => {
                self.in_flight = None;
                repos.truncate(MAX_REPOS);

                if repos.is_empty() {
                    self.shown.clear();
                    self.cache = Some(FeedCache {
                        repos: Vec::new(),
                        fetched_at: Instant::now(),
                    });
                    self.status = FeedStatus::info("No public repositories found right now.");
                } else {
                    self.cache = Some(FeedCache {
                        repos: repos.clone(),
                        fetched_at: Instant::now(),
                    });
                    self.shown = repos;
                    self.status = FeedStatus::success("Synced with GitHub moments ago.");
                }
            }
            Poll::Ready(Some(FeedEvent::Failed(err))) => {
                self.in_flight = None;
                error!("github fetch failed: {err}");
                self.shown.clear();
                self.status =
                    FeedStatus::error("Unable to load GitHub activity. Please try again shortly.");
            }
            _ => {}
        }
    }
}

async fn request_repos(url: &str, timeout: Duration) -> anyhow::Result<Vec<RepoSummary>> {
    let client = reqwest::Client::builder()
        .connect_timeout(timeout)
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()?;

    let response = client
        .get(url)
        .header(reqwest::header::ACCEPT, "application/vnd.github+json")
        .send()
        .await?;

    if !response.status().is_success() {
        anyhow::bail!("GitHub responded with {}", response.status());
    }

    Ok(response.json().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    const COOLDOWN: Duration = Duration::from_secs(180);
    const TIMEOUT: Duration = Duration::from_secs(2);

    fn repo_json(name: &str) -> serde_json::Value {
        json!({
            "name": name,
            "html_url": format!("https://github.com/baraazino/{name}"),
            "description": format!("{name} description"),
            "language": "Rust",
            "updated_at": "2026-05-03T12:00:00Z",
            "stargazers_count": 3,
            "forks_count": 1,
            "topics": ["tui", "rust", "portfolio", "extra"]
        })
    }

    fn sample(names: &[&str]) -> Vec<RepoSummary> {
        names
            .iter()
            .map(|name| serde_json::from_value(repo_json(name)).unwrap())
            .collect()
    }

    fn feed_for(url: &str) -> GithubFeed {
        GithubFeed::with_endpoint(format!("{url}/repos?sort=updated&per_page=5"), COOLDOWN, TIMEOUT)
    }

    async fn settle(feed: &mut GithubFeed) {
        if let Some(handle) = feed.in_flight.take() {
            handle.await.unwrap();
        }
        feed.tick();
    }

    #[tokio::test]
    async fn fresh_cache_skips_the_network() {
        // The endpoint is unroutable, so any request attempt would fail
        // loudly rather than silently succeed.
        let mut feed = feed_for("http://unreachable.invalid");
        feed.cache = Some(FeedCache {
            repos: sample(&["alpha", "beta"]),
            fetched_at: Instant::now(),
        });

        feed.fetch(false);

        assert!(feed.in_flight.is_none());
        assert_eq!(feed.repos().len(), 2);
        assert_eq!(
            feed.status().message,
            "Showing cached GitHub activity from the last sync."
        );
        assert_eq!(feed.status().tone, Tone::Info);
    }

    #[tokio::test]
    async fn stale_cache_refetches() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/repos")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(json!([repo_json("fresh")]).to_string())
            .expect(1)
            .create_async()
            .await;

        let mut feed = feed_for(&server.url());
        feed.cache = Some(FeedCache {
            repos: sample(&["old"]),
            fetched_at: Instant::now() - COOLDOWN - Duration::from_secs(1),
        });

        feed.fetch(false);
        settle(&mut feed).await;

        mock.assert_async().await;
        assert_eq!(feed.repos().len(), 1);
        assert_eq!(feed.repos()[0].name, "fresh");
        assert_eq!(feed.status().tone, Tone::Success);
    }

    #[tokio::test]
    async fn force_bypasses_a_fresh_cache() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/repos")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(json!([repo_json("forced")]).to_string())
            .expect(1)
            .create_async()
            .await;

        let mut feed = feed_for(&server.url());
        feed.cache = Some(FeedCache {
            repos: sample(&["cached"]),
            fetched_at: Instant::now(),
        });

        feed.fetch(true);
        settle(&mut feed).await;

        mock.assert_async().await;
        assert_eq!(feed.repos()[0].name, "forced");
    }

    #[tokio::test]
    async fn renders_in_received_order_capped_at_five() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/repos")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                json!([
                    repo_json("one"),
                    repo_json("two"),
                    repo_json("three"),
                    repo_json("four"),
                    repo_json("five"),
                    repo_json("six"),
                    repo_json("seven")
                ])
                .to_string(),
            )
            .create_async()
            .await;

        let mut feed = feed_for(&server.url());
        feed.fetch(true);
        settle(&mut feed).await;

        let names: Vec<_> = feed.repos().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["one", "two", "three", "four", "five"]);
    }

    #[tokio::test]
    async fn empty_response_caches_the_emptiness() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/repos")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("[]")
            .expect(1)
            .create_async()
            .await;

        let mut feed = feed_for(&server.url());
        feed.fetch(true);
        settle(&mut feed).await;

        assert!(feed.repos().is_empty());
        assert_eq!(feed.status().message, "No public repositories found right now.");

        // The cooldown applies to the cached-empty result too: this stays
        // off the network.
        feed.fetch(false);
        assert!(feed.in_flight.is_none());
        assert_eq!(
            feed.status().message,
            "Showing cached GitHub activity from the last sync."
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn failure_keeps_prior_cache_but_clears_the_screen() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/repos")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let mut feed = feed_for(&server.url());
        let stale_stamp = Instant::now() - COOLDOWN - Duration::from_secs(1);
        feed.cache = Some(FeedCache {
            repos: sample(&["kept"]),
            fetched_at: stale_stamp,
        });

        feed.fetch(false);
        settle(&mut feed).await;

        assert_eq!(feed.status().tone, Tone::Error);
        assert!(feed.repos().is_empty());

        let cache = feed.cache.as_ref().unwrap();
        assert_eq!(cache.repos.len(), 1);
        assert_eq!(cache.repos[0].name, "kept");
        assert_eq!(cache.fetched_at, stale_stamp);
    }

    #[tokio::test]
    async fn invalid_payload_is_a_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/repos")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let mut feed = feed_for(&server.url());
        feed.fetch(true);
        settle(&mut feed).await;

        assert_eq!(feed.status().tone, Tone::Error);
    }

    #[tokio::test]
    async fn concurrent_refreshes_coalesce() {
        let mut feed = feed_for("http://unreachable.invalid");

        // Something already in flight that will not finish on its own.
        feed.in_flight = Some(tokio::spawn(async {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }));
        feed.status = FeedStatus::success("marker");

        feed.fetch(true);

        // No new request was started and the status was left alone.
        assert_eq!(feed.status().message, "marker");
        feed.in_flight.take().unwrap().abort();
    }

    #[test]
    fn updated_label_formats_or_collapses() {
        let repo = sample(&["x"]).remove(0);
        assert_eq!(repo.updated_label(), "May 3, 2026");

        let mut broken = sample(&["x"]).remove(0);
        broken.updated_at = "yesterday-ish".to_owned();
        assert_eq!(broken.updated_label(), "");
    }

    #[test]
    fn description_and_language_are_optional() {
        let repo: RepoSummary = serde_json::from_value(json!({
            "name": "bare",
            "html_url": "https://github.com/baraazino/bare",
            "updated_at": "2026-05-03T12:00:00Z",
            "stargazers_count": 0,
            "forks_count": 0
        }))
        .unwrap();

        assert!(repo.description.is_none());
        assert!(repo.language.is_none());
        assert!(repo.topics.is_empty());
    }
}
