//! Blocking page fetches over async reqwest.
//!
//! Uses async reqwest on a shared tokio runtime but presents a sync
//! interface, so sequential stages and rayon workers can call it directly.
//! Every [`HttpFetcher`] owns its own client (connection pool and cookie
//! jar); concurrent workers must each hold a separate instance.

use std::sync::LazyLock;
use std::time::Duration;

use crate::error::ScrapeError;

/// Connect timeout
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fixed desktop-browser identity sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Source of raw page markup.
///
/// `query` pairs are appended URL-encoded to `url`. One call is one attempt;
/// implementations do not retry.
pub trait PageFetcher: Send + Sync {
    fn fetch(&self, url: &str, query: &[(&str, &str)]) -> Result<String, ScrapeError>;
}

impl<F: PageFetcher + ?Sized> PageFetcher for &F {
    fn fetch(&self, url: &str, query: &[(&str, &str)]) -> Result<String, ScrapeError> {
        (**self).fetch(url, query)
    }
}

/// Transport settings shared (read-only) by every fetcher instance
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub user_agent: String,
    /// Whole-request timeout (connect + body)
    pub timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Shared tokio runtime for HTTP operations.
pub static SHARED_RUNTIME: LazyLock<tokio::runtime::Runtime> = LazyLock::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("failed to build tokio runtime")
});

/// reqwest-backed fetcher with its own session state
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &HttpConfig) -> Result<Self, ScrapeError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .cookie_store(true)
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ScrapeError::from_reqwest(&e))?;
        Ok(Self { client })
    }

    /// Build `count` independent fetchers, one per concurrent worker.
    pub fn pool(config: &HttpConfig, count: usize) -> Result<Vec<Self>, ScrapeError> {
        (0..count).map(|_| Self::new(config)).collect()
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str, query: &[(&str, &str)]) -> Result<String, ScrapeError> {
        let result: Result<String, reqwest::Error> = SHARED_RUNTIME.handle().block_on(async {
            let resp = self
                .client
                .get(url)
                .query(query)
                .send()
                .await?
                .error_for_status()?;
            resp.text().await
        });
        result.map_err(|e| ScrapeError::from_reqwest(&e))
    }
}
