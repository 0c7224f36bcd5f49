//! Scholar pipeline configuration

use std::time::Duration;

use scholarline_core::{HttpConfig, ScrapeError};
use url::Url;

/// Fixed origin of the indexing site
pub const DEFAULT_BASE_URL: &str = "https://scholar.google.com";

/// Rows requested per publication-list fetch
pub const LIST_PAGE_SIZE: usize = 100;

/// Pause after each detail fetch
pub const DEFAULT_POLITENESS_DELAY: Duration = Duration::from_millis(500);

/// Runtime configuration for one pipeline run
#[derive(Debug, Clone)]
pub struct Config {
    /// Origin for search, listing and relative detail links
    pub base_url: String,
    pub http: HttpConfig,
    /// Cap on listed (and enriched) publications; `None` = no cap
    pub max_papers: Option<usize>,
    /// Which search candidate to use; negative or out-of-range falls back to 0
    pub profile_index: i64,
    /// Concurrent detail fetchers
    pub workers: usize,
    /// Stop listing at the first publication older than this year
    pub year_limit: Option<i32>,
    pub politeness_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            http: HttpConfig::default(),
            max_papers: Some(20),
            profile_index: 0,
            workers: 4,
            year_limit: None,
            politeness_delay: DEFAULT_POLITENESS_DELAY,
        }
    }
}

impl Config {
    /// Parsed `base_url`
    pub fn base(&self) -> Result<Url, ScrapeError> {
        Url::parse(&self.base_url)
            .map_err(|e| ScrapeError::structure(format!("base URL {:?}: {e}", self.base_url)))
    }

    /// Endpoint URL under the configured origin (e.g. `"scholar"`, `"citations"`)
    pub fn endpoint(&self, path: &str) -> Result<String, ScrapeError> {
        let base = self.base()?;
        base.join(path)
            .map(String::from)
            .map_err(|e| ScrapeError::structure(format!("endpoint {path:?}: {e}")))
    }

    /// Worker count actually used (at least one)
    pub fn effective_workers(&self) -> usize {
        self.workers.max(1)
    }
}
