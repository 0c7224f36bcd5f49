//! Profile resolution: author name → candidate profiles

use scholarline_core::{PageFetcher, ScrapeError};

use crate::config::Config;
use crate::extract::parse_profile_search;
use crate::model::CandidateProfile;

/// Search for `author` and extract the candidate profiles.
///
/// A page without a profile block yields `Ok(vec![])`.
pub fn search<F: PageFetcher + ?Sized>(
    fetcher: &F,
    config: &Config,
    author: &str,
) -> Result<Vec<CandidateProfile>, ScrapeError> {
    let url = config.endpoint("scholar")?;
    let query = [("hl", "en"), ("as_sdt", "0,5"), ("q", author), ("btnG", "")];

    let html = fetcher.fetch(&url, &query)?;
    match parse_profile_search(&html, &config.base()?) {
        Some(profiles) => Ok(profiles),
        None => {
            log::debug!("No profile block on search page for {author:?}");
            Ok(Vec::new())
        }
    }
}

/// Resolve `author` to candidate profiles in page order.
///
/// Never fails: fetch errors are logged and reported as "nothing found".
pub fn resolve<F: PageFetcher + ?Sized>(
    fetcher: &F,
    config: &Config,
    author: &str,
) -> Vec<CandidateProfile> {
    log::info!("Searching for author profiles: {author}");
    match search(fetcher, config, author) {
        Ok(profiles) => profiles,
        Err(e) => {
            log::error!("Error searching for profiles: {e}");
            Vec::new()
        }
    }
}
