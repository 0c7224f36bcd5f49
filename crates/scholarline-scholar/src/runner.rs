//! Pipeline orchestration: resolve → select → list → enrich → summarize

use scholarline_core::{HttpFetcher, PageFetcher, ProgressContext, ScrapeError};

use crate::config::Config;
use crate::enrich::enrich;
use crate::list::list;
use crate::model::{CandidateProfile, PublicationSummary};
use crate::report::{candidate_table, render_summary};
use crate::resolve::resolve;

/// Run the pipeline over live HTTP.
///
/// Builds one session fetcher for the sequential stages and one independent
/// fetcher per enrichment worker. Never fails; problems are logged and
/// yield an empty (or partial) result.
pub fn run(author: &str, config: &Config, progress: &ProgressContext) -> Vec<PublicationSummary> {
    let fetchers = HttpFetcher::new(&config.http).and_then(|session| {
        let workers = HttpFetcher::pool(&config.http, config.effective_workers())?;
        Ok((session, workers))
    });
    match fetchers {
        Ok((session, workers)) => run_with(author, config, &session, workers, progress),
        Err(e) => {
            log::error!("Failed to create HTTP client: {e}");
            Vec::new()
        }
    }
}

/// Run the pipeline with caller-supplied fetchers.
///
/// `session` serves resolve and list; `workers` are handed to the enricher.
pub fn run_with<F: PageFetcher>(
    author: &str,
    config: &Config,
    session: &F,
    workers: Vec<F>,
    progress: &ProgressContext,
) -> Vec<PublicationSummary> {
    log::info!("=== Analyzing research for: {author} ===");
    log::info!("Using {} workers for parallel processing", workers.len());
    if let Some(year) = config.year_limit {
        log::info!(
            "Year limit: {year} (will stop at papers from {} or earlier)",
            year.saturating_sub(1)
        );
    }

    let pb = progress.stage_line("resolve");
    pb.set_message(author.to_string());
    let candidates = resolve(session, config, author);
    pb.finish_and_clear();
    if candidates.is_empty() {
        log::warn!("No profiles found!");
        return Vec::new();
    }

    log::info!("Found {} profile(s):", candidates.len());
    progress.println(candidate_table(&candidates).to_string());

    let profile = select_profile(&candidates, config.profile_index);
    log::info!("Using profile: {}", profile.display_name);

    let pb = progress.stage_line("list");
    let listing = list(
        session,
        config,
        &profile.profile_reference,
        config.max_papers,
        config.year_limit,
        &pb,
    );
    pb.finish_and_clear();

    let mut papers = listing.papers;
    log::info!("Found {} papers", papers.len());
    if let Some(max) = config.max_papers {
        papers.truncate(max);
    }

    log::info!(
        "Fetching detailed information using {} parallel workers...",
        workers.len()
    );
    enrich(&mut papers, &workers, config.politeness_delay, progress);

    print!("{}", render_summary(&papers));
    papers
}

/// Candidate at `index`, falling back to the first one when out of range.
///
/// `candidates` must be non-empty.
fn select_profile(candidates: &[CandidateProfile], index: i64) -> &CandidateProfile {
    match usize::try_from(index).ok().and_then(|i| candidates.get(i)) {
        Some(profile) => profile,
        None => {
            let e = ScrapeError::OutOfRange {
                index,
                len: candidates.len(),
            };
            log::warn!("Profile {e}, using profile 0");
            &candidates[0]
        }
    }
}
