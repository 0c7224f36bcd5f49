//! Detail enrichment: fetch each publication's detail page concurrently
//!
//! A dedicated rayon pool runs one worker per fetcher. Workers drain a shared
//! [`WorkQueue`] of `(paper index, detail URL)` units and publish into
//! [`IndexedSlots`]; the slots are merged back in input order.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use scholarline_core::{IndexedSlots, PageFetcher, ProgressContext, ScrapeError, WorkQueue};

use crate::extract::parse_publication_detail;
use crate::model::{PublicationDetail, PublicationSummary};

/// Enrichment stage summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichSummary {
    /// Units handed to workers (papers with a detail link)
    pub dispatched: usize,
    pub enriched: usize,
    pub failed: usize,
    /// Papers without a detail link
    pub skipped: usize,
    pub elapsed: Duration,
}

impl EnrichSummary {
    pub fn log(&self) {
        log::info!("=== Enrichment Summary ===");
        log::info!(
            "Details: {}/{} fetched ({} failed, {} without link)",
            self.enriched,
            self.dispatched,
            self.failed,
            self.skipped
        );
        log::info!("Time: {:.1}s", self.elapsed.as_secs_f64());
    }
}

/// Fetch and extract one detail page
pub fn fetch_detail<F: PageFetcher + ?Sized>(
    fetcher: &F,
    detail_url: &str,
) -> Result<PublicationDetail, ScrapeError> {
    log::debug!("Fetching details for: {detail_url}");
    let html = fetcher.fetch(detail_url, &[])?;
    Ok(parse_publication_detail(&html))
}

/// Merge detail pages into `papers` in place.
///
/// Runs `min(fetchers.len(), units)` workers, each owning one fetcher and
/// pausing `delay` after every unit. A failed unit leaves its paper as
/// listed. Length and order of `papers` never change.
pub fn enrich<F: PageFetcher>(
    papers: &mut [PublicationSummary],
    fetchers: &[F],
    delay: Duration,
    progress: &ProgressContext,
) -> EnrichSummary {
    let start = Instant::now();
    let queue = WorkQueue::indexed(
        papers
            .iter()
            .enumerate()
            .filter_map(|(i, paper)| paper.detail_reference.clone().map(|url| (i, url))),
    );
    let mut summary = EnrichSummary {
        dispatched: queue.total(),
        skipped: papers.len() - queue.total(),
        ..Default::default()
    };
    if queue.is_empty() {
        summary.elapsed = start.elapsed();
        return summary;
    }
    if fetchers.is_empty() {
        log::warn!("No fetchers available, {} details not fetched", queue.total());
        summary.failed = queue.total();
        summary.elapsed = start.elapsed();
        return summary;
    }

    let workers = fetchers.len().min(queue.total());
    log::info!(
        "Enriching {} papers with {} workers",
        queue.total(),
        workers
    );

    let slots: IndexedSlots<PublicationDetail> = IndexedSlots::new(papers.len());
    let enriched = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);
    let pb = progress.item_bar("details", queue.total());

    let drain = |fetcher: &F| {
        while let Some((index, url)) = queue.next() {
            match fetch_detail(fetcher, url) {
                Ok(detail) => {
                    enriched.fetch_add(1, Ordering::Relaxed);
                    slots.fill(index, detail);
                }
                Err(e) => {
                    log::warn!("Error getting paper details for {url}: {e}");
                    failed.fetch_add(1, Ordering::Relaxed);
                }
            }
            pb.inc(1);
            if !delay.is_zero() {
                std::thread::sleep(delay);
            }
        }
    };

    match rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("enrich-{i}"))
        .build()
    {
        Ok(pool) => pool.scope(|s| {
            for fetcher in &fetchers[..workers] {
                let drain = &drain;
                s.spawn(move |_| drain(fetcher));
            }
        }),
        Err(e) => {
            log::warn!("Failed to create enrichment pool, fetching inline: {e}");
            drain(&fetchers[0]);
        }
    }
    pb.finish_and_clear();

    for (paper, detail) in papers.iter_mut().zip(slots.into_vec()) {
        if let Some(detail) = detail {
            paper.merge(detail);
        }
    }

    summary.enriched = enriched.into_inner();
    summary.failed = failed.into_inner();
    summary.elapsed = start.elapsed();
    summary.log();
    summary
}
