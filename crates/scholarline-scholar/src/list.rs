//! Publication listing: paginate a profile's works, newest first

use indicatif::ProgressBar;
use scholarline_core::{PageFetcher, ScrapeError};
use url::Url;

use crate::config::{Config, LIST_PAGE_SIZE};
use crate::extract::parse_publication_rows;
use crate::model::PublicationSummary;

/// Why pagination ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// Caller's count cap reached
    MaxCount,
    /// First row older than the year floor; it and everything after are excluded
    YearFloor { year: i32 },
    /// A short page was the last one
    LastPage,
    /// A page came back with no rows
    Exhausted,
    /// Listing aborted; collected rows are kept
    Failed(ScrapeError),
}

/// Publications collected from one profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub papers: Vec<PublicationSummary>,
    pub stop: StopReason,
    /// Page requests issued
    pub fetches: usize,
    /// Rows dropped for lacking a title
    pub skipped_rows: usize,
}

impl Listing {
    fn empty(stop: StopReason) -> Self {
        Self {
            papers: Vec::new(),
            stop,
            fetches: 0,
            skipped_rows: 0,
        }
    }
}

/// The `user` query parameter of a profile URL
pub fn user_id(profile_reference: &str) -> Result<String, ScrapeError> {
    let url = Url::parse(profile_reference).map_err(|e| {
        ScrapeError::structure(format!("profile URL {profile_reference:?}: {e}"))
    })?;
    url.query_pairs()
        .find(|(key, _)| key == "user")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ScrapeError::structure("user id in profile URL"))
}

/// List a profile's publications, most recent first.
///
/// Stops at `max_count` items, at the first row whose year is below
/// `year_floor` (rows are assumed sorted newest first, so this is a
/// short-circuit rather than a filter), at a short page, or at an empty one.
/// A failed fetch ends the listing with whatever was collected so far.
pub fn list<F: PageFetcher + ?Sized>(
    fetcher: &F,
    config: &Config,
    profile_reference: &str,
    max_count: Option<usize>,
    year_floor: Option<i32>,
    pb: &ProgressBar,
) -> Listing {
    log::info!("Fetching papers from profile: {profile_reference}");
    if let Some(floor) = year_floor {
        log::info!(
            "Year limit set to: {floor} (will stop at papers from {} or earlier)",
            floor.saturating_sub(1)
        );
    }

    let target = user_id(profile_reference).and_then(|user| {
        let url = config.endpoint("citations")?;
        let base = config.base()?;
        Ok((user, url, base))
    });
    let (user, url, base) = match target {
        Ok(target) => target,
        Err(e) => {
            log::error!("Cannot list publications for {profile_reference}: {e}");
            return Listing::empty(StopReason::Failed(e));
        }
    };

    let mut listing = Listing::empty(StopReason::Exhausted);
    let page_size = LIST_PAGE_SIZE.to_string();
    let cap_reached = |count: usize| max_count.is_some_and(|max| count >= max);
    let mut start = 0usize;

    listing.stop = loop {
        if cap_reached(listing.papers.len()) {
            break StopReason::MaxCount;
        }

        let cstart = start.to_string();
        let query = [
            ("user", user.as_str()),
            ("hl", "en"),
            ("view_op", "list_works"),
            ("sortby", "pubdate"),
            ("cstart", cstart.as_str()),
            ("pagesize", page_size.as_str()),
        ];
        listing.fetches += 1;
        let html = match fetcher.fetch(&url, &query) {
            Ok(html) => html,
            Err(e) => {
                log::error!("Error fetching papers at offset {start}: {e}");
                break StopReason::Failed(e);
            }
        };

        let rows = parse_publication_rows(&html, &base);
        let received = rows.len();
        log::debug!("Offset {start}: {received} rows");
        if received == 0 {
            break StopReason::Exhausted;
        }

        if let Some(stop) = take_rows(rows, &mut listing, year_floor, &cap_reached) {
            break stop;
        }

        start += received;
        pb.set_message(format!("{} papers", listing.papers.len()));
        if received < LIST_PAGE_SIZE {
            break StopReason::LastPage;
        }
    };

    log::debug!(
        "Listing stopped ({:?}) after {} fetches, {} rows skipped",
        listing.stop,
        listing.fetches,
        listing.skipped_rows
    );
    listing
}

/// Append one page of rows; `Some` when a row-level stop condition fired.
fn take_rows(
    rows: Vec<Result<PublicationSummary, ScrapeError>>,
    listing: &mut Listing,
    year_floor: Option<i32>,
    cap_reached: &impl Fn(usize) -> bool,
) -> Option<StopReason> {
    for row in rows {
        if cap_reached(listing.papers.len()) {
            return Some(StopReason::MaxCount);
        }

        let paper = match row {
            Ok(paper) => paper,
            Err(e) => {
                log::debug!("Skipping publication row: {e}");
                listing.skipped_rows += 1;
                continue;
            }
        };

        if let Some(floor) = year_floor {
            match paper.year_value() {
                Ok(Some(year)) if year < floor => {
                    log::info!("Reached year limit: found paper from {year} (limit: {floor})");
                    return Some(StopReason::YearFloor { year });
                }
                Ok(_) => {}
                Err(e) => log::debug!("Year check skipped for {:?}: {e}", paper.title),
            }
        }

        listing.papers.push(paper);
    }
    None
}
