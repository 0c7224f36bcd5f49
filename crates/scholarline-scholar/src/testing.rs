//! Canned Scholar markup and an in-memory fetcher for unit tests

use std::sync::{Arc, Mutex};

use scholarline_core::{PageFetcher, ScrapeError};
use url::Url;

use crate::config::LIST_PAGE_SIZE;

pub fn base() -> Url {
    Url::parse(BASE_URL).unwrap()
}

pub const BASE_URL: &str = "https://scholar.test";

/// Author search page with a "User profiles for" block
pub fn search_page(query: &str, profiles: &[(&str, &str)]) -> String {
    let cells: String = profiles
        .iter()
        .map(|(name, user)| {
            format!(
                r#"<td valign="top" width="50%"><h4 class="gs_rt2"><a href="/citations?user={user}&amp;hl=en"><b>{name}</b></a></h4><div class="gs_nph">Professor of Testing</div><div class="gs_nph">Cited by 1234</div></td>"#
            )
        })
        .collect();
    format!(
        r#"<html><head><title>{query} - Google Scholar</title></head><body><div id="gs_res_ccl_mid">
<h3 class="gs_rt"><a href="/citations?view_op=search_authors">User profiles for <b>{query}</b></a></h3>
<table><tbody><tr>{cells}</tr></tbody></table>
<div class="gs_r"><h3 class="gs_rt"><a href="/paper">A paper by {query}</a></h3></div>
</div></body></html>"#
    )
}

/// Search page with ordinary results only
pub fn search_page_without_profiles(query: &str) -> String {
    format!(
        r#"<html><body><div id="gs_res_ccl_mid">
<div class="gs_r"><h3 class="gs_rt"><a href="/paper">Something about {query}</a></h3></div>
</div></body></html>"#
    )
}

#[derive(Debug, Clone)]
pub struct ListingRow {
    pub title: String,
    pub year: String,
    pub citations: Option<String>,
}

impl ListingRow {
    pub fn new(title: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            year: year.into(),
            citations: None,
        }
    }

    pub fn cited(mut self, count: &str) -> Self {
        self.citations = Some(count.to_string());
        self
    }
}

/// `count` rows titled "Paper {n}" starting at `first`, all from `year`
pub fn numbered_rows(first: usize, count: usize, year: &str) -> Vec<ListingRow> {
    (first..first + count)
        .map(|n| ListingRow::new(format!("Paper {n}"), year))
        .collect()
}

/// Publication-list page containing `rows`
pub fn listing_page(rows: &[ListingRow]) -> String {
    let body: String = rows
        .iter()
        .map(|row| {
            let slug = row.title.replace(' ', "_");
            let citations = row
                .citations
                .as_deref()
                .map(|c| format!(r#"<a href="/scholar?cites=1" class="gsc_a_ac gs_ibl">{c}</a>"#))
                .unwrap_or_default();
            format!(
                r#"<tr class="gsc_a_tr"><td class="gsc_a_t"><a href="/citations?view_op=view_citation&amp;hl=en&amp;citation_for_view=abc123:{slug}" class="gsc_a_at">{title}</a><div class="gs_gray">J Doe, A Smith</div><div class="gs_gray">Journal of Tests 12 (3), {year}</div></td><td class="gsc_a_c">{citations}</td><td class="gsc_a_y"><span class="gsc_a_h gsc_a_hc gs_ibl">{year}</span></td></tr>"#,
                title = row.title,
                year = row.year,
            )
        })
        .collect();
    format!(
        r#"<html><body><table id="gsc_a_t"><tbody id="gsc_a_b">{body}</tbody></table></body></html>"#
    )
}

/// Single-publication page
pub fn detail_page(fields: &[(&str, &str)], abstract_text: Option<&str>) -> String {
    let rows: String = fields
        .iter()
        .map(|(field, value)| {
            format!(
                r#"<div class="gs_scl"><div class="gsc_oci_field">{field}</div><div class="gsc_oci_value">{value}</div></div>"#
            )
        })
        .collect();
    let description = abstract_text
        .map(|text| {
            format!(
                r#"<div id="gsc_oci_descr"><div class="gsh_small"><div class="gsh_csp">{text}</div></div></div>"#
            )
        })
        .unwrap_or_default();
    format!(
        r#"<html><body><div id="gsc_oci_title">A title</div><div id="gsc_oci_table">{rows}</div>{description}</body></html>"#
    )
}

pub fn query_value<'a>(query: &[(&'a str, &'a str)], key: &str) -> Option<&'a str> {
    query.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

pub fn transport_error(status: u16) -> ScrapeError {
    ScrapeError::Transport {
        status: Some(status),
        message: "mock".to_string(),
    }
}

type Responder = dyn Fn(&str, &[(&str, &str)]) -> Result<String, ScrapeError> + Send + Sync;

/// Fetcher answering from a closure and recording every request.
///
/// Clones share the responder and the call log.
#[derive(Clone)]
pub struct MockFetcher {
    respond: Arc<Responder>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockFetcher {
    pub fn new(
        respond: impl Fn(&str, &[(&str, &str)]) -> Result<String, ScrapeError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            respond: Arc::new(respond),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Serve listing pages by `cstart`; offsets past the end get an empty page.
    pub fn paged(pages: Vec<String>) -> Self {
        Self::new(move |_, query| {
            let start: usize = query_value(query, "cstart")
                .and_then(|s| s.parse().ok())
                .unwrap_or(0);
            Ok(pages
                .get(start / LIST_PAGE_SIZE)
                .cloned()
                .unwrap_or_else(|| listing_page(&[])))
        })
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl PageFetcher for MockFetcher {
    fn fetch(&self, url: &str, query: &[(&str, &str)]) -> Result<String, ScrapeError> {
        let rendered = if query.is_empty() {
            url.to_string()
        } else {
            let pairs: Vec<String> = query.iter().map(|(k, v)| format!("{k}={v}")).collect();
            format!("{url}?{}", pairs.join("&"))
        };
        self.calls.lock().unwrap().push(rendered);
        (self.respond)(url, query)
    }
}
