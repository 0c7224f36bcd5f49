//! Markup extraction for the three Scholar page views
//!
//! Every function here is a pure function of the markup (and the origin used
//! to absolutize links). Missing substructures drop the affected field or
//! record instead of failing the page.

use std::sync::LazyLock;

use scholarline_core::ScrapeError;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::model::{CandidateProfile, PublicationDetail, PublicationSummary};

/// Heading text that introduces the profile block on a search page
const PROFILES_MARKER: &str = "User profiles for";

/// Profile links point at the citations view of a user
const PROFILE_LINK_MARKER: &str = "/citations?user=";

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("BUG: hardcoded CSS selector {css:?}: {e}"))
}

// Search view
static RESULT_HEADING: LazyLock<Selector> = LazyLock::new(|| selector("h3.gs_rt"));
static PROFILE_HEADING: LazyLock<Selector> = LazyLock::new(|| selector("h4.gs_rt2"));
static LINK: LazyLock<Selector> = LazyLock::new(|| selector("a"));

// List view
static LIST_ROW: LazyLock<Selector> = LazyLock::new(|| selector("tr.gsc_a_tr"));
static TITLE_CELL: LazyLock<Selector> = LazyLock::new(|| selector("td.gsc_a_t"));
static GRAY_LINE: LazyLock<Selector> = LazyLock::new(|| selector("div.gs_gray"));
static CITATIONS_CELL: LazyLock<Selector> = LazyLock::new(|| selector("td.gsc_a_c"));
static YEAR: LazyLock<Selector> = LazyLock::new(|| selector("td.gsc_a_y span"));

// Detail view
static DETAIL_TABLE: LazyLock<Selector> = LazyLock::new(|| selector("div#gsc_oci_table"));
static DETAIL_ROW: LazyLock<Selector> = LazyLock::new(|| selector("div.gs_scl"));
static DETAIL_FIELD: LazyLock<Selector> = LazyLock::new(|| selector("div.gsc_oci_field"));
static DETAIL_VALUE: LazyLock<Selector> = LazyLock::new(|| selector("div.gsc_oci_value"));
static DESCRIPTION: LazyLock<Selector> = LazyLock::new(|| selector("div#gsc_oci_descr"));

/// Rendered text of an element: all descendant text, whitespace collapsed.
fn text_of(el: ElementRef<'_>) -> String {
    let raw: String = el.text().collect();
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Resolve an `href` against the origin; empty or unjoinable links are dropped.
fn absolute(base: &Url, href: Option<&str>) -> Option<String> {
    let href = href.filter(|h| !h.trim().is_empty())?;
    base.join(href).ok().map(String::from)
}

/// Extract candidate profiles from an author search page.
///
/// Returns `None` when the page has no "User profiles for" block (no match,
/// or the query did not need disambiguation). Candidates keep page order;
/// headings without a usable profile link are skipped.
pub fn parse_profile_search(html: &str, base: &Url) -> Option<Vec<CandidateProfile>> {
    let doc = Html::parse_document(html);

    let heading = doc.select(&RESULT_HEADING).next()?;
    if !text_of(heading).contains(PROFILES_MARKER) {
        return None;
    }
    let table = heading
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "table")?;

    let profiles = table
        .select(&PROFILE_HEADING)
        .filter_map(|h4| {
            let link = h4.select(&LINK).next()?;
            let href = link.value().attr("href")?;
            if !href.contains(PROFILE_LINK_MARKER) {
                return None;
            }
            let profile_reference = base.join(href).ok()?.to_string();
            let display_name = text_of(link);
            let descriptive_text = h4
                .parent()
                .and_then(ElementRef::wrap)
                .map(text_of)
                .unwrap_or_else(|| display_name.clone());
            Some(CandidateProfile {
                display_name,
                profile_reference,
                descriptive_text,
            })
        })
        .collect();

    Some(profiles)
}

/// Extract every row of a publication-list page.
///
/// The result has one entry per `tr.gsc_a_tr` row, so its length is the
/// number of rows the page delivered (used for pagination). Rows without a
/// title come back as `Err`.
pub fn parse_publication_rows(
    html: &str,
    base: &Url,
) -> Vec<Result<PublicationSummary, ScrapeError>> {
    let doc = Html::parse_document(html);
    doc.select(&LIST_ROW).map(|row| parse_row(row, base)).collect()
}

fn parse_row(row: ElementRef<'_>, base: &Url) -> Result<PublicationSummary, ScrapeError> {
    let title_cell = row
        .select(&TITLE_CELL)
        .next()
        .ok_or_else(|| ScrapeError::structure("title cell"))?;
    let title_link = title_cell
        .select(&LINK)
        .next()
        .ok_or_else(|| ScrapeError::structure("title link"))?;
    let title = text_of(title_link);
    if title.is_empty() {
        return Err(ScrapeError::structure("title text"));
    }

    let mut paper = PublicationSummary::new(title);
    paper.detail_reference = absolute(base, title_link.value().attr("href"));

    // First gray line lists authors, second the venue
    let mut gray = title_cell.select(&GRAY_LINE).map(text_of);
    paper.authors = gray.next();
    paper.venue = gray.next();

    if let Some(link) = row
        .select(&CITATIONS_CELL)
        .next()
        .and_then(|cell| cell.select(&LINK).next())
    {
        paper.citation_count = text_of(link);
    }

    paper.year = row.select(&YEAR).next().map(text_of);
    Ok(paper)
}

/// Extract field/value pairs and the description from a detail page.
pub fn parse_publication_detail(html: &str) -> PublicationDetail {
    let doc = Html::parse_document(html);
    let mut detail = PublicationDetail::default();

    if let Some(table) = doc.select(&DETAIL_TABLE).next() {
        for row in table.select(&DETAIL_ROW) {
            let field = row.select(&DETAIL_FIELD).next();
            let value = row.select(&DETAIL_VALUE).next();
            if let (Some(field), Some(value)) = (field, value) {
                detail.fields.insert(text_of(field), text_of(value));
            }
        }
    }

    detail.abstract_text = doc.select(&DESCRIPTION).next().map(text_of);
    detail
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ListingRow, base, detail_page, listing_page, search_page};

    #[test]
    fn search_extracts_profiles_in_order() {
        let html = search_page("Jane Doe", &[("Jane Doe", "abc123"), ("Jane Q. Doe", "xyz789")]);
        let profiles = parse_profile_search(&html, &base()).unwrap();

        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].display_name, "Jane Doe");
        assert_eq!(
            profiles[0].profile_reference,
            "https://scholar.test/citations?user=abc123&hl=en"
        );
        assert!(profiles[0].descriptive_text.contains("Jane Doe"));
        assert!(profiles[0].descriptive_text.contains("Cited by"));
        assert_eq!(profiles[1].display_name, "Jane Q. Doe");
    }

    #[test]
    fn search_without_profile_block_is_none() {
        let html = r#"<html><body>
            <h3 class="gs_rt"><a href="/paper">Some paper about Jane</a></h3>
            <table><tr><td><h4 class="gs_rt2"><a href="/citations?user=zzz">X</a></h4></td></tr></table>
        </body></html>"#;
        assert!(parse_profile_search(html, &base()).is_none());
        assert!(parse_profile_search("<html></html>", &base()).is_none());
    }

    #[test]
    fn search_skips_non_profile_links() {
        let html = r#"<html><body>
            <h3 class="gs_rt">User profiles for <b>doe</b></h3>
            <table><tr><td>
              <h4 class="gs_rt2"><a href="/scholar?q=doe">Not a profile</a></h4>
              <h4 class="gs_rt2">No link at all</h4>
              <h4 class="gs_rt2"><a href="/citations?user=ok1&amp;hl=en">Real Doe</a></h4>
            </td></tr></table>
        </body></html>"#;
        let profiles = parse_profile_search(html, &base()).unwrap();
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].display_name, "Real Doe");
    }

    #[test]
    fn search_block_without_table_is_none() {
        let html = r#"<html><body><h3 class="gs_rt">User profiles for doe</h3><p>nothing</p></body></html>"#;
        assert!(parse_profile_search(html, &base()).is_none());
    }

    #[test]
    fn rows_extract_all_fields() {
        let html = listing_page(&[ListingRow::new("Attention Everywhere", "2021").cited("42")]);
        let rows = parse_publication_rows(&html, &base());
        assert_eq!(rows.len(), 1);
        let paper = rows[0].as_ref().unwrap();
        assert_eq!(paper.title, "Attention Everywhere");
        assert_eq!(paper.authors.as_deref(), Some("J Doe, A Smith"));
        assert_eq!(paper.venue.as_deref(), Some("Journal of Tests 12 (3), 2021"));
        assert_eq!(paper.citation_count, "42");
        assert_eq!(paper.year.as_deref(), Some("2021"));
        assert_eq!(
            paper.detail_reference.as_deref(),
            Some(
                "https://scholar.test/citations?view_op=view_citation&hl=en&citation_for_view=abc123:Attention_Everywhere"
            )
        );
    }

    #[test]
    fn rows_default_citations_when_unlinked() {
        let html = listing_page(&[ListingRow::new("Uncited", "2019")]);
        let rows = parse_publication_rows(&html, &base());
        assert_eq!(rows[0].as_ref().unwrap().citation_count, "0");
    }

    #[test]
    fn rows_without_title_are_errors_but_counted() {
        let html = r#"<html><body><table><tbody>
            <tr class="gsc_a_tr"><td class="gsc_a_t"><div class="gs_gray">nobody</div></td>
                <td class="gsc_a_c"></td><td class="gsc_a_y"><span>2020</span></td></tr>
            <tr class="gsc_a_tr"><td class="gsc_a_c"><a>3</a></td></tr>
            <tr class="gsc_a_tr"><td class="gsc_a_t"><a href="/x">Kept</a></td></tr>
        </tbody></table></body></html>"#;
        let rows = parse_publication_rows(html, &base());
        assert_eq!(rows.len(), 3);
        assert!(matches!(rows[0], Err(ScrapeError::Structure(_))));
        assert!(matches!(rows[1], Err(ScrapeError::Structure(_))));
        let kept = rows[2].as_ref().unwrap();
        assert_eq!(kept.title, "Kept");
        assert!(kept.authors.is_none());
        assert!(kept.year.is_none());
        assert_eq!(kept.citation_count, "0");
    }

    #[test]
    fn rows_empty_page() {
        assert!(parse_publication_rows("<html><body></body></html>", &base()).is_empty());
    }

    #[test]
    fn detail_extracts_fields_and_abstract() {
        let html = detail_page(
            &[
                ("Authors", "J Doe, A Smith"),
                ("Journal", "Nature"),
                ("Volume", "7"),
                ("Total citations", "Cited by 12"),
            ],
            Some("We   study\n things."),
        );
        let detail = parse_publication_detail(&html);
        assert_eq!(detail.fields.len(), 4);
        assert_eq!(detail.fields.get("Journal").map(String::as_str), Some("Nature"));
        assert_eq!(detail.fields.get("Total citations").map(String::as_str), Some("Cited by 12"));
        assert_eq!(detail.abstract_text.as_deref(), Some("We study things."));
    }

    #[test]
    fn detail_without_table_is_empty() {
        let detail = parse_publication_detail("<html><body><p>blocked</p></body></html>");
        assert!(detail.is_empty());
    }

    #[test]
    fn detail_skips_half_rows() {
        let html = r#"<div id="gsc_oci_table">
            <div class="gs_scl"><div class="gsc_oci_field">Pages</div></div>
            <div class="gs_scl"><div class="gsc_oci_field">Publisher</div><div class="gsc_oci_value">ACM</div></div>
        </div>"#;
        let detail = parse_publication_detail(html);
        assert_eq!(detail.fields.len(), 1);
        assert_eq!(detail.fields.get("Publisher").map(String::as_str), Some("ACM"));
        assert!(detail.abstract_text.is_none());
    }

    #[test]
    fn extraction_is_deterministic() {
        let listing = listing_page(&[
            ListingRow::new("A", "2022").cited("1"),
            ListingRow::new("B", "2021"),
        ]);
        assert_eq!(
            parse_publication_rows(&listing, &base()),
            parse_publication_rows(&listing, &base())
        );

        let detail = detail_page(&[("Journal", "Science")], Some("abs"));
        assert_eq!(parse_publication_detail(&detail), parse_publication_detail(&detail));

        let search = search_page("doe", &[("Doe", "u1")]);
        assert_eq!(
            parse_profile_search(&search, &base()),
            parse_profile_search(&search, &base())
        );
    }

    #[test]
    fn text_collapses_whitespace() {
        let html = Html::parse_fragment("<div>  Deep <i>in vivo</i>\n imaging </div>");
        let div = html.select(&selector("div")).next().unwrap();
        assert_eq!(text_of(div), "Deep in vivo imaging");
    }
}
