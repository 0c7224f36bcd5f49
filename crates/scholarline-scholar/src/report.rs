//! Operator-facing rendering: candidate table and research summary

use std::fmt::Write;

use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};

use crate::model::{CandidateProfile, PublicationSummary};

const TITLE_WIDTH: usize = 80;
const ABSTRACT_WIDTH: usize = 500;

/// Detail labels shown in the summary, with their display names
const SHOWN_FIELDS: [(&str, &str); 5] = [
    ("Journal", "Journal"),
    ("Volume", "Volume"),
    ("Pages", "Pages"),
    ("Publisher", "Publisher"),
    ("Total citations", "Scholar Citations"),
];

/// Cut `text` to `max` characters, appending "..." when anything was dropped
fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}

/// Numbered table of search candidates
pub fn candidate_table(candidates: &[CandidateProfile]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("#").fg(Color::Cyan),
            Cell::new("Name").fg(Color::Cyan),
            Cell::new("Info").fg(Color::Cyan),
            Cell::new("URL").fg(Color::Cyan),
        ]);

    for (i, candidate) in candidates.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&candidate.display_name),
            Cell::new(&candidate.descriptive_text),
            Cell::new(&candidate.profile_reference).fg(Color::DarkGrey),
        ]);
    }
    table
}

/// Plain-text research summary, one block per publication
pub fn render_summary(papers: &[PublicationSummary]) -> String {
    let mut out = String::from("=== Research Summary ===\n");
    for (i, paper) in papers.iter().enumerate() {
        // Writing to a String cannot fail.
        let _ = render_paper(&mut out, i + 1, paper);
    }
    out
}

fn render_paper(out: &mut String, number: usize, paper: &PublicationSummary) -> std::fmt::Result {
    let or_unknown = |value: &Option<String>| value.clone().unwrap_or_else(|| "Unknown".into());

    writeln!(out)?;
    writeln!(
        out,
        "--- Paper {number}: {} ---",
        truncate(&paper.title, TITLE_WIDTH)
    )?;
    writeln!(out, "Year: {}", or_unknown(&paper.year))?;
    writeln!(out, "Citations: {}", paper.citation_count)?;
    writeln!(out, "Authors: {}", or_unknown(&paper.authors))?;
    writeln!(out, "Venue: {}", or_unknown(&paper.venue))?;

    if let Some(text) = &paper.abstract_text {
        writeln!(out, "Abstract: {}", truncate(text, ABSTRACT_WIDTH))?;
    } else if let Some(text) = paper.field("Description") {
        writeln!(out, "Description: {}", truncate(text, ABSTRACT_WIDTH))?;
    }

    for (label, shown) in SHOWN_FIELDS {
        if let Some(value) = paper.field(label) {
            writeln!(out, "{shown}: {value}")?;
        }
    }
    Ok(())
}
