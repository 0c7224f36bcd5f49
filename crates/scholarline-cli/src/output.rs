//! JSON persistence of enriched publications

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use scholarline_scholar::PublicationSummary;

/// Write `papers` as a 2-space indented JSON array.
///
/// Returns `false` without touching the filesystem when `papers` is empty.
pub fn write_json(path: &Path, papers: &[PublicationSummary]) -> Result<bool> {
    if papers.is_empty() {
        return Ok(false);
    }

    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, papers)
        .with_context(|| format!("Failed to serialize results to {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(true)
}
