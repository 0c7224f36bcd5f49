//! Scholarline Scholar - Google Scholar profile pipeline
//!
//! Resolves an author name to Scholar profiles, lists the chosen profile's
//! publications (newest first) and enriches each one with its detail page.
//!
//! # Stages
//!
//! - [`resolve`]: author search, one request
//! - [`list`]: paginated publication listing with count and year cut-offs
//! - [`enrich`]: concurrent detail fetches on a rayon pool, order preserved
//!
//! # Example
//!
//! ```ignore
//! use scholarline_core::ProgressContext;
//! use scholarline_scholar::{Config, run};
//!
//! let config = Config {
//!     max_papers: Some(5),
//!     ..Default::default()
//! };
//!
//! let papers = run("Geoffrey Hinton", &config, &ProgressContext::new());
//! println!("Enriched {} papers", papers.len());
//! ```

pub mod config;
pub mod enrich;
pub mod extract;
pub mod list;
pub mod model;
pub mod report;
pub mod resolve;
pub mod runner;

#[cfg(test)]
mod testing;

// Re-exports
pub use config::Config;
pub use enrich::{EnrichSummary, enrich};
pub use list::{Listing, StopReason, list};
pub use model::{CandidateProfile, DetailFields, PublicationDetail, PublicationSummary};
pub use resolve::{resolve, search};
pub use runner::{run, run_with};
