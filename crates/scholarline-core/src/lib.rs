//! Scholarline Core - Common infrastructure for scraping pipelines
//!
//! This crate provides the source-agnostic pieces shared by the pipeline
//! crates: blocking page fetches, the classified error type, logging,
//! progress reporting and the worker queue used by concurrent stages.

pub mod error;
pub mod logging;
pub mod progress;
pub mod stream;
pub mod work_queue;

// Re-exports for convenience
pub use error::ScrapeError;
pub use logging::{IndicatifLogger, init_logging};
pub use progress::ProgressContext;
pub use stream::{DEFAULT_USER_AGENT, HttpConfig, HttpFetcher, PageFetcher, SHARED_RUNTIME};
pub use work_queue::{IndexedSlots, WorkQueue};
