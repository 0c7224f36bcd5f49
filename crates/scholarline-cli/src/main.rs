//! scholarline - Google Scholar research profile analyzer
//!
//! Finds an author's Scholar profile, lists their most recent publications
//! and enriches each one with its detail page.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use scholarline_core::{HttpConfig, ProgressContext};

mod config;
mod output;

use config::Config;

#[derive(Parser, Debug)]
#[command(name = "scholarline")]
#[command(about = "Analyze an author's research from their Google Scholar profile")]
#[command(version)]
struct Cli {
    /// Author name to search for
    author: String,

    /// Maximum number of papers to list and enrich (0 or less lists nothing)
    #[arg(long, default_value_t = 20, allow_negative_numbers = true)]
    max_papers: i64,

    /// Which search result profile to use (0 = first, out of range = first)
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    profile_index: i64,

    /// Parallel detail fetchers, at least 1 [default: 4, or [enrich] workers]
    #[arg(long, allow_negative_numbers = true)]
    num_workers: Option<i64>,

    /// Stop at the first paper older than this year
    #[arg(long, allow_negative_numbers = true)]
    year_limit: Option<i32>,

    /// Write results to this JSON file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Config file path (default: ./scholarline.toml or ~/.config/scholarline/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pause after each detail fetch in milliseconds [default: 500]
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Request timeout in seconds [default: 30]
    #[arg(long)]
    timeout: Option<u64>,
}

impl Cli {
    /// Pipeline config: file values, overridden by flags
    fn pipeline_config(&self, file: &Config) -> scholarline_scholar::Config {
        scholarline_scholar::Config {
            base_url: file.http.base_url.clone(),
            http: HttpConfig {
                user_agent: file.http.user_agent.clone(),
                timeout: self
                    .timeout
                    .map(Duration::from_secs)
                    .unwrap_or_else(|| file.timeout()),
            },
            max_papers: Some(usize::try_from(self.max_papers).unwrap_or(0)),
            profile_index: self.profile_index,
            workers: self
                .num_workers
                .map_or(file.enrich.workers, |n| usize::try_from(n).unwrap_or(0)),
            year_limit: self.year_limit,
            politeness_delay: self
                .delay_ms
                .map(Duration::from_millis)
                .unwrap_or_else(|| file.delay()),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let progress = ProgressContext::new();

    if let Err(e) = scholarline_core::init_logging(cli.quiet, cli.debug, progress.log_target()) {
        eprintln!("Failed to initialize logging: {e}");
    }

    // Failures are reported, never turned into a non-zero exit
    if let Err(e) = run(&cli, &progress) {
        log::error!("{e:#}");
    }
}

fn run(cli: &Cli, progress: &ProgressContext) -> Result<()> {
    let file_config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };
    let config = cli.pipeline_config(&file_config);
    log::debug!("{config:?}");

    let papers = scholarline_scholar::run(&cli.author, &config, progress);

    if let Some(path) = &cli.output {
        if output::write_json(path, &papers)? {
            log::info!("Results saved to {}", path.display());
        } else {
            log::info!("No results, {} not written", path.display());
        }
    }
    Ok(())
}
