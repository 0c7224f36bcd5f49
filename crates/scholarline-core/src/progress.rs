//! Progress reporting for TTY and non-TTY environments.
//!
//! On a terminal, sequential stages get a spinner line and concurrent stages
//! a counter bar, all under one `MultiProgress`. Otherwise every bar is
//! hidden and the log stream is the only progress indicator.

use std::io::IsTerminal;
use std::time::Duration;

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

const SPINNER_TICK: Duration = Duration::from_millis(80);

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.green} {prefix:<10.cyan.bold} {elapsed:>4} {wide_msg}")
        .expect("invalid template")
}

fn counter_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{prefix:<10.cyan.bold} {bar:30.green/dim} {pos:>4}/{len:4} {eta:>4} {wide_msg:.dim}",
    )
    .expect("invalid template")
    .progress_chars("━╸─")
}

/// Owner of every bar drawn during a run
pub struct ProgressContext {
    multi: MultiProgress,
    draw: bool,
}

impl ProgressContext {
    /// Draw bars only when stderr is a terminal
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            draw: std::io::stderr().is_terminal(),
        }
    }

    /// Context that never draws (tests, piped output)
    pub fn hidden() -> Self {
        Self {
            multi: MultiProgress::new(),
            draw: false,
        }
    }

    fn add(&self, pb: ProgressBar, style: ProgressStyle, name: &str) -> ProgressBar {
        if !self.draw {
            return ProgressBar::hidden();
        }
        let pb = self.multi.add(pb);
        pb.set_style(style);
        pb.set_prefix(name.to_string());
        pb
    }

    /// Counter bar advancing once per finished unit of work.
    ///
    /// Hidden bars still count, so callers may read `position()` either way.
    pub fn item_bar(&self, name: &str, total: usize) -> ProgressBar {
        let pb = self.add(ProgressBar::new(total as u64), counter_style(), name);
        if pb.is_hidden() {
            pb.set_length(total as u64);
        }
        pb
    }

    /// Spinner line for a sequential stage; `finish_and_clear()` when done.
    pub fn stage_line(&self, name: &str) -> ProgressBar {
        let pb = self.add(ProgressBar::new_spinner(), spinner_style(), name);
        if !pb.is_hidden() {
            pb.enable_steady_tick(SPINNER_TICK);
        }
        pb
    }

    /// Print an operator-facing block on stderr without tearing the bars.
    pub fn println(&self, msg: impl AsRef<str>) {
        if self.draw {
            let _ = self.multi.println(msg);
        } else {
            eprintln!("{}", msg.as_ref());
        }
    }

    /// `MultiProgress` the logger must print through, when bars are drawn
    pub fn log_target(&self) -> Option<&MultiProgress> {
        self.draw.then_some(&self.multi)
    }
}

impl Default for ProgressContext {
    fn default() -> Self {
        Self::new()
    }
}
