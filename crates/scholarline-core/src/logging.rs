//! Logging setup with indicatif integration
//!
//! Every record is rendered into one complete line before it is written, and
//! the write happens under a single lock (env_logger's locked stderr, or
//! `MultiProgress::suspend` when bars are drawn), so lines from concurrent
//! workers never interleave.

use indicatif::MultiProgress;
use log::Level;

const RESET: &str = "\x1b[0m";

/// Fixed-width label for a level
fn label(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN ",
        Level::Info => "INFO ",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}

fn color(level: Level) -> &'static str {
    match level {
        Level::Error => "\x1b[31m",
        Level::Warn => "\x1b[33m",
        Level::Info => "\x1b[32m",
        Level::Debug => "\x1b[36m",
        Level::Trace => "\x1b[35m",
    }
}

/// `[LEVEL] message`, with the label colored when `ansi` is set
fn render(level: Level, args: &std::fmt::Arguments<'_>, ansi: bool) -> String {
    if ansi {
        format!("[{}{}{RESET}] {args}", color(level), label(level))
    } else {
        format!("[{}] {args}", label(level))
    }
}

/// Level used when `RUST_LOG` is unset.
///
/// Diagnostics are part of the tool's output, so the default is `info`
/// even when progress bars are shown. `debug` wins over `quiet`.
fn default_filter(quiet: bool, debug: bool) -> &'static str {
    match (quiet, debug) {
        (_, true) => "debug",
        (true, false) => "warn",
        (false, false) => "info",
    }
}

/// Logger printing above the progress bars of a `MultiProgress`.
///
/// Filtering is delegated to an env_logger built from the environment.
pub struct IndicatifLogger {
    filter: env_logger::Logger,
    multi: MultiProgress,
}

impl IndicatifLogger {
    pub fn new(filter: env_logger::Logger, multi: MultiProgress) -> Self {
        Self { filter, multi }
    }
}

impl log::Log for IndicatifLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.filter.enabled(metadata)
    }

    fn log(&self, record: &log::Record) {
        if !self.filter.matches(record) {
            return;
        }
        let line = render(record.level(), record.args(), true);
        self.multi.suspend(|| eprintln!("{line}"));
    }

    fn flush(&self) {}
}

/// Initialize logging, routing through `multi` when progress bars are drawn.
///
/// `RUST_LOG` overrides the default level. Fails only if a logger was
/// already installed.
pub fn init_logging(
    quiet: bool,
    debug: bool,
    multi: Option<&MultiProgress>,
) -> Result<(), log::SetLoggerError> {
    let env = env_logger::Env::default().default_filter_or(default_filter(quiet, debug));
    let mut builder = env_logger::Builder::from_env(env);

    match multi {
        Some(multi) => {
            let filter = builder.build();
            let max_level = filter.filter();
            log::set_boxed_logger(Box::new(IndicatifLogger::new(filter, multi.clone())))?;
            log::set_max_level(max_level);
            Ok(())
        }
        None => builder
            .format(|buf, record| {
                use std::io::Write;
                writeln!(buf, "{}", render(record.level(), record.args(), false))
            })
            .try_init(),
    }
}
