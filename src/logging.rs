//! Log subscriber setup
//!
//! Library events go to stderr. `-v` flags beat `output.verbosity`, and
//! `CABOOSE_LOG` (an `EnvFilter` directive) beats both.

use std::io::IsTerminal;

use caboose::Verbosity;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV_VAR: &str = "CABOOSE_LOG";

/// Filter directive for a `-v` count, falling back to the configured level
pub fn level_directive(verbose: u8, configured: Verbosity) -> &'static str {
    match verbose {
        0 => configured.filter_directive(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

pub fn init(verbose: u8, configured: Verbosity) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(level_directive(verbose, configured)));

    // A second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(verbose >= 3)
        .try_init();
}
