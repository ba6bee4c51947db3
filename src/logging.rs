// src/logging.rs
// =============================================================================
// Sets up log output.
//
// Logs go to stderr so they never mix with the report on stdout.
// Default level is INFO, and a normal run logs nothing at that level;
// --verbose switches to DEBUG. RUST_LOG, when set, overrides both
// (e.g. RUST_LOG=url_sentinel=trace).
// With --no-color the log lines carry no ANSI codes either.
// =============================================================================

use tracing::{Level, Subscriber};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

// Installs the global subscriber, writing to stderr
pub fn init(verbose: bool, color: bool) {
    // Only fails if a subscriber is already installed, which is harmless
    let _ = tracing::subscriber::set_global_default(subscriber(
        default_filter(verbose),
        color,
        std::io::stderr,
    ));
}

// RUST_LOG if set, otherwise INFO (or DEBUG when verbose) for this crate
pub fn default_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| level_filter(verbose))
}

pub fn level_filter(verbose: bool) -> EnvFilter {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    EnvFilter::new(format!("url_sentinel={}", level))
}

// Builds the subscriber without installing it
pub fn subscriber<W>(filter: EnvFilter, color: bool, writer: W) -> impl Subscriber + Send + Sync
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(color)
        .with_target(false)
        .finish()
}
