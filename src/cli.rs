// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Every option has a default, so running `url-sentinel` with no arguments
// checks the URLs in ./urls.txt with a 5 second timeout.
// =============================================================================

use clap::Parser;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "url-sentinel",
    version,
    about = "Check a list of URLs for availability, latency and TLS certificate validity",
    long_about = "url-sentinel reads URLs (one per line) from a file, checks them all concurrently \
                  and prints an UP/DOWN line for each. Optionally verifies that the certificate \
                  on port 443 is valid for each host, and saves the results as JSON."
)]
pub struct Cli {
    /// File with URLs to check, one per line
    #[arg(short, long, default_value = "urls.txt")]
    pub file: PathBuf,

    /// Save results as JSON to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Timeout for each request, in seconds
    ///
    /// The certificate check (with --ssl) gets its own timeout of the same length
    #[arg(short, long, default_value_t = 5, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Also verify the TLS certificate on port 443 for each host
    #[arg(long)]
    pub ssl: bool,

    /// Maximum number of checks in flight at once (default: no limit)
    #[arg(short, long)]
    pub concurrency: Option<NonZeroUsize>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Show debug logs on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn concurrency_limit(&self) -> Option<usize> {
        self.concurrency.map(NonZeroUsize::get)
    }
}
