// src/lib.rs
// =============================================================================
// url-sentinel: check many URLs at once for availability and TLS validity.
//
// Modules:
// - checker: checks ONE url (HTTP GET + optional certificate check)
// - dispatch: runs all checks concurrently and collects the outcomes
// - input: reads the URL list file
// - report: console and JSON output
// - cli: command-line options
// - logging: log setup
// - app: one full run, from parsed options to exit code
//
// The binary in main.rs parses options and calls app::run.
// =============================================================================

pub mod app;
pub mod checker;
pub mod cli;
pub mod dispatch;
pub mod input;
pub mod logging;
pub mod report;

#[cfg(test)]
mod testing;
