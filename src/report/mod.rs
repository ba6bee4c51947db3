// src/report/mod.rs
// =============================================================================
// This module turns outcomes into something a person (or program) can read.
//
// Submodules:
// - console: colored one-line-per-URL output for the terminal
// - json: indented JSON file output
// =============================================================================

mod console;
mod json;

pub use console::{write_report, ConsoleStyle};
pub use json::{to_json, write_json};
