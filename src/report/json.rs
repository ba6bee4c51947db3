// src/report/json.rs
// =============================================================================
// Saves the outcomes to a JSON file.
//
// Output is an indented array; each object has:
//   url, status, code (if UP), latency (if UP), ssl_valid (only when true)
//
// Which fields appear is decided entirely by the outcome values (see the
// serde attributes on CheckOutcome), so the same outcomes always produce the
// same bytes.
// =============================================================================

use anyhow::{Context, Result};
use std::path::Path;

use crate::checker::CheckOutcome;

// Serializes outcomes as pretty-printed JSON (two-space indent)
pub fn to_json(outcomes: &[CheckOutcome]) -> Result<String> {
    serde_json::to_string_pretty(outcomes).context("could not serialize results")
}

// Writes outcomes to `path`, replacing the file if it exists
pub fn write_json(path: &Path, outcomes: &[CheckOutcome]) -> Result<()> {
    let json = to_json(outcomes)?;
    std::fs::write(path, json)
        .with_context(|| format!("could not save results to '{}'", path.display()))
}
