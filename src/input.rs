// src/input.rs
// =============================================================================
// Reads the list of URLs to check.
//
// Format: a plain text file, one URL per line.
// - Blank lines are skipped
// - No comments, no validation: whatever is on the line gets checked
// - Windows line endings (\r\n) are handled
// =============================================================================

use anyhow::{Context, Result};
use std::path::Path;

// Reads the URL list from a file
//
// Fails only if the file can't be opened or read (e.g. it doesn't exist).
// This is the one error that stops the whole program.
pub fn read_urls(path: &Path) -> Result<Vec<String>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("could not open URL file '{}'", path.display()))?;

    Ok(parse_urls(&contents))
}

// Splits text into URLs, one per non-blank line
//
// Example:
//   "http://a.test\n\nhttp://b.test\r\n" -> ["http://a.test", "http://b.test"]
pub fn parse_urls(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}
