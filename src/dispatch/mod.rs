// src/dispatch/mod.rs
// =============================================================================
// This module runs many URL checks concurrently.
//
// Features:
// - One task per URL, all started right away (no cap by default)
// - Optional concurrency limit for very large URL lists
// - Results gathered by a single collector task through a channel
// - Returns only after every URL has an outcome
//
// Rust concepts:
// - Async tasks: tokio::spawn for concurrent network requests
// - Channels: For passing results between tasks safely
// =============================================================================

mod fanout;

// Re-export the dispatcher and the one-shot helper
pub use fanout::{run_all, Dispatcher};
