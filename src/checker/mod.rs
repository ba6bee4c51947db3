// src/checker/mod.rs
// =============================================================================
// This module contains the logic for checking ONE URL.
//
// Submodules:
// - http: Makes the HTTP GET request and builds the outcome record
// - tls: Opens a separate TLS connection to verify the certificate
//
// This file (mod.rs) is the module root - it ties everything together and
// exports the public API that other parts of our application can use.
// =============================================================================

// Declare submodules (tells Rust to include these files)
mod http;
mod tls;

// Re-export public items from submodules
// This lets users write `checker::Checker` instead of
// `checker::http::Checker`
pub use http::{format_latency, CheckOutcome, Checker, Status};
pub use tls::TlsProbe;

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why split http and tls into two files?
//    - They talk to the network in very different ways
//    - http uses reqwest (a high-level client)
//    - tls uses tokio-rustls directly so we control verification ourselves
//
// 2. Why does tls get its own connection?
//    - The URL might be plain http:// and never touch TLS at all
//    - We still want to know if port 443 has a good certificate
// -----------------------------------------------------------------------------
