// src/checker/http.rs
// =============================================================================
// This module checks if a single URL is up by making an HTTP GET request.
//
// Key functionality:
// - Makes one HTTP GET request per URL (no retries)
// - Measures latency from request start to response headers
// - Treats ANY HTTP status code (even 404 or 500) as "UP"
// - Only transport failures (refused, timeout, DNS, TLS) count as "DOWN"
// - Optionally runs a TLS certificate check against the same host
//
// Rust concepts:
// - async/await: For network I/O
// - Option<T>: For fields that only exist when the URL is up
// - Serde attributes: To control which fields end up in the JSON file
// =============================================================================

use reqwest::Client;
use serde::{Serialize, Serializer};
use std::fmt;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

use super::tls::TlsProbe;

// Whether a URL answered at all
//
// Serialized as "UP" / "DOWN" to match the console output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    /// The HTTP request completed (any status code)
    Up,
    /// The HTTP request failed at the transport level
    Down,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Up => write!(f, "UP"),
            Status::Down => write!(f, "DOWN"),
        }
    }
}

// The result of checking a single URL
//
// Fields are private: an outcome is built once (through `up` or `down`)
// and never changed afterwards. Read it through the accessor methods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckOutcome {
    /// The URL exactly as it appeared in the input
    url: String,
    status: Status,
    /// HTTP status code, only when UP
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<u16>,
    /// Time to response headers, only when UP
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_latency"
    )]
    latency: Option<Duration>,
    /// Only written to JSON when the certificate check passed
    #[serde(skip_serializing_if = "is_not_true")]
    ssl_valid: Option<bool>,
}

impl CheckOutcome {
    /// Builds an outcome for a URL that answered
    pub fn up(url: String, code: u16, latency: Duration, ssl_valid: Option<bool>) -> Self {
        CheckOutcome {
            url,
            status: Status::Up,
            code: Some(code),
            latency: Some(latency),
            ssl_valid,
        }
    }

    /// Builds an outcome for a URL that could not be reached
    pub fn down(url: String) -> Self {
        CheckOutcome {
            url,
            status: Status::Down,
            code: None,
            latency: None,
            ssl_valid: None,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_up(&self) -> bool {
        self.status == Status::Up
    }

    pub fn code(&self) -> Option<u16> {
        self.code
    }

    pub fn latency(&self) -> Option<Duration> {
        self.latency
    }

    pub fn ssl_valid(&self) -> Option<bool> {
        self.ssl_valid
    }
}

// Formats a latency the same way everywhere (console and JSON)
//
// Example: 123ms
pub fn format_latency(latency: Duration) -> String {
    format!("{}ms", latency.as_millis())
}

fn serialize_latency<S>(latency: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match latency {
        Some(latency) => serializer.serialize_str(&format_latency(*latency)),
        None => serializer.serialize_none(),
    }
}

// `false` and "not checked" look the same in the JSON file
fn is_not_true(value: &Option<bool>) -> bool {
    *value != Some(true)
}

// Rounds to the nearest whole millisecond
fn round_to_millis(elapsed: Duration) -> Duration {
    let millis = (elapsed.as_micros() + 500) / 1000;
    Duration::from_millis(millis as u64)
}

// Checks URLs one at a time
//
// A Checker is cheap to clone: the dispatcher hands one copy to every task.
// Each call to `check` still builds its own HTTP client and opens its own
// TLS connection, so two checks never share a socket.
#[derive(Debug, Clone)]
pub struct Checker {
    timeout: Duration,
    tls: Option<TlsProbe>,
}

impl Checker {
    /// Creates a checker
    ///
    /// Parameters:
    ///   timeout: upper bound for the whole GET (and, separately, the TLS check)
    ///   verify_ssl: whether to run the certificate check on port 443
    pub fn new(timeout: Duration, verify_ssl: bool) -> Self {
        let tls = if verify_ssl {
            Some(TlsProbe::default())
        } else {
            None
        };
        Checker { timeout, tls }
    }

    /// Creates a checker that always runs the given TLS probe
    pub fn with_tls_probe(timeout: Duration, probe: TlsProbe) -> Self {
        Checker {
            timeout,
            tls: Some(probe),
        }
    }

    // Checks a single URL
    //
    // This never fails: every problem is recorded inside the outcome.
    pub async fn check(&self, url: String) -> CheckOutcome {
        let start = Instant::now();

        let client = match Client::builder().timeout(self.timeout).build() {
            Ok(client) => client,
            Err(e) => {
                debug!(url = %url, error = %e, "could not build HTTP client");
                return CheckOutcome::down(url);
            }
        };

        let response = match client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                debug!(url = %url, error = %e, "request failed");
                return CheckOutcome::down(url);
            }
        };

        // send() resolves once the headers are in, so this is header latency
        let latency = round_to_millis(start.elapsed());
        let code = response.status().as_u16();
        drop(response);

        let ssl_valid = match &self.tls {
            Some(probe) => Some(probe.verify(&url, self.timeout).await),
            None => None,
        };

        debug!(url = %url, code, latency_ms = latency.as_millis() as u64, "request completed");
        CheckOutcome::up(url, code, latency, ssl_valid)
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why are the CheckOutcome fields private?
//    - Outside code can't write `outcome.code = Some(200)` on a DOWN outcome
//    - The only ways in are `up()` and `down()`, which set fields consistently
//    - Getters like `code()` give read-only access
//
// 2. What does skip_serializing_if do?
//    - It asks serde to leave a field out of the JSON when a function says so
//    - Option::is_none skips missing values
//    - is_not_true skips both None and Some(false)
//
// 3. What is serialize_with?
//    - It replaces serde's default encoding for one field
//    - Duration would normally become {"secs": .., "nanos": ..}
//    - We want a readable string like "123ms" instead
//
// 4. Why drop(response)?
//    - We only need the status code, not the body
//    - Dropping the response closes the connection right away
// -----------------------------------------------------------------------------
