// src/dispatch/fanout.rs
// =============================================================================
// This module runs all URL checks at the same time and gathers the results.
//
// How it works (fan-out / fan-in):
// 1. Spawn one tokio task per non-empty URL
// 2. Every task sends its outcome into the same channel
// 3. ONE collector task owns the result Vec and pushes whatever arrives
// 4. Wait for every check task to finish (the completion barrier)
// 5. Close the channel, then wait for the collector to hand back the Vec
//
// Why a channel instead of a Mutex<Vec<_>>?
// - Only the collector ever touches the Vec, so no locking is needed
// - Tasks just fire-and-forget their outcome into the channel
//
// Concurrency limit:
// - By default there is NO limit: 1000 URLs = 1000 checks in flight
// - `with_concurrency_limit(n)` adds a semaphore so at most n run at once
//
// Rust concepts:
// - tokio::spawn: Starts a task that runs concurrently with others
// - mpsc channel: Multi-producer, single-consumer queue between tasks
// - Semaphore: A counter of "permits" that limits concurrency
// =============================================================================

use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Semaphore};
use tracing::{debug, warn};

use crate::checker::{CheckOutcome, Checker};

// Launches checks for a batch of URLs
#[derive(Debug, Clone)]
pub struct Dispatcher {
    checker: Checker,
    concurrency_limit: Option<usize>,
}

impl Dispatcher {
    /// Creates a dispatcher with unlimited parallelism
    pub fn new(checker: Checker) -> Self {
        Dispatcher {
            checker,
            concurrency_limit: None,
        }
    }

    /// Caps how many checks may be in flight at once
    ///
    /// `None` (the default) means no cap. A limit of 0 is treated as 1 so
    /// the run can still make progress.
    pub fn with_concurrency_limit(mut self, limit: Option<usize>) -> Self {
        self.concurrency_limit = limit.map(|n| n.max(1));
        self
    }

    pub fn concurrency_limit(&self) -> Option<usize> {
        self.concurrency_limit
    }

    // Checks every non-empty URL and returns one outcome per URL
    //
    // Blank lines are skipped. Duplicates are checked (and reported) twice.
    // The returned Vec is in completion order, NOT input order.
    pub async fn run_all<I, S>(&self, urls: I) -> Vec<CheckOutcome>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<CheckOutcome>();

        // The single writer: owns `results` until the channel closes
        let collector = tokio::spawn(async move {
            let mut results = Vec::new();
            while let Some(outcome) = rx.recv().await {
                results.push(outcome);
            }
            results
        });

        let semaphore = self
            .concurrency_limit
            .map(|limit| Arc::new(Semaphore::new(limit)));

        let mut launched = Vec::new();
        for url in urls {
            let url: String = url.into();
            if url.trim().is_empty() {
                continue;
            }

            let checker = self.checker.clone();
            let tx = tx.clone();
            let semaphore = semaphore.clone();
            let task_url = url.clone();

            let handle = tokio::spawn(async move {
                // Held until the check is done; dropped with the task
                let _permit = match semaphore {
                    Some(semaphore) => semaphore.acquire_owned().await.ok(),
                    None => None,
                };
                let outcome = checker.check(task_url).await;
                // The collector outlives every task, so this can't fail
                let _ = tx.send(outcome);
            });
            launched.push((url, handle));
        }

        debug!(count = launched.len(), "checks launched");

        // Completion barrier: wait for every check task
        let (urls, handles): (Vec<String>, Vec<_>) = launched.into_iter().unzip();
        for (url, joined) in urls.into_iter().zip(join_all(handles).await) {
            if let Err(e) = joined {
                // A panicked task never sent its outcome; record it as DOWN
                warn!(url = %url, error = %e, "check task failed");
                let _ = tx.send(CheckOutcome::down(url));
            }
        }

        // Last sender gone: the collector drains what's left and returns
        drop(tx);
        let results = match collector.await {
            Ok(results) => results,
            Err(e) => {
                warn!(error = %e, "result collector failed");
                Vec::new()
            }
        };

        debug!(count = results.len(), "all outcomes collected");
        results
    }
}

// Checks every non-empty URL concurrently, without a concurrency cap
//
// Parameters:
//   urls: the URLs to check (blank entries are skipped)
//   timeout: per-request timeout
//   verify_ssl: whether to also run the certificate check
pub async fn run_all<I, S>(urls: I, timeout: Duration, verify_ssl: bool) -> Vec<CheckOutcome>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Dispatcher::new(Checker::new(timeout, verify_ssl))
        .run_all(urls)
        .await
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why does every task get its own `tx`?
//    - mpsc senders can be cloned; the receiver can't
//    - The channel only closes when ALL senders are dropped
//    - So the collector can't stop while any task is still running
//
// 2. Why do we keep the original `tx` until after join_all?
//    - If a task panics it never sends anything
//    - We use our own `tx` to send a DOWN outcome in its place
//    - Only then do we drop it and let the collector finish
//
// 3. What does `_permit` do?
//    - acquire_owned() waits until the semaphore has a free slot
//    - The permit gives the slot back when it is dropped (end of the task)
//    - With no limit we skip the semaphore entirely
//
// 4. What is unzip()?
//    - Turns an iterator of pairs into two collections
//    - Here: (url, handle) pairs -> Vec of urls + Vec of handles
// -----------------------------------------------------------------------------
