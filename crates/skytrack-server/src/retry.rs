//! Fixed-delay retry policy for the poll loop.
//!
//! Every attempt is followed by the idle delay whatever happened. A fetch
//! the provider reported as unavailable adds the retry delay in front of
//! it. Delays never grow and retries are never capped.

use std::time::Duration;

use anyhow::Result;

use crate::cycle::CycleOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    idle: Duration,
    fetch_retry: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(Duration::from_secs(5), Duration::from_secs(5))
    }
}

impl RetryPolicy {
    pub fn new(idle: Duration, fetch_retry: Duration) -> Self {
        Self { idle, fetch_retry }
    }

    pub fn idle(&self) -> Duration {
        self.idle
    }

    pub fn fetch_retry(&self) -> Duration {
        self.fetch_retry
    }

    /// Waits to observe, in order, after a cycle ended with `result`.
    pub fn delays(&self, result: &Result<CycleOutcome>) -> Vec<Duration> {
        match result {
            Ok(CycleOutcome::FetchUnavailable) => vec![self.fetch_retry, self.idle],
            _ => vec![self.idle],
        }
    }
}
