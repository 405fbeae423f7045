//! In-process request counters.
//!
//! Counts requests, retries, and rate-limit pauses taken by a client so a
//! collection run can report them. Nothing here is exported outside the
//! process.
//!
//! # Invariants
//! - Recording is infallible and lock-free.
//! - Counters only grow; callers diff two snapshots to scope a run.

use std::sync::atomic::{AtomicUsize, Ordering};

use serde::Serialize;

/// Live counters shared by every request a client sends.
#[derive(Debug, Default)]
pub struct RequestStats {
    requests: AtomicUsize,
    retries: AtomicUsize,
    rate_limit_pauses: AtomicUsize,
}

/// Point-in-time copy of [`RequestStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub requests: usize,
    pub retries: usize,
    pub rate_limit_pauses: usize,
}

impl RequestStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one attempt sent over the wire.
    pub fn record_request(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a retry, and whether it was paced by an HTTP 429.
    pub fn record_retry(&self, rate_limited: bool) {
        self.retries.fetch_add(1, Ordering::Relaxed);
        if rate_limited {
            self.rate_limit_pauses.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            requests: self.requests.load(Ordering::Relaxed),
            retries: self.retries.load(Ordering::Relaxed),
            rate_limit_pauses: self.rate_limit_pauses.load(Ordering::Relaxed),
        }
    }
}

impl StatsSnapshot {
    /// Counts accumulated between `earlier` and `self`.
    pub fn since(&self, earlier: &StatsSnapshot) -> StatsSnapshot {
        StatsSnapshot {
            requests: self.requests.saturating_sub(earlier.requests),
            retries: self.retries.saturating_sub(earlier.retries),
            rate_limit_pauses: self
                .rate_limit_pauses
                .saturating_sub(earlier.rate_limit_pauses),
        }
    }
}
