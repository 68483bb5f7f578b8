//! Usage tracker implementation
//!
//! Tracks per-identifier usage events in memory and enforces a capped
//! number of uses per rolling window. State does not survive a restart
//! and is not shared between instances; identifiers are never evicted.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::debug;

/// Snapshot of an identifier's current usage, returned to callers
/// and embedded in API responses.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UsageSnapshot {
    /// Uses recorded within the current window
    pub count: usize,
    /// Configured maximum uses per window
    pub max: usize,
    /// Seconds until the limit releases; 0 while under the limit
    pub reset_in: i64,
}

/// In-memory usage tracker with a rolling window.
///
/// Each identifier maps to the timestamps of its recent uses. A use is
/// allowed while fewer than `limit` timestamps fall inside the window;
/// older timestamps are pruned on every access.
///
/// The lock keeps the map itself sound under concurrent requests. The
/// check-then-record sequence in handlers is not atomic, so two racing
/// requests for the same identifier can both pass the check near the
/// limit; the cap is advisory, not billing-grade.
pub struct UsageTracker {
    entries: RwLock<HashMap<String, Vec<DateTime<Utc>>>>,
    limit: usize,
    window: Duration,
}

impl UsageTracker {
    /// Create a tracker enforcing `limit` uses per `window_seconds`
    pub fn new(limit: usize, window_seconds: u64) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            limit,
            window: Duration::seconds(window_seconds as i64),
        }
    }

    /// Check whether `id` may act right now
    pub fn can_use(&self, id: &str) -> bool {
        self.can_use_at(id, Utc::now())
    }

    /// Record one usage event for `id`
    pub fn record_use(&self, id: &str) {
        self.record_use_at(id, Utc::now());
    }

    /// Report current usage for `id`
    pub fn get_usage(&self, id: &str) -> UsageSnapshot {
        self.get_usage_at(id, Utc::now())
    }

    pub(crate) fn can_use_at(&self, id: &str, now: DateTime<Utc>) -> bool {
        let mut entries = self.entries.write().unwrap();
        let times = entries.entry(id.to_string()).or_default();
        Self::prune(times, now, self.window);
        times.len() < self.limit
    }

    pub(crate) fn record_use_at(&self, id: &str, now: DateTime<Utc>) {
        let mut entries = self.entries.write().unwrap();
        let times = entries.entry(id.to_string()).or_default();
        Self::prune(times, now, self.window);
        times.push(now);
        debug!(id = %id, count = times.len(), "Recorded usage event");
    }

    pub(crate) fn get_usage_at(&self, id: &str, now: DateTime<Utc>) -> UsageSnapshot {
        let mut entries = self.entries.write().unwrap();
        let times = entries.entry(id.to_string()).or_default();
        Self::prune(times, now, self.window);

        let count = times.len().min(self.limit);
        let reset_in = if times.len() >= self.limit {
            // The oldest in-window use leaving the window frees a slot.
            times
                .first()
                .map(|oldest| (*oldest + self.window - now).num_seconds().max(0))
                .unwrap_or(0)
        } else {
            0
        };

        UsageSnapshot {
            count,
            max: self.limit,
            reset_in,
        }
    }

    /// Drop timestamps that have fallen out of the window
    fn prune(times: &mut Vec<DateTime<Utc>>, now: DateTime<Utc>, window: Duration) {
        times.retain(|t| now - *t < window);
    }
}
