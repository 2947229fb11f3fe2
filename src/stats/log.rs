//! Bounded request log.
//!
//! # Responsibilities
//! - Store completed-request records in completion order
//! - Evict the oldest record once capacity is exceeded
//! - Hand windowed copies to the snapshot computation

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, SystemTime};

use crate::stats::snapshot::StatsSnapshot;

/// One completed proxied request.
///
/// Entries are appended in completion order, which can differ from arrival
/// order since completion time depends on backend latency.
#[derive(Debug, Clone)]
pub struct RequestLogEntry {
    pub timestamp: SystemTime,
    pub method: String,
    /// Inbound path as received, before the outbound transform.
    pub path: String,
    /// Identifier of the backend the request was forwarded to.
    pub target: String,
    pub status: u16,
    pub response_time_ms: f64,
    pub error: Option<String>,
}

/// Fixed-capacity FIFO buffer of request log entries.
///
/// A single mutex serializes the append/evict path so FIFO ordering holds
/// under concurrent writers. Critical sections only touch the deque; all
/// sorting and aggregation happens on copies after the lock is released.
#[derive(Debug)]
pub struct RequestLog {
    entries: Mutex<VecDeque<RequestLogEntry>>,
    capacity: usize,
}

impl RequestLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    // A poisoned lock still guards a structurally valid deque, so recover
    // the guard rather than propagating the panic to every caller.
    fn entries(&self) -> MutexGuard<'_, VecDeque<RequestLogEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append an entry, evicting the oldest one when over capacity.
    pub fn record(&self, entry: RequestLogEntry) {
        let mut entries = self.entries();
        entries.push_back(entry);
        if entries.len() > self.capacity {
            entries.pop_front();
        }
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Most recently appended entry, if any.
    pub fn last(&self) -> Option<RequestLogEntry> {
        self.entries().back().cloned()
    }

    /// Compute windowed statistics relative to the current time.
    pub fn compute(&self, window: Duration) -> StatsSnapshot {
        self.compute_at(SystemTime::now(), window)
    }

    /// Compute windowed statistics relative to an explicit `now`.
    ///
    /// Pure given `now` and the retained entries, so repeated calls without
    /// intervening records return identical snapshots.
    pub fn compute_at(&self, now: SystemTime, window: Duration) -> StatsSnapshot {
        let filtered: Vec<RequestLogEntry> = {
            let entries = self.entries();
            entries
                .iter()
                .filter(|e| age(now, e.timestamp) <= window)
                .cloned()
                .collect()
        };
        StatsSnapshot::from_entries(&filtered, now)
    }
}

/// Age of a timestamp relative to `now`; a timestamp in the future (clock
/// adjustment) counts as age zero and stays inside every window.
fn age(now: SystemTime, timestamp: SystemTime) -> Duration {
    now.duration_since(timestamp).unwrap_or_default()
}
