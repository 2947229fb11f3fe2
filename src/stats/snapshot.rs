//! Windowed statistics computation.
//!
//! # Responsibilities
//! - Derive rates, latency percentiles, and per-path/per-backend counts
//!   from a windowed slice of the request log
//! - Round all rates and latencies to two decimal places

use std::collections::HashMap;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::stats::log::RequestLogEntry;

/// Derived traffic statistics for one time window. Never persisted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StatsSnapshot {
    /// Requests per minute over the observed span.
    pub rpm: f64,
    /// Requests per second over the observed span.
    pub rps: f64,
    /// 99th percentile response time in milliseconds.
    pub p99: f64,
    /// 95th percentile response time in milliseconds.
    pub p95: f64,
    /// Request count per inbound path.
    pub endpoints: HashMap<String, u64>,
    /// Request count per target backend identifier.
    pub hosts: HashMap<String, u64>,
}

impl StatsSnapshot {
    /// Aggregate a window of log entries.
    ///
    /// `entries` must already be filtered to the window, in completion
    /// order; the observed span runs from the earliest entry to `now`.
    /// An empty window yields the zeroed snapshot.
    pub fn from_entries(entries: &[RequestLogEntry], now: SystemTime) -> Self {
        let Some(earliest) = entries.first() else {
            return Self::default();
        };

        let count = entries.len();
        let duration_secs = now
            .duration_since(earliest.timestamp)
            .unwrap_or_default()
            .as_secs_f64();

        let (rps, rpm) = if duration_secs > 0.0 {
            (
                count as f64 / duration_secs,
                count as f64 / (duration_secs / 60.0),
            )
        } else {
            (0.0, 0.0)
        };

        let mut response_times: Vec<f64> = entries.iter().map(|e| e.response_time_ms).collect();
        response_times.sort_by(|a, b| a.total_cmp(b));
        let p99 = response_times[percentile_index(count, 0.99)];
        let p95 = response_times[percentile_index(count, 0.95)];

        let mut endpoints: HashMap<String, u64> = HashMap::new();
        let mut hosts: HashMap<String, u64> = HashMap::new();
        for entry in entries {
            *endpoints.entry(entry.path.clone()).or_default() += 1;
            *hosts.entry(entry.target.clone()).or_default() += 1;
        }

        Self {
            rpm: round2(rpm),
            rps: round2(rps),
            p99: round2(p99),
            p95: round2(p95),
            endpoints,
            hosts,
        }
    }
}

/// Index of the p-th percentile in an ascending sample of `count` values:
/// `floor(count * p) - 1`, clamped to 0 so small samples never under-index.
fn percentile_index(count: usize, p: f64) -> usize {
    ((count as f64 * p).floor() as usize).saturating_sub(1)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
