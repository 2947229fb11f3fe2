//! Backend server record.
//!
//! # Responsibilities
//! - Represent a single registered backend
//! - Track health state (written only by the health checker)
//! - Track the completed-request counter (written only by the proxy engine)

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// A single registered backend.
///
/// Mutable state lives in atomics so concurrent requests never hold a lock
/// around a backend record. Two simultaneous least-loaded picks may observe
/// the same counter value and choose the same backend; that is acceptable
/// statistical balancing, not a mutual-exclusion guarantee.
#[derive(Debug)]
pub struct BackendServer {
    /// Unique backend identifier.
    pub name: String,

    /// Base URL, stored verbatim as configured.
    pub url: String,

    /// Health flag; starts optimistic.
    healthy: AtomicBool,

    /// Cumulative count of completed proxied requests.
    completed_requests: AtomicU64,
}

impl BackendServer {
    /// Create a new backend record, initially healthy with a zero counter.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            healthy: AtomicBool::new(true),
            completed_requests: AtomicU64::new(0),
        }
    }

    /// Current health flag.
    pub fn is_healthy(&self) -> bool {
        self.healthy.load(Ordering::Relaxed)
    }

    /// Overwrite the health flag. Called only by the health checker.
    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::Relaxed);
    }

    /// Current completed-request count.
    pub fn completed(&self) -> u64 {
        self.completed_requests.load(Ordering::Relaxed)
    }

    /// Advance the completed-request counter. Called only by the proxy
    /// engine, per its counter policy.
    pub fn record_completed(&self) {
        self.completed_requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Snapshot of the externally visible fields.
    pub fn info(&self) -> ServerInfo {
        ServerInfo {
            name: self.name.clone(),
            url: self.url.clone(),
            healthy: self.is_healthy(),
        }
    }
}

/// Wire representation of a backend for `GET /api/servers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerInfo {
    pub name: String,
    pub url: String,
    pub healthy: bool,
}
