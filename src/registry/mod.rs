//! Server registry subsystem.
//!
//! # Data Flow
//! ```text
//! config backends (declaration order)
//!     → ServerRegistry::from_config (static registration set)
//!     → balancer reads counters for selection
//!     → health checker writes the health flag
//!     → proxy engine writes the completed-request counter
//!     → GET /api/servers serves list() snapshots
//! ```
//!
//! # Design Decisions
//! - The registry is immutable after startup: backends are never added or
//!   removed at runtime
//! - Registration order is significant; the balancer breaks ties on it
//! - Per-backend state is atomic, so readers never block writers

pub mod server;

use std::sync::Arc;

use crate::config::BackendConfig;

pub use server::{BackendServer, ServerInfo};

/// The fixed set of registered backends.
#[derive(Debug, Default)]
pub struct ServerRegistry {
    servers: Vec<Arc<BackendServer>>,
}

impl ServerRegistry {
    /// Build the registry from configuration, preserving declaration order.
    pub fn from_config(backends: &[BackendConfig]) -> Self {
        let servers = backends
            .iter()
            .map(|b| Arc::new(BackendServer::new(&b.name, &b.url)))
            .collect();
        Self { servers }
    }

    /// All backends in registration order.
    pub fn servers(&self) -> &[Arc<BackendServer>] {
        &self.servers
    }

    /// Look up a backend by identifier.
    pub fn get(&self, name: &str) -> Option<Arc<BackendServer>> {
        self.servers.iter().find(|s| s.name == name).cloned()
    }

    /// Snapshot of every backend for the control API. No side effects.
    pub fn list(&self) -> Vec<ServerInfo> {
        self.servers.iter().map(|s| s.info()).collect()
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }
}
