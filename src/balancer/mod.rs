//! Load balancing subsystem.
//!
//! # Data Flow
//! ```text
//! Proxied request arrives
//!     → registry provides backends in registration order
//!     → least_loaded.rs picks the minimum completed-request counter
//!     → proxy engine forwards to the selected backend
//! ```
//!
//! # Design Decisions
//! - The balancer is stateless; all load signal lives on backend records
//! - Ties resolve to the first-registered backend (stability)
//! - Health is tracked but not consulted by default; filtering unhealthy
//!   backends is an opt-in mode

pub mod least_loaded;

use std::sync::Arc;

use crate::error::GatewayError;
use crate::registry::BackendServer;

pub use least_loaded::LeastLoaded;

/// A backend selection strategy.
pub trait Balancer: Send + Sync {
    /// Pick a target from the given backends.
    fn select(&self, servers: &[Arc<BackendServer>]) -> Result<Arc<BackendServer>, GatewayError>;
}
