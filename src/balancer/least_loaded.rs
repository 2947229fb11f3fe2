//! Least-loaded balancing strategy.

use std::sync::Arc;

use crate::balancer::Balancer;
use crate::error::GatewayError;
use crate::registry::BackendServer;

/// Least-loaded selector.
///
/// Selects the backend with the minimum completed-request counter. In case
/// of a tie the first-registered backend wins (`min_by_key` keeps the first
/// minimum).
#[derive(Debug, Default)]
pub struct LeastLoaded {
    /// When set, backends currently marked unhealthy are not candidates.
    filter_unhealthy: bool,
}

impl LeastLoaded {
    pub fn new(filter_unhealthy: bool) -> Self {
        Self { filter_unhealthy }
    }
}

impl Balancer for LeastLoaded {
    fn select(&self, servers: &[Arc<BackendServer>]) -> Result<Arc<BackendServer>, GatewayError> {
        servers
            .iter()
            .filter(|s| !self.filter_unhealthy || s.is_healthy())
            .min_by_key(|s| s.completed())
            .cloned()
            .ok_or(GatewayError::NoServersAvailable)
    }
}
