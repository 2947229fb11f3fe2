//! Health probing.
//!
//! # Responsibilities
//! - Probe a backend's status endpoint with a bounded deadline
//! - Fold the outcome into the backend's health flag
//!
//! # Design Decisions
//! - A probe never raises to the caller; failures only flip the flag
//! - Only an exact 200 counts as healthy
//! - No retries, no alerting, no hysteresis

use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode, Uri};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use tokio::time;

use crate::config::HealthCheckConfig;
use crate::error::GatewayError;
use crate::observability::metrics;
use crate::registry::BackendServer;

/// Issues health probes against registered backends.
pub struct HealthChecker {
    client: Client<HttpConnector, Body>,
    config: HealthCheckConfig,
}

impl HealthChecker {
    pub fn new(config: HealthCheckConfig) -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        Self { client, config }
    }

    /// Probe one backend and update its health flag.
    ///
    /// Any non-200 status or transport failure marks the backend unhealthy
    /// and logs a diagnostic; the error is absorbed here.
    pub async fn check(&self, server: &BackendServer) {
        let healthy = match self.probe(server).await {
            Ok(StatusCode::OK) => true,
            Ok(status) => {
                tracing::warn!(
                    backend = %server.name,
                    status = %status,
                    "Health probe returned non-OK status"
                );
                false
            }
            Err(e) => {
                tracing::warn!(backend = %server.name, error = %e, "Health probe failed");
                false
            }
        };

        server.set_healthy(healthy);
        metrics::record_backend_health(&server.name, healthy);
    }

    async fn probe(&self, server: &BackendServer) -> Result<StatusCode, GatewayError> {
        let uri: Uri = format!("{}{}", server.url, self.config.path)
            .parse()
            .map_err(|e| GatewayError::Probe(format!("invalid probe target: {e}")))?;

        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .header(header::USER_AGENT, "api-gateway-health-check")
            .body(Body::empty())
            .map_err(|e| GatewayError::Probe(e.to_string()))?;

        let deadline = Duration::from_secs(self.config.timeout_secs);
        let response = time::timeout(deadline, self.client.request(request))
            .await
            .map_err(|_| {
                GatewayError::Probe(format!("timed out after {}s", deadline.as_secs()))
            })?
            .map_err(|e| GatewayError::Probe(e.to_string()))?;

        Ok(response.status())
    }
}
