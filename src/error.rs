//! Gateway error taxonomy.
//!
//! # Design Decisions
//! - Every failure class the gateway can surface over HTTP maps to exactly
//!   one variant, and `IntoResponse` owns the wire representation
//! - Transport failures are absorbed into a synthesized 500; there are no
//!   retries and no circuit breaking
//! - Probe failures never reach a client; they only flip the health flag

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Errors produced by the gateway's routing and forwarding path.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The registry held no eligible backend at selection time.
    #[error("no servers available")]
    NoServersAvailable,

    /// Connect/write/read failure (or deadline breach) while forwarding.
    #[error("upstream transport failure: {0}")]
    Transport(String),

    /// Unknown stats period in `/api/stats/{period}`.
    #[error("invalid stats period")]
    InvalidPeriod,

    /// Health probe failure; absorbed into the backend's health flag.
    #[error("health probe failed: {0}")]
    Probe(String),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            GatewayError::NoServersAvailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                json!({"error": "No servers available"}),
            ),
            GatewayError::Transport(details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"error": "Internal Server Error", "details": details}),
            ),
            GatewayError::InvalidPeriod => (
                StatusCode::BAD_REQUEST,
                json!({"error": "Invalid period. Use 1m, 5m, or 1h."}),
            ),
            // Probe failures are internal; if one ever leaks this far,
            // answer like any other upstream failure.
            GatewayError::Probe(details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"error": "Internal Server Error", "details": details}),
            ),
        };
        (status, Json(body)).into_response()
    }
}
