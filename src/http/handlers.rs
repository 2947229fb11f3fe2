//! Control endpoints and the proxy fallback.

use std::time::Duration;

use axum::extract::{Path, Request, State};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::error::GatewayError;
use crate::http::server::GatewayContext;
use crate::registry::ServerInfo;
use crate::stats::StatsSnapshot;

/// `GET /api/servers`: snapshot of every registered backend.
pub async fn list_servers(State(context): State<GatewayContext>) -> Json<Vec<ServerInfo>> {
    Json(context.registry.list())
}

/// `GET /api/stats/{period}`: windowed statistics for 1m, 5m, or 1h.
pub async fn stats_for_period(
    State(context): State<GatewayContext>,
    Path(period): Path<String>,
) -> Result<Json<StatsSnapshot>, GatewayError> {
    let window = parse_period(&period)?;
    Ok(Json(context.stats.compute(window)))
}

/// Any other method/path: pick a backend and forward.
pub async fn proxy_handler(State(context): State<GatewayContext>, request: Request) -> Response {
    let path = request.uri().path().to_string();

    let server = match context.balancer.select(context.registry.servers()) {
        Ok(server) => server,
        Err(e) => {
            tracing::warn!(path = %path, "No backends available for proxying");
            return e.into_response();
        }
    };

    let (parts, body) = request.into_parts();
    let body = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            return GatewayError::Transport(format!("failed to read request body: {e}"))
                .into_response();
        }
    };

    context
        .engine
        .handle(server, parts.method, &path, parts.headers, body)
        .await
}

/// Map a period token to its window length.
fn parse_period(period: &str) -> Result<Duration, GatewayError> {
    let secs = match period {
        "1m" => 60,
        "5m" => 5 * 60,
        "1h" => 60 * 60,
        _ => return Err(GatewayError::InvalidPeriod),
    };
    Ok(Duration::from_secs(secs))
}
