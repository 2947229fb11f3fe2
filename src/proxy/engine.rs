//! Proxy forwarding engine.
//!
//! # Responsibilities
//! - Forward an inbound request to the selected backend over a fresh
//!   connection (no pooling/reuse)
//! - Measure wall-clock latency from just before the outbound call to just
//!   after the response body is fully read
//! - Feed a log entry to the stats aggregator for every attempt and advance
//!   the backend counter per the configured policy
//! - Absorb any transport failure into a synthesized 500

use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime};

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderMap, HeaderName, HeaderValue, Method, Request, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use tokio::time;

use crate::config::{CountPolicy, ProxyConfig};
use crate::error::GatewayError;
use crate::observability::metrics;
use crate::proxy::path;
use crate::registry::BackendServer;
use crate::stats::{RequestLog, RequestLogEntry};

/// A fully read upstream response.
struct UpstreamResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: String,
}

/// Forwards proxied traffic and records the outcome of every attempt.
pub struct ProxyEngine {
    client: Client<HttpConnector, Body>,
    timeout: Option<Duration>,
    count_policy: CountPolicy,
    log: Arc<RequestLog>,
}

impl ProxyEngine {
    pub fn new(config: &ProxyConfig, count_policy: CountPolicy, log: Arc<RequestLog>) -> Self {
        // Zero idle connections per host forces a fresh connection for
        // every forwarded request.
        let client = Client::builder(TokioExecutor::new())
            .pool_max_idle_per_host(0)
            .build(HttpConnector::new());

        Self {
            client,
            timeout: config.timeout_secs.map(Duration::from_secs),
            count_policy,
            log,
        }
    }

    /// Forward one request to `server`, producing the client-facing
    /// response and the bookkeeping that goes with it.
    pub async fn handle(
        &self,
        server: Arc<BackendServer>,
        method: Method,
        inbound_path: &str,
        headers: HeaderMap,
        body: Bytes,
    ) -> Response {
        let target = path::target_url(&server.url, inbound_path);
        let method_text = method.to_string();

        let start = Instant::now();
        let outcome = self.send(method, &target, &headers, body).await;
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        match outcome {
            Ok(upstream) => {
                let status = upstream.status;
                tracing::debug!(
                    backend = %server.name,
                    target = %target,
                    status = %status,
                    elapsed_ms,
                    "Request forwarded"
                );

                self.log.record(RequestLogEntry {
                    timestamp: SystemTime::now(),
                    method: method_text.clone(),
                    path: inbound_path.to_string(),
                    target: server.name.clone(),
                    status: status.as_u16(),
                    response_time_ms: elapsed_ms,
                    error: None,
                });
                server.record_completed();
                metrics::record_request(&method_text, status.as_u16(), &server.name, start);

                wrap_response(upstream)
            }
            Err(err) => {
                tracing::error!(
                    backend = %server.name,
                    target = %target,
                    error = %err,
                    elapsed_ms,
                    "Upstream request failed"
                );

                self.log.record(RequestLogEntry {
                    timestamp: SystemTime::now(),
                    method: method_text.clone(),
                    path: inbound_path.to_string(),
                    target: server.name.clone(),
                    status: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                    response_time_ms: elapsed_ms,
                    error: Some(err.to_string()),
                });
                if self.count_policy == CountPolicy::OnAttempt {
                    server.record_completed();
                }
                metrics::record_request(&method_text, 500, &server.name, start);

                err.into_response()
            }
        }
    }

    /// Issue the outbound call and read the full response body.
    ///
    /// The deadline spans the entire exchange, send through final body
    /// byte; a backend that returns headers and then stalls the body is
    /// still a transport failure.
    async fn send(
        &self,
        method: Method,
        target: &str,
        headers: &HeaderMap,
        body: Bytes,
    ) -> Result<UpstreamResponse, GatewayError> {
        let uri: Uri = target
            .parse()
            .map_err(|e| GatewayError::Transport(format!("invalid target {target}: {e}")))?;

        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(outbound) = builder.headers_mut() {
            for (name, value) in headers.iter() {
                // The connector derives Host from the target URI.
                if name != header::HOST {
                    outbound.append(name.clone(), value.clone());
                }
            }
        }
        let request = builder
            .body(Body::from(body))
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let exchange = self.exchange(request);
        match self.timeout {
            Some(limit) => time::timeout(limit, exchange).await.map_err(|_| {
                GatewayError::Transport(format!(
                    "upstream request exceeded {}s deadline",
                    limit.as_secs()
                ))
            })?,
            None => exchange.await,
        }
    }

    /// Send the request and read the response to completion.
    async fn exchange(&self, request: Request<Body>) -> Result<UpstreamResponse, GatewayError> {
        let response = self
            .client
            .request(request)
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let (parts, body) = response.into_parts();
        let bytes = axum::body::to_bytes(Body::new(body), usize::MAX)
            .await
            .map_err(|e| GatewayError::Transport(format!("failed to read upstream body: {e}")))?;
        let body = String::from_utf8(bytes.to_vec()).map_err(|e| {
            GatewayError::Transport(format!("upstream body is not valid UTF-8: {e}"))
        })?;

        Ok(UpstreamResponse {
            status: parts.status,
            headers: parts.headers,
            body,
        })
    }
}

/// Connection-level and framing headers stay with each hop; the serving
/// stack computes framing from the re-encoded body.
fn is_hop_header(name: &HeaderName) -> bool {
    matches!(
        name.as_str(),
        "connection"
            | "keep-alive"
            | "proxy-authenticate"
            | "proxy-authorization"
            | "te"
            | "trailer"
            | "transfer-encoding"
            | "upgrade"
            | "content-length"
    )
}

/// Re-encode the upstream body as a JSON string value and copy the
/// remaining upstream headers over the response, last writer winning.
fn wrap_response(upstream: UpstreamResponse) -> Response {
    let wrapped = serde_json::Value::String(upstream.body).to_string();

    let mut builder = Response::builder().status(upstream.status);
    if let Some(headers) = builder.headers_mut() {
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        for (name, value) in upstream.headers.iter() {
            if !is_hop_header(name) {
                headers.insert(name.clone(), value.clone());
            }
        }
    }

    match builder.body(Body::from(wrapped)) {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(error = %e, "Failed to assemble proxied response");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
