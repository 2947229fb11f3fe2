//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router: control endpoints plus the proxy fallback
//! - Wire up middleware (request ID, tracing)
//! - Assemble the process-wide gateway context
//! - Serve with graceful shutdown and spawn the health monitor

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::balancer::{Balancer, LeastLoaded};
use crate::config::GatewayConfig;
use crate::health::HealthMonitor;
use crate::http::handlers;
use crate::http::request_id::MakeRequestUuid;
use crate::proxy::ProxyEngine;
use crate::registry::ServerRegistry;
use crate::stats::RequestLog;

/// Process-wide gateway state, created once at startup and passed to every
/// handler through Axum state.
#[derive(Clone)]
pub struct GatewayContext {
    pub registry: Arc<ServerRegistry>,
    pub balancer: Arc<dyn Balancer>,
    pub engine: Arc<ProxyEngine>,
    pub stats: Arc<RequestLog>,
}

/// HTTP front door for the gateway.
pub struct GatewayServer {
    router: Router,
    config: GatewayConfig,
    context: GatewayContext,
}

impl GatewayServer {
    /// Wire all subsystems from a validated configuration.
    pub fn new(config: GatewayConfig) -> Self {
        let registry = Arc::new(ServerRegistry::from_config(&config.backends));
        let stats = Arc::new(RequestLog::new(config.stats.log_capacity));
        let balancer: Arc<dyn Balancer> =
            Arc::new(LeastLoaded::new(config.balancer.filter_unhealthy));
        let engine = Arc::new(ProxyEngine::new(
            &config.proxy,
            config.balancer.count_policy,
            stats.clone(),
        ));

        let context = GatewayContext {
            registry,
            balancer,
            engine,
            stats,
        };

        let router = Self::build_router(context.clone());
        Self {
            router,
            config,
            context,
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(context: GatewayContext) -> Router {
        Router::new()
            .route("/api/servers", get(handlers::list_servers))
            .route("/api/stats/{period}", get(handlers::stats_for_period))
            .fallback(handlers::proxy_handler)
            .with_state(context)
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener until
    /// the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            backends = self.context.registry.len(),
            "HTTP server starting"
        );

        if self.config.health_check.enabled {
            let monitor = HealthMonitor::new(
                self.context.registry.clone(),
                self.config.health_check.clone(),
            );
            let monitor_shutdown = shutdown.resubscribe();
            tokio::spawn(async move {
                monitor.run(monitor_shutdown).await;
            });
        }

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Shared gateway state, also handy for inspection in tests.
    pub fn context(&self) -> &GatewayContext {
        &self.context
    }
}
