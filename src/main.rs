//! API Gateway
//!
//! A reverse-proxy gateway built with Tokio and Axum that spreads inbound
//! traffic across a fixed backend registry.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────┐
//!                     │                 API GATEWAY                   │
//!                     │                                               │
//!   Client Request    │  ┌─────────┐     ┌──────────┐    ┌─────────┐ │
//!   ──────────────────┼─▶│  http   │────▶│ balancer │───▶│  proxy  │─┼──▶ Backend
//!                     │  │ router  │     │least load│    │ engine  │ │
//!                     │  └────┬────┘     └──────────┘    └────┬────┘ │
//!                     │       │ /api/*                        │      │
//!                     │       ▼                               ▼      │
//!                     │  ┌─────────┐    ┌──────────┐    ┌─────────┐  │
//!                     │  │registry │    │  stats   │◀───│ request │  │
//!                     │  │snapshots│    │ windows  │    │   log   │  │
//!                     │  └─────────┘    └──────────┘    └─────────┘  │
//!                     │                                               │
//!                     │  ┌─────────────────────────────────────────┐  │
//!                     │  │  config · health · observability ·      │  │
//!                     │  │  lifecycle (startup/shutdown)           │  │
//!                     │  └─────────────────────────────────────────┘  │
//!                     └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_gateway::config::{load_config, GatewayConfig};
use api_gateway::http::GatewayServer;
use api_gateway::lifecycle::{signals, Shutdown};

#[derive(Parser)]
#[command(name = "api-gateway")]
#[command(about = "Reverse-proxy gateway with least-loaded balancing", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // An explicit config path that fails to load is fatal; no path means
    // the built-in registry.
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };

    // Initialize tracing subscriber
    let default_filter = format!(
        "api_gateway={},tower_http=warn",
        config.observability.log_level
    );
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("api-gateway v0.1.0 starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        backends = config.backends.len(),
        log_capacity = config.stats.log_capacity,
        health_checks = config.health_check.enabled,
        "Configuration loaded"
    );

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    // Metrics exporter
    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            api_gateway::observability::metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    // Shutdown coordination: OS signals fan out to the server loop and
    // the health monitor.
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        shutdown.trigger();
    });

    let server = GatewayServer::new(config);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
