//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files, and
//! the defaults reproduce the fixed registry the gateway ships with.

use serde::{Deserialize, Serialize};

/// Root configuration for the API gateway.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Backend server definitions, in registration order. Defaults to the
    /// built-in three-server registry.
    #[serde(default = "default_backends")]
    pub backends: Vec<BackendConfig>,

    /// Health check settings.
    pub health_check: HealthCheckConfig,

    /// Load balancer policy settings.
    pub balancer: BalancerConfig,

    /// Proxy forwarding settings.
    pub proxy: ProxyConfig,

    /// Stats aggregator settings.
    pub stats: StatsConfig,

    /// Rate limiting configuration (declared, not enforced).
    pub rate_limit: RateLimitConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
        }
    }
}

/// Backend server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Unique backend identifier.
    pub name: String,

    /// Backend base URL (e.g., "http://127.0.0.1:5000").
    pub url: String,
}

/// Health check configuration.
///
/// The registry exposes the probe; whether it runs periodically is a
/// deployment decision, controlled by `enabled`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HealthCheckConfig {
    /// Enable the periodic health monitor.
    pub enabled: bool,

    /// Health check interval in seconds.
    pub interval_secs: u64,

    /// Health check timeout in seconds.
    pub timeout_secs: u64,

    /// Path to probe for HTTP health checks.
    pub path: String,
}

impl Default for HealthCheckConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 10,
            timeout_secs: 5,
            path: "/health".to_string(),
        }
    }
}

/// How the completed-request counter is advanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CountPolicy {
    /// Increment only when the upstream response was fully read.
    /// Skews least-loaded selection toward failing backends under
    /// partial failure, but matches the historical behavior.
    #[default]
    OnSuccess,

    /// Increment on every forwarding attempt, successful or not.
    OnAttempt,
}

/// Load balancer policy settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BalancerConfig {
    /// Restrict selection to backends currently marked healthy.
    /// Off by default: health is tracked but informational.
    pub filter_unhealthy: bool,

    /// Counter policy applied after each forwarding attempt.
    pub count_policy: CountPolicy,
}

/// Proxy forwarding settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Deadline for a single upstream call in seconds.
    /// `None` leaves the call unbounded.
    pub timeout_secs: Option<u64>,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            timeout_secs: Some(30),
        }
    }
}

/// Stats aggregator settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Maximum number of request log entries retained (FIFO eviction).
    pub log_capacity: usize,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            log_capacity: 10_000,
        }
    }
}

/// Rate limiting configuration.
///
/// Declared for operators but not enforced anywhere; kept as an inert
/// configuration value.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Maximum requests per second.
    pub max_requests_per_second: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests_per_second: 100,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Default registry: three local backends on consecutive ports.
pub fn default_backends() -> Vec<BackendConfig> {
    (1..=3)
        .map(|i| BackendConfig {
            name: format!("server-{i}"),
            url: format!("http://127.0.0.1:{}", 4999 + i),
        })
        .collect()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            backends: default_backends(),
            health_check: HealthCheckConfig::default(),
            balancer: BalancerConfig::default(),
            proxy: ProxyConfig::default(),
            stats: StatsConfig::default(),
            rate_limit: RateLimitConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}
