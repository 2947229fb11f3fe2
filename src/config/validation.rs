//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parseable)
//! - Detect duplicate backend names
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before the config is accepted into the system
//! - An empty backend list is valid: routing then fails per-request with
//!   "No servers available" rather than at startup

use std::net::SocketAddr;

use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, PartialEq, Eq)]
pub enum ValidationError {
    InvalidBindAddress(String),
    InvalidMetricsAddress(String),
    InvalidBackendUrl { name: String, url: String },
    DuplicateBackendName(String),
    EmptyBackendName,
    ZeroLogCapacity,
    ZeroHealthInterval,
    ZeroHealthTimeout,
    ZeroProxyTimeout,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidBindAddress(addr) => {
                write!(f, "listener.bind_address is not a socket address: {addr}")
            }
            ValidationError::InvalidMetricsAddress(addr) => {
                write!(f, "observability.metrics_address is not a socket address: {addr}")
            }
            ValidationError::InvalidBackendUrl { name, url } => {
                write!(f, "backend {name} has an invalid http(s) url: {url}")
            }
            ValidationError::DuplicateBackendName(name) => {
                write!(f, "backend name registered more than once: {name}")
            }
            ValidationError::EmptyBackendName => write!(f, "backend name must not be empty"),
            ValidationError::ZeroLogCapacity => write!(f, "stats.log_capacity must be > 0"),
            ValidationError::ZeroHealthInterval => {
                write!(f, "health_check.interval_secs must be > 0")
            }
            ValidationError::ZeroHealthTimeout => {
                write!(f, "health_check.timeout_secs must be > 0")
            }
            ValidationError::ZeroProxyTimeout => {
                write!(f, "proxy.timeout_secs must be > 0 when set")
            }
        }
    }
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    let mut seen = std::collections::HashSet::new();
    for backend in &config.backends {
        if backend.name.is_empty() {
            errors.push(ValidationError::EmptyBackendName);
        } else if !seen.insert(backend.name.as_str()) {
            errors.push(ValidationError::DuplicateBackendName(backend.name.clone()));
        }

        let valid_url = Url::parse(&backend.url)
            .map(|u| matches!(u.scheme(), "http" | "https"))
            .unwrap_or(false);
        if !valid_url {
            errors.push(ValidationError::InvalidBackendUrl {
                name: backend.name.clone(),
                url: backend.url.clone(),
            });
        }
    }

    if config.stats.log_capacity == 0 {
        errors.push(ValidationError::ZeroLogCapacity);
    }
    if config.health_check.interval_secs == 0 {
        errors.push(ValidationError::ZeroHealthInterval);
    }
    if config.health_check.timeout_secs == 0 {
        errors.push(ValidationError::ZeroHealthTimeout);
    }
    if config.proxy.timeout_secs == Some(0) {
        errors.push(ValidationError::ZeroProxyTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
