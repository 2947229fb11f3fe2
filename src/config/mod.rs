//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → shared with all subsystems at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the backend registry is static
//! - All fields have defaults so a missing file yields a runnable gateway
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    BackendConfig, BalancerConfig, CountPolicy, GatewayConfig, HealthCheckConfig,
    ListenerConfig, ObservabilityConfig, ProxyConfig, RateLimitConfig, StatsConfig,
};
