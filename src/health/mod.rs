//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! monitor.rs (periodic timer, optional)
//!     → checker.rs (GET {url}{path} with a 5s deadline)
//!     → registry health flag + gateway_backend_health gauge
//! ```
//!
//! # Design Decisions
//! - Health state is a single boolean per backend; no flapping hysteresis
//! - Probe failures never propagate: the flag is the whole outcome
//! - The balancer reads the flag only in its opt-in filtering mode

pub mod checker;
pub mod monitor;

pub use checker::HealthChecker;
pub use monitor::HealthMonitor;
