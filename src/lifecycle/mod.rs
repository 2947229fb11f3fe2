//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main): config → validate → subsystems → listener
//!
//! Shutdown (shutdown.rs):
//!     signals.rs observes SIGTERM/SIGINT
//!     → broadcast to server loop + health monitor
//!     → stop accepting, drain, exit
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
