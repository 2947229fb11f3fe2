//! Proxy forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! proxied request (front door fallback)
//!     → balancer selects a backend
//!     → path.rs (outbound path transform)
//!     → engine.rs (fresh connection, header/body relay, latency clock)
//!     → stats log entry + counter update
//!     → response relayed (body re-encoded as a JSON string)
//! ```
//!
//! # Design Decisions
//! - No retries: a transport failure surfaces as one synthesized 500
//! - The forwarding deadline is configurable; health probes keep their own
//! - The engine owns all per-request bookkeeping so handlers stay thin

pub mod engine;
pub mod path;

pub use engine::ProxyEngine;
pub use path::{target_url, transform_path};
