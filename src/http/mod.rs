//! HTTP front door subsystem.
//!
//! # Data Flow
//! ```text
//! inbound connection
//!     → server.rs (Axum setup, middleware, gateway context)
//!     → /api/servers, /api/stats/{period}  (handlers.rs, answered locally)
//!     → everything else                     (handlers.rs, proxy fallback)
//!         → balancer → proxy engine → backend
//! ```

pub mod handlers;
pub mod request_id;
pub mod server;

pub use request_id::MakeRequestUuid;
pub use server::{GatewayContext, GatewayServer};
