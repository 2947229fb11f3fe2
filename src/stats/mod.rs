//! Stats aggregation subsystem.
//!
//! # Data Flow
//! ```text
//! proxy engine completes a request
//!     → log.rs (serialized append, FIFO eviction at capacity)
//!
//! GET /api/stats/{period}
//!     → log.rs (copy entries within the window under the lock)
//!     → snapshot.rs (rates, percentiles, per-path/per-backend counts)
//!     → StatsSnapshot (derived, never persisted)
//! ```
//!
//! # Design Decisions
//! - One mutex serializes appends so completion-order FIFO holds under
//!   concurrent writers
//! - Aggregation works on copies; the lock is never held across sorting
//!   or while any network I/O is in flight

pub mod log;
pub mod snapshot;

pub use log::{RequestLog, RequestLogEntry};
pub use snapshot::StatsSnapshot;
