//! dailytally core: in-memory counters, per-day unique users, retention
//! scheduling and Prometheus text rendering.
//!
//! This crate carries no transport or runtime dependencies. The gateway crate
//! owns the background janitor task and the HTTP adapters.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Bad names or identifiers are treated as no-ops, never as hard failures.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod counter;
pub mod daily;
pub mod error;
pub mod expo;
pub mod schedule;

pub use counter::CounterStore;
pub use daily::{today_utc, DailyUserTracker, RetentionTarget, DATE_FORMAT};
/// Shared result type.
pub use error::{MetricsError, Result};
pub use expo::{Exporter, PROMETHEUS_CONTENT_TYPE};
pub use schedule::{next_cleanup_time, Clock, SystemClock};
