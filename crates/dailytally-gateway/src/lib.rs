//! dailytally gateway library entry.
//!
//! Wires configuration, the shared metrics state, the retention janitor and
//! the HTTP adapters. Consumed by the binary (`main.rs`) and by integration
//! tests.

pub mod app_state;
pub mod config;
pub mod janitor;
pub mod ops;
pub mod router;

pub use app_state::MetricsState;
