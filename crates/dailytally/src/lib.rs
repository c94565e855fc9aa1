//! Top-level facade crate for dailytally.
//!
//! Re-exports the core data model and the gateway library so users can depend on a single crate.

pub mod core {
    pub use dailytally_core::*;
}

pub mod gateway {
    pub use dailytally_gateway::*;
}

pub use dailytally_core::{CounterStore, DailyUserTracker, Exporter};
pub use dailytally_gateway::{config::MetricsConfig, MetricsState};
