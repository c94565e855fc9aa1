//! Axum router wiring.

use axum::{
    routing::{any, get},
    Router,
};

use crate::{app_state::MetricsState, ops};

pub fn build_router(state: MetricsState) -> Router {
    Router::new()
        .route("/healthz", get(ops::healthz))
        .route("/metrics", any(ops::metrics))
        .route("/admin/*rest", any(ops::admin_metrics))
        .with_state(state)
}
