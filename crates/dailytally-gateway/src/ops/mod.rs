//! Operational HTTP endpoints.
//!
//! - `/healthz`               : liveness
//! - `/metrics`               : Prometheus text format (GET/HEAD only)
//! - `/admin/<token>/metrics` : same body, gated on the configured token

use axum::{
    extract::State,
    http::{header, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};

use dailytally_core::PROMETHEUS_CONTENT_TYPE;

use crate::app_state::MetricsState;

fn is_read(method: &Method) -> bool {
    method == Method::GET || method == Method::HEAD
}

fn exposition(state: &MetricsState) -> Response {
    let body = state.render();
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)],
        body,
    )
        .into_response()
}

fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "GET, HEAD")],
        "method not allowed",
    )
        .into_response()
}

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn metrics(method: Method, State(state): State<MetricsState>) -> Response {
    if !is_read(&method) {
        return method_not_allowed();
    }
    exposition(&state)
}

/// Disabled admin, wrong token and wrong suffix all look the same: 404.
pub async fn admin_metrics(
    method: Method,
    uri: Uri,
    State(state): State<MetricsState>,
) -> Response {
    if !state.admin_path_matches(uri.path()) {
        return StatusCode::NOT_FOUND.into_response();
    }
    if !is_read(&method) {
        return method_not_allowed();
    }
    exposition(&state)
}
