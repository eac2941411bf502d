//! Health Routes
//!
//! - GET /health/live - Process is up
//! - GET /health/ready - Datasets are loaded and pages can be rendered
//! - GET /health - Font and dataset status, uptime and version

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Startup warms the dataset cache, so this only fails on a state
/// that was built without warming it.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    if state.datasets.is_loaded() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /health
///
/// Serving on the system fallback font reports `degraded`: the page
/// works, but Korean labels depend on the browser's fonts.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let font_embedded = state.font.is_embedded();
    let datasets_loaded = state.datasets.is_loaded();

    Json(HealthResponse {
        status: overall_status(font_embedded, datasets_loaded).to_string(),
        font_family: state.font.family().to_string(),
        font_embedded,
        datasets_loaded,
        uptime_seconds: state.uptime_seconds(),
        started_at: state.started_at,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

fn overall_status(font_embedded: bool, datasets_loaded: bool) -> &'static str {
    match (font_embedded, datasets_loaded) {
        (true, true) => "healthy",
        (false, true) => "degraded",
        (_, false) => "starting",
    }
}
