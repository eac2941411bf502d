//! Dashboard Routes
//!
//! - GET / - The tabbed dashboard page
//! - GET /charts/:name - One chart as SVG (trend, map, ranking)

use axum::{
    extract::{Path, State},
    http::header,
    response::{Html, IntoResponse},
};
use std::sync::Arc;

use crate::api::error::{ApiResult, PageError};
use crate::api::state::AppState;
use crate::charts::ChartKind;

/// GET /
///
/// One full render pass per page load. Datasets come from the cache.
pub async fn dashboard(State(state): State<Arc<AppState>>) -> Result<Html<String>, PageError> {
    let datasets = state.datasets.get();
    let html = state.renderer.render(&datasets)?;
    Ok(Html(html))
}

/// GET /charts/:name
///
/// A single chart, drawn with the same theme as the page.
pub async fn chart(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let kind: ChartKind = name.parse()?;
    let datasets = state.datasets.get();
    let svg = state.renderer.render_chart(kind, &datasets)?;

    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg))
}
