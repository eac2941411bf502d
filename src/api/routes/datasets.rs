//! Dataset Routes
//!
//! - GET /api/v1/datasets - The three dashboard tables as JSON

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::DatasetsResponse;
use crate::api::state::AppState;

/// GET /api/v1/datasets
pub async fn list_datasets(State(state): State<Arc<AppState>>) -> Json<DatasetsResponse> {
    let datasets = state.datasets.get();
    Json(DatasetsResponse::from(datasets.as_ref()))
}
