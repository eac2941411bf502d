//! Asset Routes
//!
//! - GET /assets/font - The registered font file, for `@font-face`

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
};
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;

/// GET /assets/font
///
/// 404 when running on the system default font.
pub async fn font(State(state): State<Arc<AppState>>) -> ApiResult<impl IntoResponse> {
    let bytes = state
        .font
        .bytes()
        .ok_or_else(|| ApiError::NotFound("No font file is registered".to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, "font/ttf"),
            (header::CACHE_CONTROL, "public, max-age=86400"),
        ],
        bytes.to_vec(),
    ))
}
