//! Dashboard HTTP Server
//!
//! HTTP layer for the snowboard dashboard, built with Axum.
//!
//! # Endpoints
//!
//! ## Dashboard
//! - `GET /` - The tabbed dashboard page
//! - `GET /charts/:name` - One chart as SVG (`trend`, `map`, `ranking`)
//! - `GET /assets/font` - The registered font file
//!
//! ## Data
//! - `GET /api/v1/datasets` - The dashboard tables as JSON
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use snowdash::api::{serve, AppState};
//! use snowdash::config::ServerConfig;
//! use snowdash::data::DatasetCache;
//! use snowdash::font::FontHandle;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::default();
//!     let state = AppState::new(DatasetCache::builtin(), FontHandle::system_default(), config.clone());
//!     serve(state, &config).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult, PageError};
pub use state::{AppState, FONT_ROUTE};

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new().route("/datasets", get(routes::datasets::list_datasets));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(routes::dashboard::dashboard))
        .route("/charts/:name", get(routes::dashboard::chart))
        .route(FONT_ROUTE, get(routes::assets::font))
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(shared_state)
}

/// Start the dashboard server
pub async fn serve(state: AppState, config: &ServerConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Dashboard listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Dashboard shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DatasetCache;
    use crate::font::FontHandle;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use tower::util::ServiceExt;

    const FAKE_TTF: &[u8] = &[0x00, 0x01, 0x00, 0x00, 0x00, 0x0a, 0x00, 0x80];

    fn system_app() -> Router {
        let cache = DatasetCache::builtin();
        cache.get();
        build_router(AppState::new(
            cache,
            FontHandle::system_default(),
            ServerConfig::default(),
        ))
    }

    fn embedded_app() -> Router {
        let font = FontHandle::from_bytes("NanumGothic", "NanumGothic.ttf", FAKE_TTF.to_vec())
            .unwrap();
        let cache = DatasetCache::builtin();
        cache.get();
        build_router(AppState::new(cache, font, ServerConfig::default()))
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec();

        (status, content_type, body)
    }

    #[tokio::test]
    async fn test_health_live() {
        let (status, _, _) = get(system_app(), "/health/live").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready_once_datasets_loaded() {
        let (status, _, _) = get(system_app(), "/health/ready").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready_before_warmup() {
        let app = build_router(AppState::new(
            DatasetCache::builtin(),
            FontHandle::system_default(),
            ServerConfig::default(),
        ));

        let (status, _, _) = get(app, "/health/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_full_health_reports_font() {
        let (status, _, body) = get(system_app(), "/health").await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "degraded");
        assert_eq!(json["font_embedded"], false);
        assert_eq!(json["datasets_loaded"], true);

        let (_, _, body) = get(embedded_app(), "/health").await;
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["font_family"], "NanumGothic");
    }

    #[tokio::test]
    async fn test_dashboard_page() {
        let (status, content_type, body) = get(system_app(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(content_type.unwrap().starts_with("text/html"));

        let html = String::from_utf8(body).unwrap();
        assert!(html.contains("스노보드 대시보드"));
        assert_eq!(html.matches("<figure class=\"chart\"><svg").count(), 3);
    }

    #[tokio::test]
    async fn test_dashboard_links_embedded_font() {
        let (_, _, body) = get(embedded_app(), "/").await;
        let html = String::from_utf8(body).unwrap();
        assert!(html.contains("@font-face"));
        assert!(html.contains(FONT_ROUTE));
    }

    #[tokio::test]
    async fn test_chart_svg() {
        for name in ["trend", "map", "ranking", "ranking.svg"] {
            let (status, content_type, body) = get(system_app(), &format!("/charts/{name}")).await;
            assert_eq!(status, StatusCode::OK, "{name}");
            assert_eq!(content_type.as_deref(), Some("image/svg+xml"));
            assert!(String::from_utf8(body).unwrap().contains("<svg"));
        }
    }

    #[tokio::test]
    async fn test_unknown_chart_is_not_found() {
        let (status, _, body) = get(system_app(), "/charts/pie").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "UNKNOWN_CHART");
        assert!(json["request_id"].is_string());
    }

    #[tokio::test]
    async fn test_font_asset() {
        let (status, _, _) = get(system_app(), "/assets/font").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, content_type, body) = get(embedded_app(), "/assets/font").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("font/ttf"));
        assert_eq!(body, FAKE_TTF);
    }

    #[tokio::test]
    async fn test_datasets_json() {
        let (status, _, body) = get(system_app(), "/api/v1/datasets").await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["marker_scale"], 500);
        assert_eq!(json["trend"].as_array().unwrap().len(), 5);
        assert_eq!(json["resorts"].as_array().unwrap().len(), 6);

        let ranking = json["ranking"].as_array().unwrap();
        assert_eq!(ranking.first().unwrap()["country"], "한국");
        assert_eq!(ranking.last().unwrap()["country"], "미국");
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (status, _, _) = get(system_app(), "/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
