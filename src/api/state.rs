//! Application State
//!
//! Shared state accessible by all handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Instant;

use crate::config::ServerConfig;
use crate::data::DatasetCache;
use crate::font::FontHandle;
use crate::page::DashboardRenderer;

/// Where the page loads the registered font from
pub const FONT_ROUTE: &str = "/assets/font";

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Compute-once dataset cache, built at startup
    pub datasets: Arc<DatasetCache>,
    /// The font registered by the bootstrapper
    pub font: Arc<FontHandle>,
    /// Page and chart renderer bound to that font
    pub renderer: Arc<DashboardRenderer>,
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(datasets: DatasetCache, font: FontHandle, config: ServerConfig) -> Self {
        let renderer = DashboardRenderer::new(&font, FONT_ROUTE);
        Self {
            datasets: Arc::new(datasets),
            font: Arc::new(font),
            renderer: Arc::new(renderer),
            config: Arc::new(config),
            start_time: Instant::now(),
            started_at: Utc::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
