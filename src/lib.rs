//! # Snowdash
//!
//! A single-page snowboarding statistics dashboard served over HTTP.
//!
//! ## Features
//!
//! - **Font bootstrap**: Downloads a Korean-capable font once and registers it
//! - **Three charts**: Accident trend, resort map and country ranking as SVG
//! - **Tabbed page**: One HTML page with the charts and a resort table
//! - **Compute once**: Datasets are built once and shared by every request
//!
//! ## Modules
//!
//! - [`data`]: The dashboard datasets and their cache
//! - [`font`]: Font download and registration
//! - [`charts`]: Chart drawing
//! - [`page`]: Page layout and templates
//! - [`api`]: HTTP server with Axum
//! - [`config`]: File and environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use snowdash::data::DatasetCache;
//! use snowdash::font::FontHandle;
//! use snowdash::page::DashboardRenderer;
//!
//! let renderer = DashboardRenderer::new(&FontHandle::system_default(), "");
//! let datasets = DatasetCache::builtin();
//! let html = renderer.render(&datasets.get()).unwrap();
//! println!("{} bytes", html.len());
//! ```

pub mod api;
pub mod charts;
pub mod config;
pub mod data;
pub mod font;
pub mod page;

// Re-export top-level types for convenience
pub use api::{build_router, serve, ApiError, AppState};

pub use charts::{ChartKind, ChartTheme, RenderError};

pub use config::{Config, ConfigError, FontConfig, FontFallback, LoggingConfig, ServerConfig};

pub use data::{CountryScore, DatasetCache, Datasets, ResortPoint, TrendRow};

pub use font::{FontBootstrapper, FontError, FontHandle};

pub use page::DashboardRenderer;
