//! Data Transfer Objects
//!
//! Response types for the JSON endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::data::{CountryScore, Datasets, ResortPoint, TrendRow, MARKER_SCALE};

/// GET /api/v1/datasets response
#[derive(Debug, Serialize)]
pub struct DatasetsResponse {
    pub trend: Vec<TrendRow>,
    pub resorts: Vec<ResortPoint>,
    /// Ascending by score
    pub ranking: Vec<CountryScore>,
    /// Factor applied to `user_count` to get `marker_size`
    pub marker_scale: u64,
}

impl From<&Datasets> for DatasetsResponse {
    fn from(datasets: &Datasets) -> Self {
        Self {
            trend: datasets.trend.clone(),
            resorts: datasets.resorts.clone(),
            ranking: datasets.ranking.clone(),
            marker_scale: MARKER_SCALE,
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy, degraded, starting
    pub status: String,
    /// Family the charts are drawn with
    pub font_family: String,
    /// Whether the font file is served to browsers
    pub font_embedded: bool,
    /// Whether the dataset cache is populated
    pub datasets_loaded: bool,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    pub started_at: DateTime<Utc>,
    /// Application version
    pub version: String,
}
