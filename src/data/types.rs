//! Core data types for the dashboard datasets
//!
//! - `TrendRow`: yearly injury and fatality counts
//! - `ResortPoint`: a ski resort on the world map
//! - `CountryScore`: a country's ranking score
//! - `Datasets`: the three tables rendered by the dashboard

use serde::{Deserialize, Serialize};

/// Scale applied to a resort's user count to get its map marker size
pub const MARKER_SCALE: u64 = 500;

/// Accident counts for one year
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrendRow {
    pub year: i32,
    pub injuries: u32,
    pub fatalities: u32,
}

impl TrendRow {
    pub fn new(year: i32, injuries: u32, fatalities: u32) -> Self {
        Self {
            year,
            injuries,
            fatalities,
        }
    }
}

/// A ski resort plotted on the map
///
/// `marker_size` is derived from `user_count` and never set directly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResortPoint {
    /// Display name (includes the country in parentheses)
    pub name: String,
    /// Latitude in degrees, [-90, 90]
    pub latitude: f64,
    /// Longitude in degrees, [-180, 180]
    pub longitude: f64,
    /// Number of users, in thousands
    pub user_count: u32,
    /// Popularity rank, unique within a dataset, starting at 1
    pub rank: u32,
    /// Marker area weight: `user_count * MARKER_SCALE`
    pub marker_size: u64,
}

impl ResortPoint {
    pub fn new(
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
        user_count: u32,
        rank: u32,
    ) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
            user_count,
            rank,
            marker_size: u64::from(user_count) * MARKER_SCALE,
        }
    }

    /// Whether the coordinate is a valid point on the globe
    pub fn has_valid_coordinates(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// A country's snowboarding ranking score
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CountryScore {
    pub country: String,
    pub score: f64,
}

impl CountryScore {
    pub fn new(country: impl Into<String>, score: f64) -> Self {
        Self {
            country: country.into(),
            score,
        }
    }
}

/// Sort scores ascending. Ties keep their input order.
pub fn sort_by_score(scores: &mut [CountryScore]) {
    scores.sort_by(|a, b| a.score.total_cmp(&b.score));
}

/// The three immutable tables behind the dashboard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Datasets {
    /// Yearly trend, ordered by year
    pub trend: Vec<TrendRow>,
    /// Resorts in source order (not rank order)
    pub resorts: Vec<ResortPoint>,
    /// Country scores, ascending
    pub ranking: Vec<CountryScore>,
}

impl Datasets {
    /// Build a dataset triple. The ranking is sorted ascending by score.
    pub fn new(
        trend: Vec<TrendRow>,
        resorts: Vec<ResortPoint>,
        mut ranking: Vec<CountryScore>,
    ) -> Self {
        sort_by_score(&mut ranking);
        Self {
            trend,
            resorts,
            ranking,
        }
    }
}

/// Largest marker size across resorts, 0 when there are none
pub fn max_marker_size(resorts: &[ResortPoint]) -> u64 {
    resorts.iter().map(|r| r.marker_size).max().unwrap_or(0)
}
