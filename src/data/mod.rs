//! Dashboard Datasets
//!
//! - **types**: `TrendRow`, `ResortPoint`, `CountryScore`, `Datasets`
//! - **builtin**: the hardcoded statistics and the `DatasetSource` trait
//! - **cache**: `DatasetCache`, the compute-once wrapper shared by handlers

mod builtin;
mod cache;
mod types;

pub use builtin::{BuiltinDatasets, DatasetSource};
pub use cache::DatasetCache;
pub use types::{
    max_marker_size, sort_by_score, CountryScore, Datasets, ResortPoint, TrendRow, MARKER_SCALE,
};
