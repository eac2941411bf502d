//! Built-in snowboarding statistics
//!
//! The dashboard ships with fixed tables; nothing is read from disk.

use super::types::{CountryScore, Datasets, ResortPoint, TrendRow};

/// Something that can produce the dashboard datasets
pub trait DatasetSource: Send + Sync {
    /// Build the datasets. Called at most once per `DatasetCache`.
    fn load(&self) -> Datasets;
}

/// The hardcoded tables shown on the dashboard
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinDatasets;

impl DatasetSource for BuiltinDatasets {
    fn load(&self) -> Datasets {
        let trend = vec![
            TrendRow::new(2019, 13_500, 42),
            TrendRow::new(2020, 8_900, 28),
            TrendRow::new(2021, 11_200, 35),
            TrendRow::new(2022, 14_500, 48),
            TrendRow::new(2023, 15_800, 52),
        ];

        let resorts = vec![
            ResortPoint::new("휘슬러(캐나다)", 50.1163, -122.9574, 250, 1),
            ResortPoint::new("발토랑스(프랑스)", 45.2982, 6.5802, 210, 2),
            ResortPoint::new("베일(미국)", 39.6391, -106.3742, 180, 3),
            ResortPoint::new("니세코(일본)", 42.8633, 140.7027, 120, 5),
            ResortPoint::new("체르마트(스위스)", 46.0207, 7.7491, 160, 4),
            ResortPoint::new("용평(한국)", 37.6443, 128.6807, 90, 6),
        ];

        let ranking = vec![
            CountryScore::new("미국", 95.0),
            CountryScore::new("캐나다", 88.0),
            CountryScore::new("스위스", 82.0),
            CountryScore::new("오스트리아", 75.0),
            CountryScore::new("일본", 70.0),
            CountryScore::new("프랑스", 65.0),
            CountryScore::new("한국", 50.0),
        ];

        Datasets::new(trend, resorts, ranking)
    }
}
