//! DTOs for the per-region statistics endpoint.

use serde::Serialize;

use crate::domain::entities::RegionStats;

/// `GET /countries/stats` response.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub regions: Vec<RegionStatsItem>,
}

#[derive(Debug, Serialize)]
pub struct RegionStatsItem {
    pub name: String,
    pub number_countries: i64,
    pub total_population: i64,
}

impl From<RegionStats> for RegionStatsItem {
    fn from(stats: RegionStats) -> Self {
        Self {
            name: stats.name,
            number_countries: stats.number_countries,
            total_population: stats.total_population,
        }
    }
}

impl From<Vec<RegionStats>> for StatsResponse {
    fn from(stats: Vec<RegionStats>) -> Self {
        Self {
            regions: stats.into_iter().map(Into::into).collect(),
        }
    }
}
