//! Per-region aggregate.

/// Number of countries and summed population of one region.
///
/// A region without countries reports `0` for both values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionStats {
    pub name: String,
    pub number_countries: i64,
    pub total_population: i64,
}

impl RegionStats {
    pub fn new(name: impl Into<String>, number_countries: i64, total_population: i64) -> Self {
        Self {
            name: name.into(),
            number_countries,
            total_population,
        }
    }
}
