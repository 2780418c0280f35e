//! Shared state injected into every handler.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{CountryService, StatsService};
use crate::domain::repositories::{CountryRepository, RegionRepository};
use crate::infrastructure::persistence::{InMemoryStore, PgCountryRepository, PgRegionRepository};

pub type DynCountryService = CountryService<dyn CountryRepository, dyn RegionRepository>;
pub type DynStatsService = StatsService<dyn RegionRepository>;

/// Application state shared across handlers.
///
/// Cloning is cheap: services sit behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub country_service: Arc<DynCountryService>,
    pub stats_service: Arc<DynStatsService>,
}

impl AppState {
    pub fn new(
        countries: Arc<dyn CountryRepository>,
        regions: Arc<dyn RegionRepository>,
    ) -> Self {
        Self {
            country_service: Arc::new(CountryService::new(countries, regions.clone())),
            stats_service: Arc::new(StatsService::new(regions)),
        }
    }

    /// State backed by PostgreSQL repositories sharing one pool.
    pub fn postgres(pool: Arc<PgPool>) -> Self {
        Self::new(
            Arc::new(PgCountryRepository::new(pool.clone())),
            Arc::new(PgRegionRepository::new(pool)),
        )
    }

    /// State backed by an in-memory store.
    pub fn in_memory(store: Arc<InMemoryStore>) -> Self {
        Self::new(store.clone(), store)
    }
}
