//! Per-region statistics service.

use std::sync::Arc;

use crate::domain::entities::RegionStats;
use crate::domain::repositories::RegionRepository;
use crate::error::AppError;

/// Service computing country count and population per region.
pub struct StatsService<R: RegionRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: RegionRepository + ?Sized> StatsService<R> {
    /// Creates a new statistics service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Returns stats for every region ordered by name.
    ///
    /// Regions without countries are included with zero count and population.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn compute_stats(&self) -> Result<Vec<RegionStats>, AppError> {
        self.repository.list_stats().await
    }
}
