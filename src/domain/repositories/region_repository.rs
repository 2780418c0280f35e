//! Repository trait for regions.

use crate::domain::entities::{NewRegion, Region, RegionStats};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for regions.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgRegionRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryStore`] - in-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegionRepository: Send + Sync {
    /// Creates a new region.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if a region with the same name already exists.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_region: NewRegion) -> Result<Region, AppError>;

    /// Finds a region by its database ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Region>, AppError>;

    /// Finds a region by its exact, case-sensitive name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_name(&self, name: &str) -> Result<Option<Region>, AppError>;

    /// Computes country count and population sum for every region.
    ///
    /// Regions without countries are included with zero values. Results are
    /// ordered by region name, compared byte-wise.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_stats(&self) -> Result<Vec<RegionStats>, AppError>;
}
