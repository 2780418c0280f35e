//! PostgreSQL implementation of region repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewRegion, Region, RegionStats};
use crate::domain::repositories::RegionRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct RegionRow {
    id: i64,
    name: String,
}

impl From<RegionRow> for Region {
    fn from(row: RegionRow) -> Self {
        Region::new(row.id, row.name)
    }
}

#[derive(sqlx::FromRow)]
struct RegionStatsRow {
    name: String,
    number_countries: i64,
    total_population: i64,
}

/// PostgreSQL repository for regions.
pub struct PgRegionRepository {
    pool: Arc<PgPool>,
}

impl PgRegionRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RegionRepository for PgRegionRepository {
    async fn create(&self, new_region: NewRegion) -> Result<Region, AppError> {
        let row = sqlx::query_as::<_, RegionRow>(
            r#"
            INSERT INTO regions (name)
            VALUES ($1)
            RETURNING id, name
            "#,
        )
        .bind(&new_region.name)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Region>, AppError> {
        let row = sqlx::query_as::<_, RegionRow>("SELECT id, name FROM regions WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Region::from))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Region>, AppError> {
        let row = sqlx::query_as::<_, RegionRow>("SELECT id, name FROM regions WHERE name = $1")
            .bind(name)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Region::from))
    }

    async fn list_stats(&self) -> Result<Vec<RegionStats>, AppError> {
        // LEFT JOIN keeps regions without countries; SUM over no rows is NULL.
        let rows = sqlx::query_as::<_, RegionStatsRow>(
            r#"
            SELECT
                r.name,
                COUNT(c.id) AS number_countries,
                COALESCE(SUM(c.population), 0)::BIGINT AS total_population
            FROM regions r
            LEFT JOIN countries c ON c.region_id = r.id
            GROUP BY r.id, r.name
            ORDER BY r.name COLLATE "C"
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| RegionStats::new(r.name, r.number_countries, r.total_population))
            .collect())
    }
}
