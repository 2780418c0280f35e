//! PostgreSQL implementation of top-level domain repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewTopLevelDomain, TopLevelDomain};
use crate::domain::repositories::TopLevelDomainRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct TopLevelDomainRow {
    id: i64,
    name: String,
}

/// PostgreSQL repository for top-level domains.
pub struct PgTopLevelDomainRepository {
    pool: Arc<PgPool>,
}

impl PgTopLevelDomainRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TopLevelDomainRepository for PgTopLevelDomainRepository {
    async fn create(&self, new_domain: NewTopLevelDomain) -> Result<TopLevelDomain, AppError> {
        let row = sqlx::query_as::<_, TopLevelDomainRow>(
            r#"
            INSERT INTO top_level_domains (name)
            VALUES ($1)
            RETURNING id, name
            "#,
        )
        .bind(&new_domain.name)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(TopLevelDomain::new(row.id, row.name))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<TopLevelDomain>, AppError> {
        let row = sqlx::query_as::<_, TopLevelDomainRow>(
            "SELECT id, name FROM top_level_domains WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(|r| TopLevelDomain::new(r.id, r.name)))
    }
}
