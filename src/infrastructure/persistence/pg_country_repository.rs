//! PostgreSQL implementation of country repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::entities::{Country, NewCountry};
use crate::domain::repositories::CountryRepository;
use crate::error::AppError;
use serde_json::json;

#[derive(sqlx::FromRow)]
struct CountryRow {
    id: i64,
    name: String,
    alpha2_code: String,
    alpha3_code: String,
    population: i64,
    capital: String,
    region_id: i64,
}

impl From<CountryRow> for Country {
    fn from(r: CountryRow) -> Self {
        Country::new(
            r.id,
            r.name,
            r.alpha2_code,
            r.alpha3_code,
            r.population,
            r.capital,
            r.region_id,
        )
    }
}

/// PostgreSQL repository for countries and their domain links.
///
/// The association lives in `country_top_level_domains`; unlinking deletes
/// rows there only, so shared domains survive.
pub struct PgCountryRepository {
    pool: Arc<PgPool>,
}

impl PgCountryRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CountryRepository for PgCountryRepository {
    async fn create(&self, new_country: NewCountry) -> Result<Country, AppError> {
        let row = sqlx::query_as::<_, CountryRow>(
            r#"
            INSERT INTO countries (name, alpha2_code, alpha3_code, population, capital, region_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, alpha2_code, alpha3_code, population, capital, region_id
            "#,
        )
        .bind(&new_country.name)
        .bind(&new_country.alpha2_code)
        .bind(&new_country.alpha3_code)
        .bind(new_country.population)
        .bind(&new_country.capital)
        .bind(new_country.region_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn save(&self, country: &Country) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE countries SET
                name        = $2,
                alpha2_code = $3,
                alpha3_code = $4,
                population  = $5,
                capital     = $6,
                region_id   = $7
            WHERE id = $1
            "#,
        )
        .bind(country.id)
        .bind(&country.name)
        .bind(&country.alpha2_code)
        .bind(&country.alpha3_code)
        .bind(country.population)
        .bind(&country.capital)
        .bind(country.region_id)
        .execute(self.pool.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "Country not found",
                json!({ "id": country.id }),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Country>, AppError> {
        let row = sqlx::query_as::<_, CountryRow>(
            r#"
            SELECT id, name, alpha2_code, alpha3_code, population, capital, region_id
            FROM countries
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Country::from))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Country>, AppError> {
        let row = sqlx::query_as::<_, CountryRow>(
            r#"
            SELECT id, name, alpha2_code, alpha3_code, population, capital, region_id
            FROM countries
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Country::from))
    }

    async fn find_by_name_ignore_case(&self, name: &str) -> Result<Option<Country>, AppError> {
        let row = sqlx::query_as::<_, CountryRow>(
            r#"
            SELECT id, name, alpha2_code, alpha3_code, population, capital, region_id
            FROM countries
            WHERE LOWER(name) = LOWER($1)
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Country::from))
    }

    async fn count_all(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM countries")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn list_domains(&self, country_id: i64) -> Result<BTreeSet<String>, AppError> {
        let names: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT t.name
            FROM country_top_level_domains ct
            JOIN top_level_domains t ON t.id = ct.top_level_domain_id
            WHERE ct.country_id = $1
            "#,
        )
        .bind(country_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(names.into_iter().collect())
    }

    async fn link_domain(&self, country_id: i64, domain_id: i64) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO country_top_level_domains (country_id, top_level_domain_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(country_id)
        .bind(domain_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn unlink_domains(&self, country_id: i64, names: &[String]) -> Result<(), AppError> {
        if names.is_empty() {
            return Ok(());
        }

        sqlx::query(
            r#"
            DELETE FROM country_top_level_domains ct
            USING top_level_domains t
            WHERE ct.top_level_domain_id = t.id
              AND ct.country_id = $1
              AND t.name = ANY($2)
            "#,
        )
        .bind(country_id)
        .bind(names)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }
}
