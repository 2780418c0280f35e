//! Country detail lookups.

use std::sync::Arc;

use crate::domain::entities::{Country, CountryDetail};
use crate::domain::repositories::{CountryRepository, RegionRepository};
use crate::error::AppError;
use serde_json::json;

/// Service resolving a single country with its region and domains.
pub struct CountryService<C, R>
where
    C: CountryRepository + ?Sized,
    R: RegionRepository + ?Sized,
{
    countries: Arc<C>,
    regions: Arc<R>,
}

impl<C, R> CountryService<C, R>
where
    C: CountryRepository + ?Sized,
    R: RegionRepository + ?Sized,
{
    /// Creates a new country service.
    pub fn new(countries: Arc<C>, regions: Arc<R>) -> Self {
        Self { countries, regions }
    }

    /// Retrieves a country by its surrogate key.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no country has this id.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_by_id(&self, id: i64) -> Result<CountryDetail, AppError> {
        let country = self
            .countries
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Country not found", json!({ "id": id })))?;

        self.detail(country).await
    }

    /// Retrieves a country by name, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no country name matches.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_by_name(&self, name: &str) -> Result<CountryDetail, AppError> {
        let country = self
            .countries
            .find_by_name_ignore_case(name)
            .await?
            .ok_or_else(|| AppError::not_found("Country not found", json!({ "name": name })))?;

        self.detail(country).await
    }

    /// Counts stored countries.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn count_countries(&self) -> Result<i64, AppError> {
        self.countries.count_all().await
    }

    async fn detail(&self, country: Country) -> Result<CountryDetail, AppError> {
        let region = self
            .regions
            .find_by_id(country.region_id)
            .await?
            .ok_or_else(|| {
                AppError::internal(
                    "Country references a missing region",
                    json!({ "country_id": country.id, "region_id": country.region_id }),
                )
            })?;

        let top_level_domains = self
            .countries
            .list_domains(country.id)
            .await?
            .into_iter()
            .collect();

        Ok(CountryDetail {
            country,
            region: region.name,
            top_level_domains,
        })
    }
}
