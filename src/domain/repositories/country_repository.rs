//! Repository trait for countries and their domain associations.

use std::collections::BTreeSet;

use crate::domain::entities::{Country, NewCountry};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for countries.
///
/// Besides the country rows themselves this owns the many-to-many association
/// between countries and top-level domains. Association changes never touch
/// the domain entities.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgCountryRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryStore`] - in-process implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_country.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CountryRepository: Send + Sync {
    /// Creates a new country.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if a country with the same name already exists.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_country: NewCountry) -> Result<Country, AppError>;

    /// Writes every column of an existing country.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no country has `country.id`.
    /// Returns [`AppError::Internal`] on database errors.
    async fn save(&self, country: &Country) -> Result<(), AppError>;

    /// Finds a country by its database ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Country>, AppError>;

    /// Finds a country by its exact name (the merge key).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_name(&self, name: &str) -> Result<Option<Country>, AppError>;

    /// Finds a country whose name equals `name` ignoring case.
    ///
    /// If several names differ only by case, the oldest row wins.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_name_ignore_case(&self, name: &str) -> Result<Option<Country>, AppError>;

    /// Counts all stored countries.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count_all(&self) -> Result<i64, AppError>;

    /// Lists the names of the domains linked to a country.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_domains(&self, country_id: i64) -> Result<BTreeSet<String>, AppError>;

    /// Links a domain to a country. Linking an already linked pair is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn link_domain(&self, country_id: i64, domain_id: i64) -> Result<(), AppError>;

    /// Removes the associations between a country and the named domains.
    ///
    /// The domain entities are kept, as are their links to other countries.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn unlink_domains(&self, country_id: i64, names: &[String]) -> Result<(), AppError>;
}
