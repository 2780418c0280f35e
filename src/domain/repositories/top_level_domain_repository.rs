//! Repository trait for top-level domains.

use crate::domain::entities::{NewTopLevelDomain, TopLevelDomain};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for top-level domain entities.
///
/// Domains are shared between countries; linking and unlinking them is done
/// through [`crate::domain::repositories::CountryRepository`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TopLevelDomainRepository: Send + Sync {
    /// Creates a new top-level domain.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the domain already exists.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_domain: NewTopLevelDomain) -> Result<TopLevelDomain, AppError>;

    /// Finds a domain by its literal name (e.g. `.ng`).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_name(&self, name: &str) -> Result<Option<TopLevelDomain>, AppError>;
}
