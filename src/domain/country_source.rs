//! Contract for obtaining the upstream country list.

use crate::domain::country_record::CountryRecord;
use crate::error::FetchError;
use async_trait::async_trait;

/// A provider of the complete upstream country list.
///
/// Implementations return the whole list at once or fail outright; there is
/// no partial or streamed result.
///
/// # Implementations
///
/// - [`crate::infrastructure::source::HttpCountrySource`] - JSON document over HTTP
/// - [`crate::infrastructure::source::FileCountrySource`] - JSON document on disk
/// - [`crate::infrastructure::source::StaticCountrySource`] - records held in memory
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CountrySource: Send + Sync {
    /// Fetches and parses every record.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] if the source is unreachable or the document
    /// is not a JSON list of country records.
    async fn fetch(&self) -> Result<Vec<CountryRecord>, FetchError>;

    /// Human-readable location of the source, used in logs.
    fn describe(&self) -> String;
}
