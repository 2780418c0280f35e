//! [`CountrySource`](crate::domain::country_source::CountrySource) implementations.
//!
//! All of them deliver the same JSON document: a top-level array of country
//! objects. Parsing is shared through [`parse_records`].

pub mod file_source;
pub mod http_source;
pub mod static_source;

pub use file_source::FileCountrySource;
pub use http_source::{HttpCountrySource, HttpSourceConfig};
pub use static_source::StaticCountrySource;

use crate::domain::country_record::CountryRecord;
use crate::error::FetchError;

/// Default location of the upstream country list.
pub const DEFAULT_SOURCE_URL: &str = "https://storage.googleapis.com/dcr-django-test/countries.json";

/// Parses a JSON array of country objects.
///
/// # Errors
///
/// Returns [`FetchError::Parse`] if the document is not valid JSON, is not an
/// array, or an element has a value of the wrong type.
pub fn parse_records(bytes: &[u8]) -> Result<Vec<CountryRecord>, FetchError> {
    serde_json::from_slice(bytes).map_err(|e| FetchError::Parse {
        message: e.to_string(),
    })
}
