use async_trait::async_trait;
use std::path::PathBuf;

use crate::domain::country_record::CountryRecord;
use crate::domain::country_source::CountrySource;
use crate::error::FetchError;

use super::parse_records;

/// Reads the country list from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileCountrySource {
    path: PathBuf,
}

impl FileCountrySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CountrySource for FileCountrySource {
    async fn fetch(&self) -> Result<Vec<CountryRecord>, FetchError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| FetchError::Io {
                path: self.path.display().to_string(),
                source,
            })?;

        parse_records(&bytes)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}
