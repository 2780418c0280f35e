use async_trait::async_trait;

use crate::domain::country_record::CountryRecord;
use crate::domain::country_source::CountrySource;
use crate::error::FetchError;

/// Serves a fixed list of records. Every fetch returns a fresh copy.
#[derive(Debug, Clone, Default)]
pub struct StaticCountrySource {
    records: Vec<CountryRecord>,
}

impl StaticCountrySource {
    pub fn new(records: Vec<CountryRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl CountrySource for StaticCountrySource {
    async fn fetch(&self) -> Result<Vec<CountryRecord>, FetchError> {
        Ok(self.records.clone())
    }

    fn describe(&self) -> String {
        format!("static list ({} records)", self.records.len())
    }
}
