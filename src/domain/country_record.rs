//! One record of the upstream country list.

use serde::Deserialize;
use serde_with::{DefaultOnNull, serde_as};

/// A country as delivered by the upstream source.
///
/// Every scalar is optional so that an absent key and an explicit `null`
/// deserialize identically: both mean "value not provided" and never
/// overwrite stored data. Unknown keys in the source document are ignored.
///
/// `topLevelDomain` defaults to an empty list when absent or `null`.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryRecord {
    pub name: Option<String>,
    pub region: Option<String>,
    pub alpha2_code: Option<String>,
    pub alpha3_code: Option<String>,
    pub population: Option<i64>,
    pub capital: Option<String>,
    #[serde(default)]
    #[serde_as(as = "DefaultOnNull")]
    pub top_level_domain: Vec<String>,
}

impl CountryRecord {
    /// Creates a record carrying only the two merge keys.
    pub fn new(name: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            region: Some(region.into()),
            ..Default::default()
        }
    }

    pub fn with_codes(mut self, alpha2: impl Into<String>, alpha3: impl Into<String>) -> Self {
        self.alpha2_code = Some(alpha2.into());
        self.alpha3_code = Some(alpha3.into());
        self
    }

    pub fn with_population(mut self, population: i64) -> Self {
        self.population = Some(population);
        self
    }

    pub fn with_capital(mut self, capital: impl Into<String>) -> Self {
        self.capital = Some(capital.into());
        self
    }

    pub fn with_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.top_level_domain = domains.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_record() {
        let record: CountryRecord = serde_json::from_str(
            r#"{
                "name": "Nigeria",
                "alpha2Code": "NG",
                "alpha3Code": "NGA",
                "capital": "Abuja",
                "region": "Africa",
                "population": 186988000,
                "topLevelDomain": [".ng"],
                "callingCodes": ["234"]
            }"#,
        )
        .unwrap();

        assert_eq!(record.name.as_deref(), Some("Nigeria"));
        assert_eq!(record.region.as_deref(), Some("Africa"));
        assert_eq!(record.alpha2_code.as_deref(), Some("NG"));
        assert_eq!(record.alpha3_code.as_deref(), Some("NGA"));
        assert_eq!(record.population, Some(186_988_000));
        assert_eq!(record.capital.as_deref(), Some("Abuja"));
        assert_eq!(record.top_level_domain, vec![".ng".to_string()]);
    }

    #[test]
    fn test_null_and_absent_are_equivalent() {
        let with_null: CountryRecord = serde_json::from_str(
            r#"{"name": "X", "region": "R", "capital": null, "population": null, "topLevelDomain": null}"#,
        )
        .unwrap();
        let absent: CountryRecord = serde_json::from_str(r#"{"name": "X", "region": "R"}"#).unwrap();

        assert_eq!(with_null, absent);
        assert!(absent.capital.is_none());
        assert!(absent.population.is_none());
        assert!(absent.top_level_domain.is_empty());
    }

    #[test]
    fn test_missing_merge_keys_still_deserialize() {
        let record: CountryRecord = serde_json::from_str(r#"{"name": "Nowhere"}"#).unwrap();
        assert!(record.region.is_none());
    }

    #[test]
    fn test_builder() {
        let record = CountryRecord::new("Kenya", "Africa")
            .with_codes("KE", "KEN")
            .with_population(47_251_000)
            .with_capital("Nairobi")
            .with_domains([".ke"]);

        assert_eq!(record.name.as_deref(), Some("Kenya"));
        assert_eq!(record.alpha3_code.as_deref(), Some("KEN"));
        assert_eq!(record.top_level_domain, vec![".ke".to_string()]);
    }
}
