//! DTOs for the country detail endpoints.

use serde::Serialize;

use crate::domain::entities::CountryDetail;

/// Detail response wrapping a single country.
#[derive(Debug, Serialize)]
pub struct CountryResponse {
    pub country: CountryBody,
}

/// A country with its region name and sorted top-level domains.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryBody {
    pub name: String,
    pub alpha2_code: String,
    pub alpha3_code: String,
    pub population: i64,
    pub capital: String,
    pub region: String,
    pub top_level_domain: Vec<String>,
}

impl From<CountryDetail> for CountryResponse {
    fn from(detail: CountryDetail) -> Self {
        let CountryDetail {
            country,
            region,
            top_level_domains,
        } = detail;

        Self {
            country: CountryBody {
                name: country.name,
                alpha2_code: country.alpha2_code,
                alpha3_code: country.alpha3_code,
                population: country.population,
                capital: country.capital,
                region,
                top_level_domain: top_level_domains,
            },
        }
    }
}
