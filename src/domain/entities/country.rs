//! Country entity.

/// A country as persisted in the store.
///
/// `name` is the merge key used to match upstream records; `id` is the
/// surrogate key exposed by the detail endpoint. `capital` is never null and
/// defaults to an empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Country {
    pub id: i64,
    pub name: String,
    pub alpha2_code: String,
    pub alpha3_code: String,
    pub population: i64,
    pub capital: String,
    pub region_id: i64,
}

impl Country {
    /// Creates a new Country instance.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let country = Country::new(
    ///     1,
    ///     "Nigeria".to_string(),
    ///     "NG".to_string(),
    ///     "NGA".to_string(),
    ///     186_988_000,
    ///     "Abuja".to_string(),
    ///     3,
    /// );
    /// ```
    pub fn new(
        id: i64,
        name: String,
        alpha2_code: String,
        alpha3_code: String,
        population: i64,
        capital: String,
        region_id: i64,
    ) -> Self {
        Self {
            id,
            name,
            alpha2_code,
            alpha3_code,
            population,
            capital,
            region_id,
        }
    }
}

/// Input data for creating a country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCountry {
    pub name: String,
    pub alpha2_code: String,
    pub alpha3_code: String,
    pub population: i64,
    pub capital: String,
    pub region_id: i64,
}

/// A country joined with its region name and domain list.
///
/// This is the read model served by the detail endpoint. Domains are sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryDetail {
    pub country: Country,
    pub region: String,
    pub top_level_domains: Vec<String>,
}
