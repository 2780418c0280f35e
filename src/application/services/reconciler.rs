//! Merges one upstream country record into the entity store.
//!
//! A reconciliation touches three entities:
//!
//! 1. **Region** - looked up by name, created on miss
//! 2. **Country** - looked up by name, created on miss, otherwise diffed
//!    field by field against the record
//! 3. **Domain set** - the country's linked domains are made equal to the
//!    record's (deduplicated) list by set difference
//!
//! Values the record does not provide (absent or `null`) never overwrite
//! stored data. Only what actually differs is written.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::country_record::CountryRecord;
use crate::domain::entities::{
    Country, NewCountry, NewRegion, NewTopLevelDomain, Region, TopLevelDomain,
};
use crate::domain::repositories::{CountryRepository, RegionRepository, TopLevelDomainRepository};
use crate::domain::sync_report::Outcome;
use crate::error::AppError;

/// Why a single record could not be reconciled.
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    /// A field needed to match or create the country is missing or `null`.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error(transparent)]
    Store(#[from] AppError),
}

/// Mutable scalar attributes of a country, compared during reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountryField {
    Alpha2Code,
    Alpha3Code,
    Population,
    Capital,
    Region,
}

/// Result of reconciling one record.
#[derive(Debug, Clone)]
pub struct Reconciliation {
    pub country: Country,
    pub region: Region,
    pub outcome: Outcome,
    /// `true` when the record's region did not exist before this call.
    pub region_created: bool,
    /// Scalar fields overwritten on a pre-existing country.
    pub changed_fields: Vec<CountryField>,
    /// `true` when at least one domain was linked or unlinked.
    pub domains_changed: bool,
}

/// Reconciliation engine over the three entity repositories.
pub struct Reconciler<R, C, T>
where
    R: RegionRepository + ?Sized,
    C: CountryRepository + ?Sized,
    T: TopLevelDomainRepository + ?Sized,
{
    regions: Arc<R>,
    countries: Arc<C>,
    domains: Arc<T>,
}

impl<R, C, T> Reconciler<R, C, T>
where
    R: RegionRepository + ?Sized,
    C: CountryRepository + ?Sized,
    T: TopLevelDomainRepository + ?Sized,
{
    /// Creates a new reconciler.
    pub fn new(regions: Arc<R>, countries: Arc<C>, domains: Arc<T>) -> Self {
        Self {
            regions,
            countries,
            domains,
        }
    }

    /// Merges `record` into the store.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::MissingField`] if `name` or `region` is not
    /// provided, or if the country is new and `alpha2Code`, `alpha3Code` or
    /// `population` is not provided.
    /// Returns [`ReconcileError::Store`] on repository failures. Writes made
    /// before the failure are not rolled back.
    pub async fn reconcile(&self, record: &CountryRecord) -> Result<Reconciliation, ReconcileError> {
        let name = required(&record.name, "name")?;
        let region_name = required(&record.region, "region")?;

        let (region, region_created) = self.get_or_create_region(region_name).await?;

        let (mut country, created) = match self.countries.find_by_name(name).await? {
            Some(existing) => (existing, false),
            None => (self.create_country(name, &region, record).await?, true),
        };

        let changed_fields = if created {
            Vec::new()
        } else {
            apply_scalar_changes(&mut country, &region, record)
        };

        let domains_changed = self
            .reconcile_domains(&country, &record.top_level_domain, created)
            .await?;

        if !created && (!changed_fields.is_empty() || domains_changed) {
            self.countries.save(&country).await?;
        }

        let outcome = if created {
            Outcome::Created
        } else if !changed_fields.is_empty() || domains_changed {
            Outcome::Updated
        } else {
            Outcome::Unchanged
        };

        tracing::debug!(
            country = %country.name,
            %outcome,
            changed = ?changed_fields,
            domains_changed,
            "Country reconciled"
        );

        Ok(Reconciliation {
            country,
            region,
            outcome,
            region_created,
            changed_fields,
            domains_changed,
        })
    }

    /// Looks a region up by name and creates it on a miss.
    ///
    /// A create that loses a race on the unique name falls back to the row
    /// that won, so one name never yields two regions.
    async fn get_or_create_region(&self, name: &str) -> Result<(Region, bool), AppError> {
        if let Some(region) = self.regions.find_by_name(name).await? {
            return Ok((region, false));
        }

        match self.regions.create(NewRegion::new(name)).await {
            Ok(region) => {
                tracing::info!(region = %region.name, "Region created");
                Ok((region, true))
            }
            Err(e) if e.is_conflict() => {
                let region = self.regions.find_by_name(name).await?.ok_or(e)?;
                Ok((region, false))
            }
            Err(e) => Err(e),
        }
    }

    async fn get_or_create_domain(&self, name: &str) -> Result<TopLevelDomain, AppError> {
        if let Some(domain) = self.domains.find_by_name(name).await? {
            return Ok(domain);
        }

        match self.domains.create(NewTopLevelDomain::new(name)).await {
            Ok(domain) => {
                tracing::debug!(domain = %domain.name, "Top-level domain created");
                Ok(domain)
            }
            Err(e) if e.is_conflict() => self.domains.find_by_name(name).await?.ok_or(e),
            Err(e) => Err(e),
        }
    }

    async fn create_country(
        &self,
        name: &str,
        region: &Region,
        record: &CountryRecord,
    ) -> Result<Country, ReconcileError> {
        let new_country = NewCountry {
            name: name.to_string(),
            alpha2_code: required(&record.alpha2_code, "alpha2Code")?.to_string(),
            alpha3_code: required(&record.alpha3_code, "alpha3Code")?.to_string(),
            population: record
                .population
                .ok_or(ReconcileError::MissingField("population"))?,
            capital: record.capital.clone().unwrap_or_default(),
            region_id: region.id,
        };

        Ok(self.countries.create(new_country).await?)
    }

    /// Makes the country's linked domains equal to `incoming`.
    ///
    /// Returns `true` if any association was added or removed.
    async fn reconcile_domains(
        &self,
        country: &Country,
        incoming: &[String],
        created: bool,
    ) -> Result<bool, AppError> {
        let incoming: BTreeSet<&str> = incoming.iter().map(String::as_str).collect();
        let stored = if created {
            BTreeSet::new()
        } else {
            self.countries.list_domains(country.id).await?
        };

        let (stale, missing) = domain_set_diff(&stored, &incoming);
        if stale.is_empty() && missing.is_empty() {
            return Ok(false);
        }

        if !stale.is_empty() {
            tracing::debug!(country = %country.name, domains = ?stale, "Unlinking domains");
            self.countries.unlink_domains(country.id, &stale).await?;
        }

        for name in missing {
            let domain = self.get_or_create_domain(name).await?;
            tracing::debug!(country = %country.name, domain = %domain.name, "Linking domain");
            self.countries.link_domain(country.id, domain.id).await?;
        }

        Ok(true)
    }
}

fn required<'a>(value: &'a Option<String>, field: &'static str) -> Result<&'a str, ReconcileError> {
    value
        .as_deref()
        .ok_or(ReconcileError::MissingField(field))
}

/// Overwrites `stored` with `incoming` when a differing value is provided.
fn update_field<V: PartialEq + Clone>(stored: &mut V, incoming: Option<&V>) -> bool {
    match incoming {
        Some(value) if value != stored => {
            *stored = value.clone();
            true
        }
        _ => false,
    }
}

/// Applies the record's provided, differing scalar values to `country`.
///
/// The region is compared by resolved entity id, not by name.
pub fn apply_scalar_changes(
    country: &mut Country,
    region: &Region,
    record: &CountryRecord,
) -> Vec<CountryField> {
    let mut changed = Vec::new();

    if update_field(&mut country.alpha2_code, record.alpha2_code.as_ref()) {
        changed.push(CountryField::Alpha2Code);
    }
    if update_field(&mut country.alpha3_code, record.alpha3_code.as_ref()) {
        changed.push(CountryField::Alpha3Code);
    }
    if update_field(&mut country.population, record.population.as_ref()) {
        changed.push(CountryField::Population);
    }
    if update_field(&mut country.capital, record.capital.as_ref()) {
        changed.push(CountryField::Capital);
    }
    if update_field(&mut country.region_id, Some(&region.id)) {
        changed.push(CountryField::Region);
    }

    changed
}

/// Splits two domain sets into (stored but not incoming, incoming but not stored).
fn domain_set_diff<'a>(
    stored: &BTreeSet<String>,
    incoming: &BTreeSet<&'a str>,
) -> (Vec<String>, Vec<&'a str>) {
    let stale = stored
        .iter()
        .filter(|name| !incoming.contains(name.as_str()))
        .cloned()
        .collect();
    let missing = incoming
        .iter()
        .copied()
        .filter(|name| !stored.contains(*name))
        .collect();

    (stale, missing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{
        MockCountryRepository, MockRegionRepository, MockTopLevelDomainRepository,
    };
    use serde_json::json;

    fn stored_country() -> Country {
        Country::new(
            10,
            "Nigeria".to_string(),
            "NG".to_string(),
            "NGA".to_string(),
            100,
            "Abuja".to_string(),
            1,
        )
    }

    fn africa() -> Region {
        Region::new(1, "Africa".to_string())
    }

    fn reconciler(
        regions: MockRegionRepository,
        countries: MockCountryRepository,
        domains: MockTopLevelDomainRepository,
    ) -> Reconciler<MockRegionRepository, MockCountryRepository, MockTopLevelDomainRepository>
    {
        Reconciler::new(Arc::new(regions), Arc::new(countries), Arc::new(domains))
    }

    #[test]
    fn test_apply_scalar_changes_ignores_missing_values() {
        let mut country = stored_country();
        let record = CountryRecord::new("Nigeria", "Africa");

        let changed = apply_scalar_changes(&mut country, &africa(), &record);

        assert!(changed.is_empty());
        assert_eq!(country, stored_country());
    }

    #[test]
    fn test_apply_scalar_changes_updates_differing_values() {
        let mut country = stored_country();
        let record = CountryRecord::new("Nigeria", "Africa")
            .with_codes("NG", "NGR")
            .with_population(200)
            .with_capital("Abuja");

        let changed = apply_scalar_changes(&mut country, &africa(), &record);

        assert_eq!(
            changed,
            vec![CountryField::Alpha3Code, CountryField::Population]
        );
        assert_eq!(country.alpha3_code, "NGR");
        assert_eq!(country.population, 200);
        assert_eq!(country.capital, "Abuja");
    }

    #[test]
    fn test_apply_scalar_changes_compares_region_by_id() {
        let mut country = stored_country();
        let europe = Region::new(2, "Europe".to_string());
        let record = CountryRecord::new("Nigeria", "Europe");

        let changed = apply_scalar_changes(&mut country, &europe, &record);

        assert_eq!(changed, vec![CountryField::Region]);
        assert_eq!(country.region_id, 2);
    }

    #[test]
    fn test_apply_scalar_changes_allows_empty_capital() {
        let mut country = stored_country();
        let record = CountryRecord::new("Nigeria", "Africa").with_capital("");

        let changed = apply_scalar_changes(&mut country, &africa(), &record);

        assert_eq!(changed, vec![CountryField::Capital]);
        assert!(country.capital.is_empty());
    }

    #[test]
    fn test_domain_set_diff() {
        let stored: BTreeSet<String> = [".ng", ".com"].iter().map(|s| s.to_string()).collect();
        let incoming: BTreeSet<&str> = [".ng", ".africa"].into_iter().collect();

        let (stale, missing) = domain_set_diff(&stored, &incoming);

        assert_eq!(stale, vec![".com".to_string()]);
        assert_eq!(missing, vec![".africa"]);
    }

    #[tokio::test]
    async fn test_reconcile_missing_name() {
        let service = reconciler(
            MockRegionRepository::new(),
            MockCountryRepository::new(),
            MockTopLevelDomainRepository::new(),
        );

        let record = CountryRecord {
            region: Some("Africa".to_string()),
            ..Default::default()
        };

        let result = service.reconcile(&record).await;

        assert!(matches!(result, Err(ReconcileError::MissingField("name"))));
    }

    #[tokio::test]
    async fn test_reconcile_missing_region_touches_nothing() {
        let service = reconciler(
            MockRegionRepository::new(),
            MockCountryRepository::new(),
            MockTopLevelDomainRepository::new(),
        );

        let record = CountryRecord {
            name: Some("Nigeria".to_string()),
            ..Default::default()
        };

        let result = service.reconcile(&record).await;

        assert!(matches!(result, Err(ReconcileError::MissingField("region"))));
    }

    #[tokio::test]
    async fn test_reconcile_creates_region_and_country() {
        let mut regions = MockRegionRepository::new();
        regions
            .expect_find_by_name()
            .withf(|name| name == "Africa")
            .times(1)
            .returning(|_| Ok(None));
        regions
            .expect_create()
            .withf(|new| new.name == "Africa")
            .times(1)
            .returning(|_| Ok(africa()));

        let mut countries = MockCountryRepository::new();
        countries
            .expect_find_by_name()
            .times(1)
            .returning(|_| Ok(None));
        countries
            .expect_create()
            .withf(|new| {
                new.name == "Nigeria"
                    && new.alpha2_code == "NG"
                    && new.population == 100
                    && new.capital.is_empty()
                    && new.region_id == 1
            })
            .times(1)
            .returning(|_| {
                let mut country = stored_country();
                country.capital = String::new();
                Ok(country)
            });
        countries
            .expect_link_domain()
            .withf(|country_id, domain_id| *country_id == 10 && *domain_id == 5)
            .times(1)
            .returning(|_, _| Ok(()));
        countries.expect_list_domains().never();
        countries.expect_save().never();

        let mut domains = MockTopLevelDomainRepository::new();
        domains
            .expect_find_by_name()
            .times(1)
            .returning(|_| Ok(Some(TopLevelDomain::new(5, ".ng".to_string()))));

        let service = reconciler(regions, countries, domains);

        let record = CountryRecord::new("Nigeria", "Africa")
            .with_codes("NG", "NGA")
            .with_population(100)
            .with_domains([".ng", ".ng"]);

        let result = service.reconcile(&record).await.unwrap();

        assert_eq!(result.outcome, Outcome::Created);
        assert!(result.region_created);
        assert!(result.domains_changed);
    }

    #[tokio::test]
    async fn test_reconcile_new_country_requires_population() {
        let mut regions = MockRegionRepository::new();
        regions
            .expect_find_by_name()
            .returning(|_| Ok(Some(africa())));

        let mut countries = MockCountryRepository::new();
        countries.expect_find_by_name().returning(|_| Ok(None));
        countries.expect_create().never();

        let service = reconciler(regions, countries, MockTopLevelDomainRepository::new());

        let record = CountryRecord::new("Nigeria", "Africa").with_codes("NG", "NGA");

        let result = service.reconcile(&record).await;

        assert!(matches!(
            result,
            Err(ReconcileError::MissingField("population"))
        ));
    }

    #[tokio::test]
    async fn test_reconcile_unchanged_does_not_write() {
        let mut regions = MockRegionRepository::new();
        regions
            .expect_find_by_name()
            .returning(|_| Ok(Some(africa())));
        regions.expect_create().never();

        let mut countries = MockCountryRepository::new();
        countries
            .expect_find_by_name()
            .returning(|_| Ok(Some(stored_country())));
        countries
            .expect_list_domains()
            .returning(|_| Ok([".ng".to_string()].into_iter().collect()));
        countries.expect_save().never();
        countries.expect_link_domain().never();
        countries.expect_unlink_domains().never();

        let service = reconciler(regions, countries, MockTopLevelDomainRepository::new());

        let record = CountryRecord::new("Nigeria", "Africa")
            .with_codes("NG", "NGA")
            .with_population(100)
            .with_domains([".ng"]);

        let result = service.reconcile(&record).await.unwrap();

        assert_eq!(result.outcome, Outcome::Unchanged);
        assert!(!result.region_created);
        assert!(result.changed_fields.is_empty());
        assert!(!result.domains_changed);
    }

    #[tokio::test]
    async fn test_reconcile_domain_only_change_is_persisted() {
        let mut regions = MockRegionRepository::new();
        regions
            .expect_find_by_name()
            .returning(|_| Ok(Some(africa())));

        let mut countries = MockCountryRepository::new();
        countries
            .expect_find_by_name()
            .returning(|_| Ok(Some(stored_country())));
        countries
            .expect_list_domains()
            .returning(|_| Ok([".ng".to_string(), ".com".to_string()].into_iter().collect()));
        countries
            .expect_unlink_domains()
            .withf(|country_id, names| *country_id == 10 && names == [".com".to_string()])
            .times(1)
            .returning(|_, _| Ok(()));
        countries.expect_link_domain().never();
        countries.expect_save().times(1).returning(|_| Ok(()));

        let service = reconciler(regions, countries, MockTopLevelDomainRepository::new());

        let record = CountryRecord::new("Nigeria", "Africa").with_domains([".ng"]);

        let result = service.reconcile(&record).await.unwrap();

        assert_eq!(result.outcome, Outcome::Updated);
        assert!(result.changed_fields.is_empty());
        assert!(result.domains_changed);
    }

    #[tokio::test]
    async fn test_reconcile_region_create_conflict_reuses_existing() {
        let mut regions = MockRegionRepository::new();
        let mut lookups = 0;
        regions
            .expect_find_by_name()
            .times(2)
            .returning(move |_| {
                lookups += 1;
                if lookups == 1 { Ok(None) } else { Ok(Some(africa())) }
            });
        regions
            .expect_create()
            .times(1)
            .returning(|_| Err(AppError::conflict("Unique constraint violation", json!({}))));

        let mut countries = MockCountryRepository::new();
        countries
            .expect_find_by_name()
            .returning(|_| Ok(Some(stored_country())));
        countries
            .expect_list_domains()
            .returning(|_| Ok(BTreeSet::new()));

        let service = reconciler(regions, countries, MockTopLevelDomainRepository::new());

        let result = service
            .reconcile(&CountryRecord::new("Nigeria", "Africa"))
            .await
            .unwrap();

        assert!(!result.region_created);
        assert_eq!(result.region.id, 1);
        assert_eq!(result.outcome, Outcome::Unchanged);
    }

    #[tokio::test]
    async fn test_reconcile_store_failure_propagates() {
        let mut regions = MockRegionRepository::new();
        regions
            .expect_find_by_name()
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let service = reconciler(
            regions,
            MockCountryRepository::new(),
            MockTopLevelDomainRepository::new(),
        );

        let result = service
            .reconcile(&CountryRecord::new("Nigeria", "Africa"))
            .await;

        assert!(matches!(
            result,
            Err(ReconcileError::Store(AppError::Internal { .. }))
        ));
    }
}
