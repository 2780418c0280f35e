//! In-process entity store.
//!
//! Implements all three repository traits over a single mutex-guarded state.
//! Used to run syncs and serve queries without a database, e.g. in tests.
//! Unique-name rules match the PostgreSQL schema: creating a duplicate region,
//! country or domain returns [`AppError::Conflict`].

use async_trait::async_trait;
use serde_json::json;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard};

use crate::domain::entities::{
    Country, NewCountry, NewRegion, NewTopLevelDomain, Region, RegionStats, TopLevelDomain,
};
use crate::domain::repositories::{CountryRepository, RegionRepository, TopLevelDomainRepository};
use crate::error::AppError;

#[derive(Debug, Default)]
struct State {
    next_id: i64,
    regions: BTreeMap<i64, Region>,
    countries: BTreeMap<i64, Country>,
    domains: BTreeMap<i64, TopLevelDomain>,
    links: BTreeSet<(i64, i64)>,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn domain_names(&self, country_id: i64) -> BTreeSet<String> {
        self.links
            .iter()
            .filter(|(c, _)| *c == country_id)
            .filter_map(|(_, d)| self.domains.get(d))
            .map(|d| d.name.clone())
            .collect()
    }
}

/// Copy of the store contents, ordered by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSnapshot {
    pub regions: Vec<Region>,
    pub countries: Vec<Country>,
    pub domains: Vec<TopLevelDomain>,
    /// `(country name, domain name)` pairs.
    pub links: Vec<(String, String)>,
}

/// Entity store kept in process memory.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything currently stored.
    pub fn snapshot(&self) -> StoreSnapshot {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());

        let links = state
            .links
            .iter()
            .filter_map(|(c, d)| {
                let country = state.countries.get(c)?;
                let domain = state.domains.get(d)?;
                Some((country.name.clone(), domain.name.clone()))
            })
            .collect();

        StoreSnapshot {
            regions: state.regions.values().cloned().collect(),
            countries: state.countries.values().cloned().collect(),
            domains: state.domains.values().cloned().collect(),
            links,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, AppError> {
        self.state
            .lock()
            .map_err(|_| AppError::internal("In-memory store is poisoned", json!({})))
    }
}

fn duplicate(entity: &str, name: &str) -> AppError {
    AppError::conflict(
        "Unique constraint violation",
        json!({ "constraint": format!("{entity}_name_key"), "name": name }),
    )
}

#[async_trait]
impl RegionRepository for InMemoryStore {
    async fn create(&self, new_region: NewRegion) -> Result<Region, AppError> {
        let mut state = self.lock()?;
        if state.regions.values().any(|r| r.name == new_region.name) {
            return Err(duplicate("regions", &new_region.name));
        }

        let region = Region::new(state.next_id(), new_region.name);
        state.regions.insert(region.id, region.clone());
        Ok(region)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Region>, AppError> {
        Ok(self.lock()?.regions.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Region>, AppError> {
        Ok(self
            .lock()?
            .regions
            .values()
            .find(|r| r.name == name)
            .cloned())
    }

    async fn list_stats(&self) -> Result<Vec<RegionStats>, AppError> {
        let state = self.lock()?;

        let mut stats: Vec<RegionStats> = state
            .regions
            .values()
            .map(|region| {
                let members = state
                    .countries
                    .values()
                    .filter(|c| c.region_id == region.id);
                let (count, population) =
                    members.fold((0, 0), |(n, p), c| (n + 1, p + c.population));
                RegionStats::new(region.name.clone(), count, population)
            })
            .collect();

        stats.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(stats)
    }
}

#[async_trait]
impl TopLevelDomainRepository for InMemoryStore {
    async fn create(&self, new_domain: NewTopLevelDomain) -> Result<TopLevelDomain, AppError> {
        let mut state = self.lock()?;
        if state.domains.values().any(|d| d.name == new_domain.name) {
            return Err(duplicate("top_level_domains", &new_domain.name));
        }

        let domain = TopLevelDomain::new(state.next_id(), new_domain.name);
        state.domains.insert(domain.id, domain.clone());
        Ok(domain)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<TopLevelDomain>, AppError> {
        Ok(self
            .lock()?
            .domains
            .values()
            .find(|d| d.name == name)
            .cloned())
    }
}

#[async_trait]
impl CountryRepository for InMemoryStore {
    async fn create(&self, new_country: NewCountry) -> Result<Country, AppError> {
        let mut state = self.lock()?;
        if state.countries.values().any(|c| c.name == new_country.name) {
            return Err(duplicate("countries", &new_country.name));
        }
        if !state.regions.contains_key(&new_country.region_id) {
            return Err(AppError::internal(
                "Foreign key violation",
                json!({ "region_id": new_country.region_id }),
            ));
        }

        let country = Country::new(
            state.next_id(),
            new_country.name,
            new_country.alpha2_code,
            new_country.alpha3_code,
            new_country.population,
            new_country.capital,
            new_country.region_id,
        );
        state.countries.insert(country.id, country.clone());
        Ok(country)
    }

    async fn save(&self, country: &Country) -> Result<(), AppError> {
        let mut state = self.lock()?;
        if state
            .countries
            .values()
            .any(|c| c.id != country.id && c.name == country.name)
        {
            return Err(duplicate("countries", &country.name));
        }

        match state.countries.get_mut(&country.id) {
            Some(stored) => {
                *stored = country.clone();
                Ok(())
            }
            None => Err(AppError::not_found(
                "Country not found",
                json!({ "id": country.id }),
            )),
        }
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Country>, AppError> {
        Ok(self.lock()?.countries.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Country>, AppError> {
        Ok(self
            .lock()?
            .countries
            .values()
            .find(|c| c.name == name)
            .cloned())
    }

    async fn find_by_name_ignore_case(&self, name: &str) -> Result<Option<Country>, AppError> {
        let needle = name.to_lowercase();
        Ok(self
            .lock()?
            .countries
            .values()
            .find(|c| c.name.to_lowercase() == needle)
            .cloned())
    }

    async fn count_all(&self) -> Result<i64, AppError> {
        Ok(self.lock()?.countries.len() as i64)
    }

    async fn list_domains(&self, country_id: i64) -> Result<BTreeSet<String>, AppError> {
        Ok(self.lock()?.domain_names(country_id))
    }

    async fn link_domain(&self, country_id: i64, domain_id: i64) -> Result<(), AppError> {
        let mut state = self.lock()?;
        if !state.countries.contains_key(&country_id) || !state.domains.contains_key(&domain_id) {
            return Err(AppError::internal(
                "Foreign key violation",
                json!({ "country_id": country_id, "domain_id": domain_id }),
            ));
        }

        state.links.insert((country_id, domain_id));
        Ok(())
    }

    async fn unlink_domains(&self, country_id: i64, names: &[String]) -> Result<(), AppError> {
        let mut state = self.lock()?;
        let domain_ids: BTreeSet<i64> = state
            .domains
            .values()
            .filter(|d| names.contains(&d.name))
            .map(|d| d.id)
            .collect();

        state
            .links
            .retain(|(c, d)| !(*c == country_id && domain_ids.contains(d)));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_duplicate_region_conflicts() {
        let store = InMemoryStore::new();

        RegionRepository::create(&store, NewRegion::new("Africa"))
            .await
            .unwrap();
        let result = RegionRepository::create(&store, NewRegion::new("Africa")).await;

        assert!(result.unwrap_err().is_conflict());
    }

    #[tokio::test]
    async fn test_region_names_are_case_sensitive() {
        let store = InMemoryStore::new();

        RegionRepository::create(&store, NewRegion::new("Africa"))
            .await
            .unwrap();

        assert!(
            RegionRepository::find_by_name(&store, "africa")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_stats_include_empty_regions() {
        let store = InMemoryStore::new();

        let africa = RegionRepository::create(&store, NewRegion::new("Africa"))
            .await
            .unwrap();
        RegionRepository::create(&store, NewRegion::new("Antarctic"))
            .await
            .unwrap();

        for (name, population) in [("Nigeria", 200_000), ("Kenya", 30_000)] {
            CountryRepository::create(
                &store,
                NewCountry {
                    name: name.to_string(),
                    alpha2_code: "XX".to_string(),
                    alpha3_code: "XXX".to_string(),
                    population,
                    capital: String::new(),
                    region_id: africa.id,
                },
            )
            .await
            .unwrap();
        }

        let stats = store.list_stats().await.unwrap();

        assert_eq!(
            stats,
            vec![
                RegionStats::new("Africa", 2, 230_000),
                RegionStats::new("Antarctic", 0, 0),
            ]
        );
    }
}
