#![allow(dead_code)]

use std::sync::Arc;

use country_registry::application::services::SyncService;
use country_registry::domain::country_record::CountryRecord;
use country_registry::domain::entities::NewRegion;
use country_registry::domain::repositories::RegionRepository;
use country_registry::domain::sync_report::SyncReport;
use country_registry::infrastructure::persistence::InMemoryStore;
use country_registry::state::AppState;

pub fn sync_service(
    store: &Arc<InMemoryStore>,
) -> SyncService<InMemoryStore, InMemoryStore, InMemoryStore> {
    SyncService::new(store.clone(), store.clone(), store.clone())
}

pub fn nigeria() -> CountryRecord {
    CountryRecord::new("Nigeria", "Africa")
        .with_codes("NG", "NGA")
        .with_population(200_000)
        .with_capital("Abuja")
        .with_domains([".ng"])
}

pub fn kenya() -> CountryRecord {
    CountryRecord::new("Kenya", "Africa")
        .with_codes("KE", "KEN")
        .with_population(30_000)
        .with_capital("Nairobi")
        .with_domains([".ke"])
}

pub fn united_kingdom() -> CountryRecord {
    CountryRecord::new("United Kingdom of Great Britain and Northern Ireland", "Europe")
        .with_codes("GB", "GBR")
        .with_population(65_110_000)
        .with_capital("London")
        .with_domains([".uk", ".gb"])
}

pub async fn apply(store: &Arc<InMemoryStore>, records: &[CountryRecord]) -> SyncReport {
    sync_service(store).apply(records).await.unwrap()
}

/// Store holding Nigeria, Kenya, the United Kingdom and an empty
/// "Antarctic" region.
pub async fn seeded_store() -> Arc<InMemoryStore> {
    let store = Arc::new(InMemoryStore::new());
    apply(&store, &[nigeria(), kenya(), united_kingdom()]).await;
    RegionRepository::create(store.as_ref(), NewRegion::new("Antarctic"))
        .await
        .unwrap();
    store
}

pub async fn seeded_state() -> (AppState, Arc<InMemoryStore>) {
    let store = seeded_store().await;
    (AppState::in_memory(store.clone()), store)
}
