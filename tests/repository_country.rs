//! PostgreSQL country repository and end-to-end sync tests.
//!
//! Need a database: set `DATABASE_URL` before running `cargo test`.

use sqlx::PgPool;
use std::sync::Arc;

use country_registry::application::services::SyncService;
use country_registry::domain::country_record::CountryRecord;
use country_registry::domain::entities::{NewCountry, NewRegion, NewTopLevelDomain};
use country_registry::domain::repositories::{
    CountryRepository, RegionRepository, TopLevelDomainRepository,
};
use country_registry::error::AppError;
use country_registry::infrastructure::persistence::{
    PgCountryRepository, PgRegionRepository, PgTopLevelDomainRepository,
};

struct Repos {
    regions: Arc<PgRegionRepository>,
    countries: Arc<PgCountryRepository>,
    domains: Arc<PgTopLevelDomainRepository>,
}

fn repos(pool: PgPool) -> Repos {
    let pool = Arc::new(pool);
    Repos {
        regions: Arc::new(PgRegionRepository::new(pool.clone())),
        countries: Arc::new(PgCountryRepository::new(pool.clone())),
        domains: Arc::new(PgTopLevelDomainRepository::new(pool)),
    }
}

fn new_country(name: &str, region_id: i64) -> NewCountry {
    NewCountry {
        name: name.to_string(),
        alpha2_code: "NG".to_string(),
        alpha3_code: "NGA".to_string(),
        population: 200_000,
        capital: "Abuja".to_string(),
        region_id,
    }
}

#[sqlx::test]
async fn test_create_save_and_find(pool: PgPool) {
    let r = repos(pool);
    let africa = r.regions.create(NewRegion::new("Africa")).await.unwrap();

    let mut country = r
        .countries
        .create(new_country("Nigeria", africa.id))
        .await
        .unwrap();
    country.population = 210_000;
    r.countries.save(&country).await.unwrap();

    let stored = r.countries.find_by_name("Nigeria").await.unwrap().unwrap();
    assert_eq!(stored, country);
    assert_eq!(
        r.countries.find_by_id(country.id).await.unwrap(),
        Some(country)
    );
    assert_eq!(r.countries.count_all().await.unwrap(), 1);
}

#[sqlx::test]
async fn test_save_missing_country_is_not_found(pool: PgPool) {
    let r = repos(pool);
    let africa = r.regions.create(NewRegion::new("Africa")).await.unwrap();
    let mut country = r
        .countries
        .create(new_country("Nigeria", africa.id))
        .await
        .unwrap();
    country.id += 1000;

    let result = r.countries.save(&country).await;

    assert!(matches!(result, Err(AppError::NotFound { .. })));
}

#[sqlx::test]
async fn test_find_by_name_ignore_case(pool: PgPool) {
    let r = repos(pool);
    let africa = r.regions.create(NewRegion::new("Africa")).await.unwrap();
    r.countries
        .create(new_country("Nigeria", africa.id))
        .await
        .unwrap();

    let found = r
        .countries
        .find_by_name_ignore_case("nIGERIA")
        .await
        .unwrap();

    assert_eq!(found.unwrap().name, "Nigeria");
    assert!(r.countries.find_by_name("nigeria").await.unwrap().is_none());
}

#[sqlx::test]
async fn test_link_and_unlink_domains(pool: PgPool) {
    let r = repos(pool);
    let africa = r.regions.create(NewRegion::new("Africa")).await.unwrap();
    let nigeria = r
        .countries
        .create(new_country("Nigeria", africa.id))
        .await
        .unwrap();
    let niger = r
        .countries
        .create(new_country("Niger", africa.id))
        .await
        .unwrap();
    let ng = r.domains.create(NewTopLevelDomain::new(".ng")).await.unwrap();
    let shared = r.domains.create(NewTopLevelDomain::new(".x")).await.unwrap();

    r.countries.link_domain(nigeria.id, ng.id).await.unwrap();
    r.countries.link_domain(nigeria.id, ng.id).await.unwrap();
    r.countries.link_domain(nigeria.id, shared.id).await.unwrap();
    r.countries.link_domain(niger.id, shared.id).await.unwrap();

    let linked = r.countries.list_domains(nigeria.id).await.unwrap();
    assert_eq!(linked.into_iter().collect::<Vec<_>>(), vec![".ng", ".x"]);

    r.countries
        .unlink_domains(nigeria.id, &[".x".to_string()])
        .await
        .unwrap();

    let linked = r.countries.list_domains(nigeria.id).await.unwrap();
    assert_eq!(linked.into_iter().collect::<Vec<_>>(), vec![".ng"]);
    let linked = r.countries.list_domains(niger.id).await.unwrap();
    assert_eq!(linked.into_iter().collect::<Vec<_>>(), vec![".x"]);
    assert!(r.domains.find_by_name(".x").await.unwrap().is_some());
}

#[sqlx::test]
async fn test_sync_is_idempotent(pool: PgPool) {
    let r = repos(pool);
    let service = SyncService::new(r.regions.clone(), r.countries.clone(), r.domains.clone());
    let records = vec![
        CountryRecord::new("Nigeria", "Africa")
            .with_codes("NG", "NGA")
            .with_population(200_000)
            .with_domains([".ng"]),
        CountryRecord::new("Kenya", "Africa")
            .with_codes("KE", "KEN")
            .with_population(30_000)
            .with_capital("Nairobi")
            .with_domains([".ke"]),
    ];

    let first = service.apply(&records).await.unwrap();
    let second = service.apply(&records).await.unwrap();

    assert_eq!(first.created(), 2);
    assert_eq!(first.regions_created(), 1);
    assert_eq!(second.unchanged(), 2);

    let stats = r.regions.list_stats().await.unwrap();
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].total_population, 230_000);

    let nigeria = r.countries.find_by_name("Nigeria").await.unwrap().unwrap();
    assert_eq!(nigeria.capital, "");
}
