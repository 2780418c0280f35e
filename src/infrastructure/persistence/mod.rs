//! Entity store implementations.
//!
//! # Repositories
//!
//! - [`PgRegionRepository`] - Regions and per-region aggregates
//! - [`PgCountryRepository`] - Countries and the country/domain association
//! - [`PgTopLevelDomainRepository`] - Shared top-level domains
//! - [`InMemoryStore`] - All three traits over process memory, with the same
//!   uniqueness rules as the PostgreSQL schema

pub mod memory_store;
pub mod pg_country_repository;
pub mod pg_region_repository;
pub mod pg_top_level_domain_repository;

pub use memory_store::{InMemoryStore, StoreSnapshot};
pub use pg_country_repository::PgCountryRepository;
pub use pg_region_repository::PgRegionRepository;
pub use pg_top_level_domain_repository::PgTopLevelDomainRepository;
