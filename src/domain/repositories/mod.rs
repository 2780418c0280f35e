//! Repository trait definitions for the domain layer.
//!
//! These traits form the entity store the reconciler and the query services
//! work against. Implementations live in `crate::infrastructure::persistence`.
//!
//! # Available Repositories
//!
//! - [`RegionRepository`] - Region lookup, creation and per-region stats
//! - [`CountryRepository`] - Country rows plus the country/domain association
//! - [`TopLevelDomainRepository`] - Shared top-level domain entities
//!
//! # Testing
//!
//! Mock implementations are generated with `mockall` under `cfg(test)`.
//! See integration tests in `tests/repository_*.rs` for usage against PostgreSQL.

pub mod country_repository;
pub mod region_repository;
pub mod top_level_domain_repository;

pub use country_repository::CountryRepository;
pub use region_repository::RegionRepository;
pub use top_level_domain_repository::TopLevelDomainRepository;

#[cfg(test)]
pub use country_repository::MockCountryRepository;
#[cfg(test)]
pub use region_repository::MockRegionRepository;
#[cfg(test)]
pub use top_level_domain_repository::MockTopLevelDomainRepository;
