//! Core domain entities.
//!
//! Entities are plain data structures without persistence logic.
//!
//! # Entity Types
//!
//! - [`Region`] - A named group of countries, unique by name
//! - [`Country`] - A country, unique by name, owned by one region
//! - [`TopLevelDomain`] - A domain suffix shared between countries
//! - [`RegionStats`] - Derived per-region aggregate, never persisted
//!
//! Creation inputs use separate `New*` structs, following the same pattern
//! across all entities.

pub mod country;
pub mod region;
pub mod region_stats;
pub mod top_level_domain;

pub use country::{Country, CountryDetail, NewCountry};
pub use region::{NewRegion, Region};
pub use region_stats::RegionStats;
pub use top_level_domain::{NewTopLevelDomain, TopLevelDomain};
