//! Data Transfer Objects for API responses.
//!
//! Field names follow the published JSON contract, so the country body uses
//! camelCase while the stats body uses snake_case.

pub mod country;
pub mod health;
pub mod stats;
