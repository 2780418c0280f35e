//! HTTP request handlers for API endpoints.

pub mod countries;
pub mod health;
pub mod stats;

pub use countries::{country_by_id_handler, country_by_name_handler};
pub use health::health_handler;
pub use stats::stats_handler;
