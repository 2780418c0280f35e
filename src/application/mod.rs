//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::reconciler::Reconciler`] - Merges one upstream record into the store
//! - [`services::sync_service::SyncService`] - Fetches and reconciles a whole batch
//! - [`services::stats_service::StatsService`] - Per-region country count and population
//! - [`services::country_service::CountryService`] - Country detail lookups

pub mod services;
