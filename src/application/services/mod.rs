//! Business logic services for the application layer.

pub mod country_service;
pub mod reconciler;
pub mod stats_service;
pub mod sync_service;

pub use country_service::CountryService;
pub use reconciler::{CountryField, ReconcileError, Reconciler, Reconciliation};
pub use stats_service::StatsService;
pub use sync_service::SyncService;
