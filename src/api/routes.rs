//! Country API route configuration.

use crate::api::handlers::{country_by_id_handler, country_by_name_handler, stats_handler};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Read-only country routes, mounted under `/countries`.
///
/// # Endpoints
///
/// - `GET /stats`       - Per-region country count and population
/// - `GET /id/{id}`     - Country detail by id
/// - `GET /name/{name}` - Country detail by name (case-insensitive)
pub fn country_routes() -> Router<AppState> {
    Router::new()
        .route("/stats", get(stats_handler))
        .route("/id/{id}", get(country_by_id_handler))
        .route("/name/{name}", get(country_by_name_handler))
}
