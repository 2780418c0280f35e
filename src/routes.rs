//! Top-level router.
//!
//! # Route Structure
//!
//! - `GET /health`      - Store connectivity check
//! - `/countries/*`     - Read-only country API
//!
//! Trailing slashes are trimmed before routing, so `/countries/stats/` and
//! `/countries/stats` hit the same handler.

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/health", get(health_handler))
        .nest("/countries", api::routes::country_routes())
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
