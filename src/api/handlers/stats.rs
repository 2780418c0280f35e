//! Handler for per-region statistics.

use axum::{Json, extract::State};

use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns country count and total population for every region.
///
/// # Endpoint
///
/// `GET /countries/stats`
///
/// # Response
///
/// Regions are ordered by name. A region with no countries reports zeros.
///
/// ```json
/// {
///   "regions": [
///     { "name": "Africa", "number_countries": 2, "total_population": 230000 },
///     { "name": "Antarctic", "number_countries": 0, "total_population": 0 }
///   ]
/// }
/// ```
pub async fn stats_handler(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let stats = state.stats_service.compute_stats().await?;

    Ok(Json(stats.into()))
}
