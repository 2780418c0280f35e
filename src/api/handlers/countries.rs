//! Handlers for single-country lookups.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::json;

use crate::api::dto::country::CountryResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns a country by its id.
///
/// # Endpoint
///
/// `GET /countries/id/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if no country has this id. An id that is not an
/// integer cannot match any country and is reported the same way.
pub async fn country_by_id_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CountryResponse>, AppError> {
    let id: i64 = id
        .parse()
        .map_err(|_| AppError::not_found("Country not found", json!({ "id": id })))?;

    let detail = state.country_service.get_by_id(id).await?;

    Ok(Json(detail.into()))
}

/// Returns a country by name, compared case-insensitively.
///
/// # Endpoint
///
/// `GET /countries/name/{name}`
///
/// # Response
///
/// ```json
/// {
///   "country": {
///     "name": "Kenya",
///     "alpha2Code": "KE",
///     "alpha3Code": "KEN",
///     "population": 30000,
///     "capital": "Nairobi",
///     "region": "Africa",
///     "topLevelDomain": [".ke"]
///   }
/// }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if no country name matches.
pub async fn country_by_name_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<CountryResponse>, AppError> {
    let detail = state.country_service.get_by_name(&name).await?;

    Ok(Json(detail.into()))
}
