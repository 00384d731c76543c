//! Park API endpoints
//!
//! - GET /parques/ - All parks with their opening hours
//! - GET /parques/{id}/ - One park with its opening hours

use axum::{
    extract::State,
    routing::get,
    Json, Router,
};

use crate::api::middleware::{ApiError, AppState, RecordId};
use crate::api::responses::ParkPayload;

/// Build park routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/parques/", get(list_parks))
        .route("/parques/{id}/", get(get_park))
}

/// GET /parques/
#[utoipa::path(
    get,
    path = "/parques/",
    tag = "Parque",
    responses(
        (status = 200, description = "Parks with their opening hours", body = [ParkPayload]),
        (status = 500, description = "Storage failure", body = ApiError)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_parks(State(state): State<AppState>) -> Result<Json<Vec<ParkPayload>>, ApiError> {
    let parks = state.park_service.list().await?;
    Ok(Json(parks.into_iter().map(ParkPayload::from).collect()))
}

/// GET /parques/{id}/
#[utoipa::path(
    get,
    path = "/parques/{id}/",
    tag = "Parque",
    params(("id" = i64, Path, description = "Park id")),
    responses(
        (status = 200, description = "Park with its opening hours, Monday first", body = ParkPayload),
        (status = 404, description = "Park not found", body = ApiError),
        (status = 500, description = "Storage failure", body = ApiError)
    )
)]
#[tracing::instrument(skip_all, fields(%id))]
pub async fn get_park(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<Json<ParkPayload>, ApiError> {
    let park = state.park_service.get(id).await?;
    Ok(Json(park.into()))
}
