//! Trail API endpoints
//!
//! - GET /trilhas/ - All trails with a summary of their park
//! - GET /trilhas/{id}/ - One trail

use axum::{
    extract::State,
    routing::get,
    Json, Router,
};

use crate::api::middleware::{ApiError, AppState, RecordId};
use crate::api::responses::TrailPayload;

/// Build trail routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/trilhas/", get(list_trails))
        .route("/trilhas/{id}/", get(get_trail))
}

/// GET /trilhas/
#[utoipa::path(
    get,
    path = "/trilhas/",
    tag = "Trilha",
    responses(
        (status = 200, description = "All trails", body = [TrailPayload]),
        (status = 500, description = "Storage failure", body = ApiError)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_trails(
    State(state): State<AppState>,
) -> Result<Json<Vec<TrailPayload>>, ApiError> {
    let trails = state.trail_service.list().await?;
    Ok(Json(trails.into_iter().map(TrailPayload::from).collect()))
}

/// GET /trilhas/{id}/
#[utoipa::path(
    get,
    path = "/trilhas/{id}/",
    tag = "Trilha",
    params(("id" = i64, Path, description = "Trail id")),
    responses(
        (status = 200, description = "Trail detail", body = TrailPayload),
        (status = 404, description = "Trail not found", body = ApiError),
        (status = 500, description = "Storage failure", body = ApiError)
    )
)]
#[tracing::instrument(skip_all, fields(%id))]
pub async fn get_trail(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<Json<TrailPayload>, ApiError> {
    let trail = state.trail_service.get(id).await?;
    Ok(Json(trail.into()))
}
