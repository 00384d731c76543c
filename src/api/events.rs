//! Event API endpoints
//!
//! - GET /eventos/ - All events, most recent date first
//! - GET /eventos/{id}/ - One event

use axum::{
    extract::State,
    routing::get,
    Json, Router,
};

use crate::api::middleware::{ApiError, AppState, RecordId};
use crate::api::responses::EventPayload;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/eventos/", get(list_events))
        .route("/eventos/{id}/", get(get_event))
}

/// GET /eventos/
#[utoipa::path(
    get,
    path = "/eventos/",
    tag = "Evento",
    responses(
        (status = 200, description = "Events ordered by date, newest first", body = [EventPayload]),
        (status = 500, description = "Storage failure", body = ApiError)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_events(
    State(state): State<AppState>,
) -> Result<Json<Vec<EventPayload>>, ApiError> {
    let events = state.event_service.list().await?;
    Ok(Json(events.into_iter().map(EventPayload::from).collect()))
}

/// GET /eventos/{id}/
#[utoipa::path(
    get,
    path = "/eventos/{id}/",
    tag = "Evento",
    params(("id" = i64, Path, description = "Event id")),
    responses(
        (status = 200, description = "Event detail", body = EventPayload),
        (status = 404, description = "Event not found", body = ApiError),
        (status = 500, description = "Storage failure", body = ApiError)
    )
)]
#[tracing::instrument(skip_all, fields(%id))]
pub async fn get_event(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<Json<EventPayload>, ApiError> {
    let event = state.event_service.get(id).await?;
    Ok(Json(event.into()))
}
