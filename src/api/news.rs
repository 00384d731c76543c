//! News API endpoints
//!
//! - GET /novidades/ - All news, most recent publication first
//! - GET /novidades/{id}/ - One news item

use axum::{
    extract::State,
    routing::get,
    Json, Router,
};

use crate::api::middleware::{ApiError, AppState, RecordId};
use crate::api::responses::NewsPayload;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/novidades/", get(list_news))
        .route("/novidades/{id}/", get(get_news))
}

/// GET /novidades/
#[utoipa::path(
    get,
    path = "/novidades/",
    tag = "Novidades",
    responses(
        (status = 200, description = "News ordered by publication date, newest first", body = [NewsPayload]),
        (status = 500, description = "Storage failure", body = ApiError)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_news(State(state): State<AppState>) -> Result<Json<Vec<NewsPayload>>, ApiError> {
    let news = state.news_service.list().await?;
    Ok(Json(news.into_iter().map(NewsPayload::from).collect()))
}

/// GET /novidades/{id}/
#[utoipa::path(
    get,
    path = "/novidades/{id}/",
    tag = "Novidades",
    params(("id" = i64, Path, description = "News id")),
    responses(
        (status = 200, description = "News detail with full trail", body = NewsPayload),
        (status = 404, description = "News not found", body = ApiError),
        (status = 500, description = "Storage failure", body = ApiError)
    )
)]
#[tracing::instrument(skip_all, fields(%id))]
pub async fn get_news(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<Json<NewsPayload>, ApiError> {
    let news = state.news_service.get(id).await?;
    Ok(Json(news.into()))
}
