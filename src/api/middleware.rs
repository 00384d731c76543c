//! Shared API state and error responses

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Path},
    http::{request::Parts, StatusCode, Uri},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::db::DynDatabasePool;
use crate::services::{CatalogError, EventService, NewsService, ParkService, TrailService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub park_service: Arc<ParkService>,
    pub trail_service: Arc<TrailService>,
    pub event_service: Arc<EventService>,
    pub news_service: Arc<NewsService>,
}

impl AppState {
    /// Wire every service to the SQLx repositories over `pool`.
    pub fn new(pool: DynDatabasePool) -> Self {
        use crate::db::repositories::{
            SqlxEventRepository, SqlxNewsRepository, SqlxOpeningHoursRepository,
            SqlxParkRepository, SqlxTrailRepository,
        };

        Self {
            park_service: Arc::new(ParkService::new(
                SqlxParkRepository::boxed(pool.clone()),
                SqlxOpeningHoursRepository::boxed(pool.clone()),
            )),
            trail_service: Arc::new(TrailService::new(SqlxTrailRepository::boxed(pool.clone()))),
            event_service: Arc::new(EventService::new(SqlxEventRepository::boxed(pool.clone()))),
            news_service: Arc::new(NewsService::new(SqlxNewsRepository::boxed(pool))),
        }
    }
}

/// Error response for API errors
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiError {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorDetail {
    /// Machine-readable code, e.g. `NOT_FOUND`
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ApiErrorDetail {
                code: code.into(),
                message: message.into(),
            },
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.error.code.as_str() {
            "NOT_FOUND" => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(self)).into_response()
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            err @ CatalogError::NotFound { .. } => Self::not_found(err.to_string()),
            CatalogError::Storage(cause) => {
                tracing::error!(error = ?cause, "Storage failure while serving request");
                Self::internal_error("Internal server error")
            }
        }
    }
}

/// Record id taken from the `{id}` path segment.
///
/// A segment that is not an `i64` can't name any record, so it gets the JSON
/// 404 body instead of axum's plain-text path rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordId(pub i64);

impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let raw = match Path::<String>::from_request_parts(parts, state).await {
            Ok(Path(raw)) => raw,
            Err(_) => return Err(ApiError::not_found(format!("No route for {}", parts.uri.path()))),
        };

        raw.parse()
            .map(Self)
            .map_err(|_| ApiError::not_found(format!("No record with id {}", raw)))
    }
}

/// Collections served as `/<name>/` and `/<name>/{id}/`.
const COLLECTIONS: [&str; 4] = ["parques", "trilhas", "eventos", "novidades"];

/// Whether `path` (without its trailing slash) names a route once the slash is added.
fn routes_with_slash(path: &str) -> bool {
    let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();
    match segments.as_slice() {
        ["api", "schema"] => true,
        [collection] | [collection, _] => COLLECTIONS.contains(collection),
        _ => false,
    }
}

/// Fallback for unknown routes.
///
/// A slash-less path that matches a route is permanently redirected to the
/// slashed form, query string included. Anything else gets the usual error body.
pub async fn not_found_fallback(uri: Uri) -> Response {
    let path = uri.path();
    if !path.ends_with('/') && routes_with_slash(path) {
        let location = match uri.query() {
            Some(query) => format!("{}/?{}", path, query),
            None => format!("{}/", path),
        };
        return Redirect::permanent(&location).into_response();
    }

    ApiError::not_found(format!("No route for {}", path)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let err = ApiError::from(CatalogError::NotFound {
            resource: "Trail",
            id: 5,
        });

        assert_eq!(err.error.code, "NOT_FOUND");
        assert_eq!(err.error.message, "Trail not found: 5");
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_storage_error_is_not_echoed() {
        let err = ApiError::from(CatalogError::Storage(anyhow::anyhow!(
            "no such table: trilhas"
        )));

        assert_eq!(err.error.code, "INTERNAL_ERROR");
        assert!(!err.error.message.contains("trilhas"));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_routes_with_slash() {
        for path in ["/parques", "/trilhas/7", "/eventos/abc", "/novidades", "/api/schema"] {
            assert!(routes_with_slash(path), "{path}");
        }
        for path in ["/", "/usuarios", "/usuarios/1", "/trilhas/1/extra", "/api"] {
            assert!(!routes_with_slash(path), "{path}");
        }
    }

    #[test]
    fn test_error_body_shape() {
        let body = serde_json::to_value(ApiError::not_found("missing")).unwrap();

        assert_eq!(
            body,
            serde_json::json!({"error": {"code": "NOT_FOUND", "message": "missing"}})
        );
    }
}
