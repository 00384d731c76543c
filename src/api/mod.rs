//! API layer - HTTP handlers and routing
//!
//! Read-only endpoints of the catalog:
//! - Park endpoints (`/parques/`)
//! - Trail endpoints (`/trilhas/`)
//! - Event endpoints (`/eventos/`)
//! - News endpoints (`/novidades/`)
//! - OpenAPI document (`/api/schema/`) and Swagger UI (`/api/docs/`)
//!
//! Every route ends with a slash; the slash-less form is redirected.

pub mod events;
pub mod middleware;
pub mod news;
pub mod openapi;
pub mod parks;
pub mod responses;
pub mod trails;

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use middleware::{ApiError, AppState};

/// Build the API router (without middleware or state)
pub fn build_api_router() -> Router<AppState> {
    Router::new()
        .merge(parks::router())
        .merge(trails::router())
        .merge(events::router())
        .merge(news::router())
        .route("/api/schema/", get(openapi::schema))
        .merge(openapi::swagger_ui())
}

/// Build the CORS layer from configured origins.
///
/// Origins that are not valid header values are skipped with a warning.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}

/// Build the complete router with middleware
pub fn build_router(state: AppState, cors_origins: &[String]) -> Router {
    build_api_router()
        .fallback(middleware::not_found_fallback)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(cors_origins)),
        )
        .with_state(state)
}
