//! OpenAPI document
//!
//! Generated from the handler annotations and payload types with utoipa.
//! Served as JSON at `/api/schema/`, browsable through Swagger UI at
//! `/api/docs/` and printed as YAML by the `generate-openapi` binary.

use utoipa::OpenApi;
use utoipa_swagger_ui::{Config as SwaggerConfig, SwaggerUi};

use crate::api::middleware::{ApiError, ApiErrorDetail};
use crate::api::responses::{
    EventPayload, NewsPayload, OpeningHoursPayload, ParkPayload, ParkSummary, TrailPayload,
};
use crate::api::{events, news, parks, trails};
use crate::models::{DayOfWeek, TrailStatus};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "API Parques - Circuito Verde",
        version = "1.0.0",
        description = "Read-only catalog of parks, trails, events and news"
    ),
    paths(
        parks::list_parks,
        parks::get_park,
        trails::list_trails,
        trails::get_trail,
        events::list_events,
        events::get_event,
        news::list_news,
        news::get_news,
    ),
    components(schemas(
        ParkPayload,
        ParkSummary,
        OpeningHoursPayload,
        TrailPayload,
        EventPayload,
        NewsPayload,
        DayOfWeek,
        TrailStatus,
        ApiError,
        ApiErrorDetail,
    )),
    tags(
        (name = "Parque", description = "Parks and their opening hours"),
        (name = "Trilha", description = "Hiking trails"),
        (name = "Evento", description = "Events held in the parks"),
        (name = "Novidades", description = "News about parks and trails"),
    )
)]
pub struct ApiDoc;

/// GET /api/schema/
pub async fn schema() -> axum::Json<utoipa::openapi::OpenApi> {
    axum::Json(ApiDoc::openapi())
}

/// Swagger UI under `/api/docs/`, reading the document served by [`schema`].
///
/// Operation filter and deep links are on; the models section starts collapsed.
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/api/docs").config(
        SwaggerConfig::new(["/api/schema/"])
            .filter(true)
            .deep_linking(true)
            .default_models_expand_depth(-1),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_metadata() {
        let doc = ApiDoc::openapi();

        assert_eq!(doc.info.title, "API Parques - Circuito Verde");
        assert_eq!(doc.info.version, "1.0.0");
    }

    #[test]
    fn test_trail_length_documented_as_string() {
        let json = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let length = &json["components"]["schemas"]["TrailPayload"]["properties"]["extensao_km"];

        assert_eq!(length["type"], "string");
    }
}
