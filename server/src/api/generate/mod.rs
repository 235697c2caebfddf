//! Product description endpoints.

pub mod create;
pub mod fallback;

use crate::AppState;
use axum::routing::post;
use axum::Router;
use serde::de::DeserializeOwned;
use utoipa::OpenApi;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/generate", post(create::generate))
        .route("/api/generate/fallback", post(fallback::generate_fallback))
}

#[derive(OpenApi)]
#[openapi(
    paths(create::generate, fallback::generate_fallback),
    components(schemas(
        create::GenerateRequest,
        fallback::FallbackRequest,
        HtmlResponse
    ))
)]
pub struct ApiDoc;

/// Generated description.
#[derive(Debug, Clone, serde::Serialize, utoipa::ToSchema)]
pub struct HtmlResponse {
    pub html: String,
}

/// Decode a JSON request body without looking at its `Content-Type`.
///
/// Browsers and `curl -d` often send JSON as `text/plain` or form data.
fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, serde_json::Error> {
    serde_json::from_slice(body)
}
