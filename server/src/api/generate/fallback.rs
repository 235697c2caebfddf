use super::{decode_body, HtmlResponse};
use crate::api::ErrorResponse;
use axum::body::Bytes;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use copysmith_core::render_fallback;
use serde::Deserialize;
use utoipa::ToSchema;

/// Request body for the local fallback. Brand is not used.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct FallbackRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub raw_info: Option<String>,
}

/// Render a product description locally
///
/// Builds a simple HTML description from the title and raw details without
/// calling the model. Intended for when `/api/generate` fails. Needs no API
/// key and always gives the same output for the same input.
#[utoipa::path(
    post,
    path = "/api/generate/fallback",
    tag = "generate",
    request_body = FallbackRequest,
    responses(
        (status = 200, description = "Rendered HTML", body = HtmlResponse),
        (status = 400, description = "Title or raw info is empty", body = ErrorResponse),
        (status = 500, description = "Unreadable request body", body = ErrorResponse)
    )
)]
pub async fn generate_fallback(body: Bytes) -> Response {
    let body = match decode_body::<FallbackRequest>(&body) {
        Ok(body) => body,
        Err(e) => {
            return ErrorResponse::with_detail("Server error", e.to_string())
                .into_response_with(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let title = body.title.unwrap_or_default();
    let raw_info = body.raw_info.unwrap_or_default();

    let missing: Vec<&str> = [("title", &title), ("raw_info", &raw_info)]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect();
    if !missing.is_empty() {
        return ErrorResponse::with_detail("Missing fields", missing.join(", "))
            .into_response_with(StatusCode::BAD_REQUEST);
    }

    let html = render_fallback(&title, &raw_info);
    (StatusCode::OK, Json(HtmlResponse { html })).into_response()
}
