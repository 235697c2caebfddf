use super::{decode_body, HtmlResponse};
use crate::api::ErrorResponse;
use crate::AppState;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use copysmith_core::{GenerateError, GenerationRequest};
use serde::Deserialize;
use utoipa::ToSchema;

/// Request body for remote generation. Absent or null fields count as empty.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct GenerateRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub raw_info: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
}

impl From<GenerateRequest> for GenerationRequest {
    fn from(body: GenerateRequest) -> Self {
        GenerationRequest::new(
            body.title.unwrap_or_default(),
            body.brand.unwrap_or_default(),
            body.raw_info.unwrap_or_default(),
        )
    }
}

/// Map a generation failure onto the public error contract.
fn error_response(err: GenerateError) -> Response {
    match err {
        GenerateError::Validation { missing } => {
            ErrorResponse::with_detail("Missing fields", missing.join(", "))
                .into_response_with(StatusCode::BAD_REQUEST)
        }
        GenerateError::Configuration(name) => ErrorResponse::new(format!("Missing {}", name))
            .into_response_with(StatusCode::INTERNAL_SERVER_ERROR),
        GenerateError::Upstream { body, .. } => {
            ErrorResponse::with_detail("OpenRouter error", body)
                .into_response_with(StatusCode::BAD_GATEWAY)
        }
        GenerateError::Unexpected(message) => server_error(message),
    }
}

fn server_error(message: String) -> Response {
    let detail = if message.is_empty() {
        "Unknown error".to_string()
    } else {
        message
    };
    ErrorResponse::with_detail("Server error", detail)
        .into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Generate a product description with the LLM
///
/// The body is read as JSON whatever its `Content-Type`.
///
/// Sends the title, raw details and brand to the model inside a fixed
/// WooCommerce prompt and returns the HTML it writes, with any markdown code
/// fence removed. Makes exactly one upstream call and never retries.
#[utoipa::path(
    post,
    path = "/api/generate",
    tag = "generate",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Generated HTML", body = HtmlResponse),
        (status = 400, description = "A required field is empty", body = ErrorResponse),
        (status = 500, description = "Missing API key or unexpected failure", body = ErrorResponse),
        (status = 502, description = "Upstream model returned an error", body = ErrorResponse)
    )
)]
pub async fn generate(
    State(generator): State<AppState>,
    body: Bytes,
) -> impl IntoResponse {
    let request: GenerationRequest = match decode_body::<GenerateRequest>(&body) {
        Ok(body) => body.into(),
        Err(e) => {
            tracing::warn!("Unreadable generate request: {}", e);
            return server_error(e.to_string());
        }
    };

    match generator.generate(&request).await {
        Ok(generated) => (
            StatusCode::OK,
            Json(HtmlResponse {
                html: generated.html,
            }),
        )
            .into_response(),
        Err(e) => {
            if matches!(e, GenerateError::Configuration(_)) {
                tracing::error!("Generation unavailable: {}", e);
            }
            error_response(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{app, post_json, post_raw};
    use axum::http::StatusCode;
    use copysmith_core::ai::{AiConfig, FakeAiClient};
    use serde_json::json;
    use std::sync::Arc;

    const LUMEN: &str = r#"{"title":"Lumen Mirror","brand":"Lumina Studio","raw_info":"- LED backlight\n- Shatterproof glass"}"#;

    #[tokio::test]
    async fn test_generate_success() {
        let client = Arc::new(FakeAiClient::with_content("```html\n<p>X</p>\n```"));
        let (status, body) = post_json(
            app(client.clone(), AiConfig::with_api_key("sk-test")),
            "/api/generate",
            LUMEN,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "html": "<p>X</p>" }));
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_generate_without_content_type() {
        let client = Arc::new(FakeAiClient::with_content("<p>X</p>"));
        let (status, body) = post_raw(
            app(client.clone(), AiConfig::with_api_key("sk-test")),
            "/api/generate",
            None,
            r#"{"title":"T","brand":"B","raw_info":"R"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "html": "<p>X</p>" }));
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_generate_with_text_content_type() {
        let client = Arc::new(FakeAiClient::with_content("<p>X</p>"));
        let (status, _) = post_raw(
            app(client, AiConfig::with_api_key("sk-test")),
            "/api/generate",
            Some("text/plain;charset=UTF-8"),
            LUMEN,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_generate_empty_body_is_server_error() {
        let client = Arc::new(FakeAiClient::with_content("<p>X</p>"));
        let (status, body) = post_raw(
            app(client.clone(), AiConfig::with_api_key("sk-test")),
            "/api/generate",
            None,
            "",
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Server error");
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn test_generate_missing_fields() {
        let client = Arc::new(FakeAiClient::with_content("<p>X</p>"));
        let (status, body) = post_json(
            app(client.clone(), AiConfig::with_api_key("sk-test")),
            "/api/generate",
            r#"{"title":"Lumen Mirror","raw_info":null}"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing fields");
        assert_eq!(body["detail"], "raw_info, brand");
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn test_generate_missing_key() {
        let client = Arc::new(FakeAiClient::with_content("<p>X</p>"));
        let (status, body) =
            post_json(app(client.clone(), AiConfig::default()), "/api/generate", LUMEN).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Missing OPENROUTER_KEY" }));
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn test_generate_upstream_error_is_bad_gateway() {
        let upstream = r#"{"error":{"message":"Rate limit exceeded","code":429}}"#;
        let client = Arc::new(FakeAiClient::with_upstream_error(429, upstream));
        let (status, body) = post_json(
            app(client, AiConfig::with_api_key("sk-test")),
            "/api/generate",
            LUMEN,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], "OpenRouter error");
        assert_eq!(body["detail"], upstream);
    }

    #[tokio::test]
    async fn test_generate_transport_failure_is_server_error() {
        let client = Arc::new(FakeAiClient::with_request_failure("dns error"));
        let (status, body) = post_json(
            app(client, AiConfig::with_api_key("sk-test")),
            "/api/generate",
            LUMEN,
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Server error");
        assert!(body["detail"].as_str().unwrap().contains("dns error"));
    }

    #[tokio::test]
    async fn test_generate_malformed_body_is_server_error() {
        let client = Arc::new(FakeAiClient::with_content("<p>X</p>"));
        let (status, body) = post_json(
            app(client.clone(), AiConfig::with_api_key("sk-test")),
            "/api/generate",
            "{not json",
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Server error");
        assert!(body["detail"].is_string());
        assert_eq!(client.call_count(), 0);
    }
}
