//! AI client implementation using OpenRouter (OpenAI-compatible API).

use async_trait::async_trait;
use thiserror::Error;

use super::config::AiConfig;
use super::types::{ChatRequest, ChatResponse, CompletionBody};

#[derive(Error, Debug)]
pub enum AiError {
    #[error("API request failed: {0}")]
    Request(String),

    #[error("API returned error: {status}")]
    Upstream { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

/// Trait for AI clients.
///
/// Implementations make exactly one call per `complete` and never retry.
#[async_trait]
pub trait AiClient: Send + Sync {
    /// Complete a chat request, authenticating with `api_key`.
    ///
    /// The `prompt_name` identifies the prompt in logs.
    async fn complete(
        &self,
        prompt_name: &str,
        api_key: &str,
        request: ChatRequest,
    ) -> Result<ChatResponse, AiError>;
}

/// OpenRouter chat-completions client.
pub struct OpenRouterClient {
    client: reqwest::Client,
    endpoint: String,
    referer: String,
    app_title: String,
}

impl OpenRouterClient {
    /// Create a new client with the given configuration.
    pub fn new(config: &AiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            referer: config.referer.clone(),
            app_title: config.app_title.clone(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AiClient for OpenRouterClient {
    async fn complete(
        &self,
        prompt_name: &str,
        api_key: &str,
        request: ChatRequest,
    ) -> Result<ChatResponse, AiError> {
        tracing::debug!(
            prompt_name = prompt_name,
            model = %request.model,
            "Calling AI API"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .header("content-type", "application/json")
            .header("HTTP-Referer", &self.referer)
            .header("X-Title", &self.app_title)
            .json(&request)
            .send()
            .await
            .map_err(|e| AiError::Request(e.to_string()))?;

        let status = response.status();

        let body = response
            .text()
            .await
            .map_err(|e| AiError::Request(e.to_string()))?;

        if !status.is_success() {
            return Err(AiError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: CompletionBody =
            serde_json::from_str(&body).map_err(|e| AiError::Parse(e.to_string()))?;

        Ok(parsed.into())
    }
}
