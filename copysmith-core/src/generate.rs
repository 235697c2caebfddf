//! Remote description generation: validate, prompt, call the model, clean up.

use std::sync::Arc;

use crate::ai::prompts::product_description::{
    render_product_description_system_prompt, render_product_description_user_prompt,
    PRODUCT_DESCRIPTION_PROMPT_NAME,
};
use crate::ai::{AiClient, AiConfig, ChatMessage, ChatRequest, OpenRouterClient, API_KEY_ENV};
use crate::error::GenerateError;
use crate::types::{GeneratedHtml, GenerationRequest};

const FENCE: &str = "```";
const FENCE_LANGUAGE: &str = "html";

/// Remove a markdown code fence the model may have wrapped its answer in.
///
/// The text is trimmed first. If it starts with a fence, the fence and an
/// optional `html` tag (any case) are dropped along with one closing fence
/// at the very end, and the rest is trimmed again.
pub fn strip_code_fences(text: &str) -> String {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix(FENCE) else {
        return trimmed.to_string();
    };

    let rest = match rest.get(..FENCE_LANGUAGE.len()) {
        Some(tag) if tag.eq_ignore_ascii_case(FENCE_LANGUAGE) => &rest[FENCE_LANGUAGE.len()..],
        _ => rest,
    };
    let rest = rest.strip_suffix(FENCE).unwrap_or(rest);

    rest.trim().to_string()
}

/// Produces product descriptions through the configured AI client.
///
/// Holds no per-request state; one instance serves any number of concurrent
/// calls.
pub struct Generator {
    config: AiConfig,
    client: Arc<dyn AiClient>,
}

impl Generator {
    pub fn new(config: AiConfig, client: Arc<dyn AiClient>) -> Self {
        Self { config, client }
    }

    /// Generator backed by OpenRouter.
    pub fn from_config(config: AiConfig) -> Self {
        let client = Arc::new(OpenRouterClient::new(&config));
        Self::new(config, client)
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    fn chat_request(&self, request: &GenerationRequest) -> ChatRequest {
        let user_prompt = render_product_description_user_prompt(
            &request.title,
            &request.raw_info,
            &request.brand,
        );

        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage::system(render_product_description_system_prompt()),
                ChatMessage::user(user_prompt),
            ],
            temperature: Some(self.config.temperature),
        }
    }

    /// Generate a description with one remote call.
    ///
    /// Fails without calling out when a field is empty or no API key is
    /// configured. A response without message content yields empty HTML.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GeneratedHtml, GenerateError> {
        let missing = request.missing_fields();
        if !missing.is_empty() {
            return Err(GenerateError::Validation { missing });
        }

        let chat_request = self.chat_request(request);

        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| GenerateError::Configuration(API_KEY_ENV.to_string()))?;

        tracing::debug!(
            title = %request.title,
            model = %self.config.model,
            "Generating product description"
        );

        let response = self
            .client
            .complete(PRODUCT_DESCRIPTION_PROMPT_NAME, api_key, chat_request)
            .await
            .map_err(|e| {
                tracing::warn!(title = %request.title, "AI call failed: {}", e);
                GenerateError::from(e)
            })?;

        let html = strip_code_fences(response.content.as_deref().unwrap_or_default());

        Ok(GeneratedHtml { html })
    }
}
