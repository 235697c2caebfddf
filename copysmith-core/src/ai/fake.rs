//! Fake AI client for testing.
//!
//! Returns a fixed outcome for every call and records what it was asked,
//! so tests can run without network access or API costs.

use super::{AiClient, AiError, ChatRequest, ChatResponse};
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Clone)]
enum Outcome {
    Content(Option<String>),
    Upstream { status: u16, body: String },
    RequestFailure(String),
}

/// One call seen by a [`FakeAiClient`].
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub prompt_name: String,
    pub api_key: String,
    pub request: ChatRequest,
}

/// A fake AI client for testing.
#[derive(Debug)]
pub struct FakeAiClient {
    outcome: Outcome,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeAiClient {
    fn with_outcome(outcome: Outcome) -> Self {
        Self {
            outcome,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every call succeeds with `content` as the first choice's text.
    pub fn with_content(content: &str) -> Self {
        Self::with_outcome(Outcome::Content(Some(content.to_string())))
    }

    /// Every call succeeds but the response carries no message content.
    pub fn without_content() -> Self {
        Self::with_outcome(Outcome::Content(None))
    }

    /// Every call fails as if the upstream answered with `status` and `body`.
    pub fn with_upstream_error(status: u16, body: &str) -> Self {
        Self::with_outcome(Outcome::Upstream {
            status,
            body: body.to_string(),
        })
    }

    /// Every call fails before reaching the upstream.
    pub fn with_request_failure(message: &str) -> Self {
        Self::with_outcome(Outcome::RequestFailure(message.to_string()))
    }

    fn lock_calls(&self) -> MutexGuard<'_, Vec<RecordedCall>> {
        self.calls.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Calls received so far, oldest first.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock_calls().clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock_calls().len()
    }
}

#[async_trait]
impl AiClient for FakeAiClient {
    async fn complete(
        &self,
        prompt_name: &str,
        api_key: &str,
        request: ChatRequest,
    ) -> Result<ChatResponse, AiError> {
        self.lock_calls().push(RecordedCall {
            prompt_name: prompt_name.to_string(),
            api_key: api_key.to_string(),
            request,
        });

        match &self.outcome {
            Outcome::Content(content) => Ok(ChatResponse {
                content: content.clone(),
            }),
            Outcome::Upstream { status, body } => Err(AiError::Upstream {
                status: *status,
                body: body.clone(),
            }),
            Outcome::RequestFailure(message) => Err(AiError::Request(message.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::ChatMessage;

    fn request() -> ChatRequest {
        ChatRequest {
            model: "fake-model".to_string(),
            messages: vec![ChatMessage::user("hello")],
            temperature: None,
        }
    }

    #[tokio::test]
    async fn test_fake_returns_content_and_records() {
        let client = FakeAiClient::with_content("world");
        let response = client.complete("greeting", "key", request()).await.unwrap();
        assert_eq!(response.content.as_deref(), Some("world"));

        let calls = client.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].prompt_name, "greeting");
        assert_eq!(calls[0].api_key, "key");
        assert_eq!(calls[0].request.messages[0].content, "hello");
    }

    #[tokio::test]
    async fn test_fake_upstream_error() {
        let client = FakeAiClient::with_upstream_error(503, "overloaded");
        let err = client.complete("greeting", "key", request()).await.unwrap_err();
        assert!(matches!(err, AiError::Upstream { status: 503, ref body } if body == "overloaded"));
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_fake_request_failure() {
        let client = FakeAiClient::with_request_failure("connection reset");
        let err = client.complete("greeting", "key", request()).await.unwrap_err();
        assert!(matches!(err, AiError::Request(_)));
    }
}
