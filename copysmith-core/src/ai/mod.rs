//! AI client module for LLM integration via OpenRouter.
//!
//! This module provides:
//! - `AiClient` trait for abstracting the completion provider
//! - `OpenRouterClient`, the real implementation over reqwest
//! - `FakeAiClient` for tests
//! - Configuration via environment variables
//! - Prompt templates
//!
//! # Configuration
//!
//! - `OPENROUTER_KEY`: Your OpenRouter API key (needed for remote generation only)
//! - `COPYSMITH_AI_MODEL` (optional): Model name, e.g., "openai/gpt-4o-mini"
//! - `COPYSMITH_AI_BASE_URL` (optional): API base URL
//! - `COPYSMITH_AI_REFERER` / `COPYSMITH_AI_TITLE` (optional): attribution headers
//! - `COPYSMITH_AI_TEMPERATURE` (optional): Sampling temperature

mod client;
mod config;
mod fake;
pub mod prompts;
mod types;

pub use client::{AiClient, AiError, OpenRouterClient};
pub use config::{
    AiConfig, API_KEY_ENV, DEFAULT_APP_TITLE, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_REFERER,
    DEFAULT_TEMPERATURE,
};
pub use fake::{FakeAiClient, RecordedCall};
pub use types::{ChatMessage, ChatRequest, ChatResponse, Role};
