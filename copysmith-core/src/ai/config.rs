//! AI configuration from environment variables.

use std::env;

/// Environment variable holding the OpenRouter API key.
pub const API_KEY_ENV: &str = "OPENROUTER_KEY";

/// Default OpenRouter base URL.
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Default model to use.
pub const DEFAULT_MODEL: &str = "openai/gpt-4o-mini";

/// Default `HTTP-Referer` attribution header.
pub const DEFAULT_REFERER: &str = "http://localhost";

/// Default `X-Title` attribution header.
pub const DEFAULT_APP_TITLE: &str = "Description Generator";

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// AI client configuration.
///
/// Built once at startup and handed to the [`Generator`](crate::Generator),
/// so nothing downstream reads the process environment.
#[derive(Clone)]
pub struct AiConfig {
    /// API key for OpenRouter. `None` disables the remote path.
    pub api_key: Option<String>,
    /// Model name (e.g., "openai/gpt-4o-mini").
    pub model: String,
    /// Base URL for the API, without the `/chat/completions` suffix.
    pub base_url: String,
    pub referer: String,
    pub app_title: String,
    pub temperature: f32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            referer: DEFAULT_REFERER.to_string(),
            app_title: DEFAULT_APP_TITLE.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

// The key never shows up in logs.
impl std::fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("referer", &self.referer)
            .field("app_title", &self.app_title)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl AiConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional (a missing key only fails the remote path, at call time):
    /// - `OPENROUTER_KEY`: API key for OpenRouter
    ///
    /// Optional with defaults:
    /// - `COPYSMITH_AI_MODEL`: Model name (default: "openai/gpt-4o-mini")
    /// - `COPYSMITH_AI_BASE_URL`: API base URL (default: "https://openrouter.ai/api/v1")
    /// - `COPYSMITH_AI_REFERER`: `HTTP-Referer` header (default: "http://localhost")
    /// - `COPYSMITH_AI_TITLE`: `X-Title` header (default: "Description Generator")
    /// - `COPYSMITH_AI_TEMPERATURE`: Sampling temperature (default: 0.7)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_key = lookup(API_KEY_ENV).filter(|k| !k.is_empty());

        let model = lookup("COPYSMITH_AI_MODEL").unwrap_or(defaults.model);

        let base_url = lookup("COPYSMITH_AI_BASE_URL").unwrap_or(defaults.base_url);

        let referer = lookup("COPYSMITH_AI_REFERER").unwrap_or(defaults.referer);

        let app_title = lookup("COPYSMITH_AI_TITLE").unwrap_or(defaults.app_title);

        let temperature = lookup("COPYSMITH_AI_TEMPERATURE")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.temperature);

        Self {
            api_key,
            model,
            base_url,
            referer,
            app_title,
            temperature,
        }
    }

    /// Config with a key and defaults for everything else.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = AiConfig::from_lookup(lookup_from(&[]));
        assert!(config.api_key.is_none());
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.referer, DEFAULT_REFERER);
        assert_eq!(config.app_title, DEFAULT_APP_TITLE);
        assert_eq!(config.temperature, DEFAULT_TEMPERATURE);
    }

    #[test]
    fn test_overrides() {
        let config = AiConfig::from_lookup(lookup_from(&[
            ("OPENROUTER_KEY", "sk-test"),
            ("COPYSMITH_AI_MODEL", "anthropic/claude-3.5-haiku"),
            ("COPYSMITH_AI_BASE_URL", "http://127.0.0.1:9999/v1"),
            ("COPYSMITH_AI_TEMPERATURE", "0.2"),
        ]));
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.model, "anthropic/claude-3.5-haiku");
        assert_eq!(config.base_url, "http://127.0.0.1:9999/v1");
        assert_eq!(config.temperature, 0.2);
    }

    #[test]
    fn test_empty_key_counts_as_missing() {
        let config = AiConfig::from_lookup(lookup_from(&[("OPENROUTER_KEY", "")]));
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_bad_temperature_falls_back() {
        let config = AiConfig::from_lookup(lookup_from(&[("COPYSMITH_AI_TEMPERATURE", "warm")]));
        assert_eq!(config.temperature, DEFAULT_TEMPERATURE);
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = AiConfig::with_api_key("sk-secret");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
