//! Configuration for the OpenAI-compatible engine.

use journal_core::EngineError;
use std::env;

/// Configuration for [`OpenAiEngine`](crate::OpenAiEngine).
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Base URL of the OpenAI-compatible API.
    pub api_url: String,

    /// API key for authentication.
    pub api_key: String,

    /// Model name to use.
    pub model: String,

    /// Maximum tokens for response.
    pub max_tokens: Option<u32>,

    /// Temperature for generation (0.0 - 2.0).
    pub temperature: Option<f32>,
}

impl EngineConfig {
    /// Create configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `JOURNAL_API_KEY` - API key for authentication
    ///
    /// Optional environment variables:
    /// - `JOURNAL_API_URL` - API URL (default: https://api.openai.com)
    /// - `JOURNAL_MODEL` - Model name (default: gpt-4o-mini)
    /// - `JOURNAL_MAX_TOKENS` - Max tokens (default: 1024)
    /// - `JOURNAL_TEMPERATURE` - Temperature (default: 0.7)
    pub fn from_env() -> Result<Self, EngineError> {
        let api_key = env::var("JOURNAL_API_KEY")
            .map_err(|_| EngineError::Configuration("JOURNAL_API_KEY not set".to_string()))?;

        let api_url =
            env::var("JOURNAL_API_URL").unwrap_or_else(|_| "https://api.openai.com".to_string());

        let model = env::var("JOURNAL_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());

        let max_tokens = env::var("JOURNAL_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(Some(1024));

        let temperature = env::var("JOURNAL_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(Some(0.7));

        Ok(Self {
            api_url,
            api_key,
            model,
            max_tokens,
            temperature,
        })
    }

    /// Create a configuration with explicit values, for tests and tools.
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            api_url: api_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            max_tokens: Some(1024),
            temperature: Some(0.7),
        }
    }
}
