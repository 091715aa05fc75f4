//! Configuration for the reasoning collaborator
//!
//! API keys and endpoint settings are sourced from the environment once at
//! startup and passed to constructors explicitly, never read ambiently.

use serde::{Deserialize, Serialize};
use std::env;

/// Error types for configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Reasoning-collaborator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// OpenRouter API key (env: OPENROUTER_API_KEY)
    pub openrouter_api_key: Option<String>,
    /// Model identifier (env: TRIBUNAL_MODEL)
    pub model: String,
    /// Chat-completions base URL (env: OPENROUTER_BASE_URL)
    pub base_url: String,
    /// Maximum output tokens per completion
    pub max_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            openrouter_api_key: None,
            model: "meta-llama/llama-3.3-70b-instruct:free".to_string(),
            base_url: "https://openrouter.ai/api/v1".to_string(),
            max_tokens: 2048,
        }
    }
}

impl LlmConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            openrouter_api_key: env::var("OPENROUTER_API_KEY").ok(),
            model: env::var("TRIBUNAL_MODEL").unwrap_or(defaults.model),
            base_url: env::var("OPENROUTER_BASE_URL").unwrap_or(defaults.base_url),
            max_tokens: env::var("TRIBUNAL_MAX_TOKENS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_tokens),
        }
    }

    /// Whether a hosted reasoning collaborator can be constructed
    pub fn is_configured(&self) -> bool {
        self.openrouter_api_key.is_some()
    }
}
