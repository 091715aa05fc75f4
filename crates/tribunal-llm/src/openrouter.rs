//! OpenRouter LLM provider

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::config::{ConfigError, LlmConfig};
use crate::provider::{LlmError, LlmProvider, LlmRequest, LlmResponse};

/// Chat-completions request format
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

/// Chat-completions response format
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    model: String,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Debug, Deserialize)]
struct MessageContent {
    content: String,
}

#[derive(Debug, Deserialize)]
struct Usage {
    total_tokens: u32,
}

/// OpenRouter provider.
///
/// Works against any OpenRouter-compatible chat-completions endpoint with
/// bearer-token auth.
#[derive(Debug)]
pub struct OpenRouterProvider {
    /// API key
    api_key: String,
    /// Model to use (e.g. "meta-llama/llama-3.3-70b-instruct:free")
    model: String,
    /// HTTP client
    client: reqwest::Client,
    /// Base URL
    base_url: String,
    /// Output token bound applied when the request does not set one lower
    max_tokens: u32,
}

impl OpenRouterProvider {
    /// Create a new OpenRouter provider
    pub fn new(api_key: &str, model: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            model: model.to_string(),
            client: reqwest::Client::new(),
            base_url: "https://openrouter.ai/api/v1".to_string(),
            max_tokens: 2048,
        }
    }

    /// Create a provider from an environment-sourced configuration
    pub fn from_config(config: &LlmConfig) -> Result<Self, ConfigError> {
        let api_key = config
            .openrouter_api_key
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("OPENROUTER_API_KEY".to_string()))?;

        Ok(Self {
            api_key: api_key.to_string(),
            model: config.model.clone(),
            client: reqwest::Client::new(),
            base_url: config.base_url.clone(),
            max_tokens: config.max_tokens,
        })
    }

    /// Override the base URL (self-hosted gateways, tests)
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Model identifier this provider completes with
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl LlmProvider for OpenRouterProvider {
    fn name(&self) -> &str {
        "openrouter"
    }

    async fn is_available(&self) -> bool {
        self.client
            .get(format!("{}/models", self.base_url))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    async fn complete(&self, request: LlmRequest) -> Result<LlmResponse, LlmError> {
        let start = Instant::now();
        let url = format!("{}/chat/completions", self.base_url);

        let messages = vec![
            Message {
                role: "system".to_string(),
                content: request.system,
            },
            Message {
                role: "user".to_string(),
                content: request.prompt,
            },
        ];

        let chat_request = ChatRequest {
            model: self.model.clone(),
            messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens.min(self.max_tokens),
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&chat_request)
            .send()
            .await
            .map_err(|e| LlmError::ConnectionFailed(e.to_string()))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::RequestFailed(format!(
                "Status: {}, Body: {}",
                status, body
            )));
        }

        let api_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        let content = api_response
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .ok_or_else(|| LlmError::InvalidResponse("No choices in response".to_string()))?;

        Ok(LlmResponse {
            content,
            model: api_response.model,
            tokens_used: api_response.usage.map(|u| u.total_tokens),
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_requires_key() {
        let config = LlmConfig::default();
        assert!(matches!(
            OpenRouterProvider::from_config(&config),
            Err(ConfigError::MissingEnvVar(_))
        ));
    }

    #[test]
    fn test_from_config_carries_settings() {
        let config = LlmConfig {
            openrouter_api_key: Some("sk-test".to_string()),
            model: "openai/gpt-oss-20b:free".to_string(),
            base_url: "https://gateway.example/api/v1".to_string(),
            max_tokens: 400,
        };
        let provider = OpenRouterProvider::from_config(&config).unwrap();
        assert_eq!(provider.model(), "openai/gpt-oss-20b:free");
        assert_eq!(provider.max_tokens, 400);
    }
}
