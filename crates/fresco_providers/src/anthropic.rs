//! Anthropic messages API client (text generation).

use crate::{
    ProviderSettings, RetryPolicy, TextGenerator, TextOutput, TextRequest, retry::with_backoff,
};
use async_trait::async_trait;
use fresco_error::{ConfigError, ProviderError, ProviderErrorKind};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, instrument};

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const DEFAULT_MODEL: &str = "claude-3-5-haiku-latest";
const API_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Anthropic API request body.
#[derive(Debug, Clone, Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<AnthropicMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// Anthropic message with plain-string content.
#[derive(Debug, Clone, Serialize)]
struct AnthropicMessage {
    role: &'static str,
    content: String,
}

/// Anthropic API response body.
#[derive(Debug, Clone, Deserialize)]
struct AnthropicResponse {
    #[serde(default)]
    content: Vec<AnthropicContent>,
}

/// Content block in an Anthropic response.
#[derive(Debug, Clone, Deserialize)]
struct AnthropicContent {
    #[serde(rename = "type")]
    content_type: String,
    #[serde(default)]
    text: Option<String>,
}

/// Anthropic HTTP client.
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    retry: RetryPolicy,
}

impl AnthropicClient {
    /// Creates a client from provider settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_settings(
        settings: &ProviderSettings,
        timeout: Duration,
        retry: RetryPolicy,
    ) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: settings.api_key().clone(),
            model: settings
                .model()
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: settings
                .base_url()
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            retry,
        })
    }

    async fn send_once(&self, request: &AnthropicRequest) -> Result<TextOutput, ProviderError> {
        let url = format!("{}/v1/messages", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(provider = "anthropic", error = %e, "HTTP request failed");
                ProviderError::new(ProviderErrorKind::Http(e.to_string()))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(provider = "anthropic", status = %status, body = %body, "API error");
            return Err(ProviderError::new(ProviderErrorKind::Api {
                status: status.as_u16(),
                message: body,
            }));
        }

        let parsed: AnthropicResponse = response.json().await.map_err(|e| {
            ProviderError::new(ProviderErrorKind::MalformedResponse(format!(
                "Failed to parse JSON: {}",
                e
            )))
        })?;

        let text = parsed
            .content
            .iter()
            .filter(|block| block.content_type == "text")
            .filter_map(|block| block.text.as_deref())
            .collect::<Vec<_>>()
            .join("\n");

        if text.is_empty() {
            return Err(ProviderError::new(ProviderErrorKind::MalformedResponse(
                "No text content block in response".to_string(),
            )));
        }

        Ok(TextOutput::new(text))
    }
}

#[async_trait]
impl TextGenerator for AnthropicClient {
    #[instrument(skip(self, request), fields(provider = "anthropic", model = %self.model))]
    async fn generate_text(&self, request: &TextRequest) -> Result<TextOutput, ProviderError> {
        let body = AnthropicRequest {
            model: self.model.clone(),
            max_tokens: request.max_tokens().unwrap_or(DEFAULT_MAX_TOKENS),
            messages: vec![AnthropicMessage {
                role: "user",
                content: request.prompt().clone(),
            }],
            system: request.system().clone(),
            temperature: *request.temperature(),
        };

        debug!(
            provider = "anthropic",
            model = %self.model,
            prompt_chars = request.prompt().len(),
            "Sending text generation request"
        );

        with_backoff(self.retry, "anthropic", || self.send_once(&body)).await
    }

    fn service(&self) -> &'static str {
        "anthropic"
    }

    fn model(&self) -> &str {
        &self.model
    }
}
