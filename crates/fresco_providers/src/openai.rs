//! OpenAI-compatible clients: chat completions (text) and image generations.
//!
//! The chat client works against any endpoint speaking the OpenAI chat
//! completions format (OpenAI, Groq, compatible gateways), which is why the
//! endpoint is part of the settings rather than hard-coded.

use crate::{
    ImageGenerator, ImageRequest, ProviderSettings, RetryPolicy, TextGenerator, TextOutput,
    TextRequest, retry::with_backoff,
};
use async_trait::async_trait;
use fresco_core::MediaSource;
use fresco_error::{ConfigError, ProviderError, ProviderErrorKind};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, instrument};

const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_IMAGE_MODEL: &str = "dall-e-3";

fn build_client(timeout: Duration) -> Result<reqwest::Client, ConfigError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ConfigError::new(format!("Failed to build HTTP client: {}", e)))
}

/// A message in the OpenAI chat format.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// OpenAI chat completion request.
#[derive(Debug, Clone, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// A choice in the OpenAI response.
#[derive(Debug, Clone, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// OpenAI chat completion response.
#[derive(Debug, Clone, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

/// Client for OpenAI-compatible chat completion endpoints.
#[derive(Debug, Clone)]
pub struct OpenAiChatClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    retry: RetryPolicy,
}

impl OpenAiChatClient {
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
        Ok(Self {
            client: build_client(timeout)?,
            api_key: settings.api_key().clone(),
            model: settings
                .model()
                .clone()
                .unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
            base_url: settings
                .base_url()
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            retry,
        })
    }

    async fn send_once(&self, request: &ChatRequest) -> Result<TextOutput, ProviderError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(provider = "openai", error = %e, "HTTP request failed");
                ProviderError::new(ProviderErrorKind::Http(e.to_string()))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(provider = "openai", status = %status, body = %body, "API error");
            return Err(ProviderError::new(ProviderErrorKind::Api {
                status: status.as_u16(),
                message: body,
            }));
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            ProviderError::new(ProviderErrorKind::MalformedResponse(format!(
                "Failed to parse JSON: {}",
                e
            )))
        })?;

        let choice = parsed.choices.into_iter().next().ok_or_else(|| {
            ProviderError::new(ProviderErrorKind::MalformedResponse(
                "Response contained no choices".to_string(),
            ))
        })?;

        Ok(TextOutput::new(choice.message.content))
    }
}

#[async_trait]
impl TextGenerator for OpenAiChatClient {
    #[instrument(skip(self, request), fields(provider = "openai", model = %self.model))]
    async fn generate_text(&self, request: &TextRequest) -> Result<TextOutput, ProviderError> {
        let mut messages = Vec::new();
        if let Some(system) = request.system() {
            messages.push(ChatMessage {
                role: "system".to_string(),
                content: system.clone(),
            });
        }
        messages.push(ChatMessage {
            role: "user".to_string(),
            content: request.prompt().clone(),
        });

        let body = ChatRequest {
            model: self.model.clone(),
            messages,
            max_tokens: *request.max_tokens(),
            temperature: *request.temperature(),
        };

        debug!(
            provider = "openai",
            model = %self.model,
            message_count = body.messages.len(),
            "Sending chat completion request"
        );

        with_backoff(self.retry, "openai", || self.send_once(&body)).await
    }

    fn service(&self) -> &'static str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// OpenAI image generation request.
#[derive(Debug, Clone, Serialize)]
struct ImageGenRequest {
    model: String,
    prompt: String,
    n: u8,
    size: String,
    response_format: &'static str,
}

/// A generated image in the OpenAI response.
#[derive(Debug, Clone, Deserialize)]
struct ImageDatum {
    #[serde(default)]
    b64_json: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

/// OpenAI image generation response.
#[derive(Debug, Clone, Deserialize)]
struct ImageGenResponse {
    #[serde(default)]
    data: Vec<ImageDatum>,
}

/// Client for OpenAI-compatible image generation endpoints.
#[derive(Debug, Clone)]
pub struct OpenAiImageClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    retry: RetryPolicy,
}

impl OpenAiImageClient {
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
        Ok(Self {
            client: build_client(timeout)?,
            api_key: settings.api_key().clone(),
            model: settings
                .model()
                .clone()
                .unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string()),
            base_url: settings
                .base_url()
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            retry,
        })
    }

    async fn send_once(&self, request: &ImageGenRequest) -> Result<MediaSource, ProviderError> {
        let url = format!("{}/v1/images/generations", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(provider = "openai", error = %e, "HTTP request failed");
                ProviderError::new(ProviderErrorKind::Http(e.to_string()))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(provider = "openai", status = %status, body = %body, "Image API error");
            return Err(ProviderError::new(ProviderErrorKind::Api {
                status: status.as_u16(),
                message: body,
            }));
        }

        let parsed: ImageGenResponse = response.json().await.map_err(|e| {
            ProviderError::new(ProviderErrorKind::MalformedResponse(format!(
                "Failed to parse JSON: {}",
                e
            )))
        })?;

        let datum = parsed.data.into_iter().next().ok_or_else(|| {
            ProviderError::new(ProviderErrorKind::MalformedResponse(
                "Response contained no image data".to_string(),
            ))
        })?;

        if let Some(b64) = datum.b64_json {
            Ok(MediaSource::Base64(format!("data:image/png;base64,{}", b64)))
        } else if let Some(url) = datum.url {
            Ok(MediaSource::Url(url))
        } else {
            Err(ProviderError::new(ProviderErrorKind::MalformedResponse(
                "Image datum carried neither b64_json nor url".to_string(),
            )))
        }
    }
}

#[async_trait]
impl ImageGenerator for OpenAiImageClient {
    #[instrument(skip(self, request), fields(provider = "openai", model = %self.model))]
    async fn generate_image(&self, request: &ImageRequest) -> Result<MediaSource, ProviderError> {
        // The images endpoint has no negative-prompt parameter; fold it into
        // the prompt text instead.
        let prompt = match request.negative_prompt() {
            Some(negative) => format!("{}. Avoid: {}", request.prompt(), negative),
            None => request.prompt().clone(),
        };

        let body = ImageGenRequest {
            model: self.model.clone(),
            prompt,
            n: 1,
            size: request.aspect_ratio().openai_size().to_string(),
            response_format: "b64_json",
        };

        debug!(
            provider = "openai",
            model = %self.model,
            size = %body.size,
            "Sending image generation request"
        );

        with_backoff(self.retry, "openai", || self.send_once(&body)).await
    }

    fn service(&self) -> &'static str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }
}
