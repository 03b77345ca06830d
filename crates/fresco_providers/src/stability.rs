//! Stability text-to-image client (image generation fallback).

use crate::{ImageGenerator, ImageRequest, ProviderSettings, RetryPolicy, retry::with_backoff};
use async_trait::async_trait;
use fresco_core::MediaSource;
use fresco_error::{ConfigError, ProviderError, ProviderErrorKind};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, instrument};

const DEFAULT_BASE_URL: &str = "https://api.stability.ai";
const DEFAULT_ENGINE: &str = "stable-diffusion-xl-1024-v1-0";

/// Weighted prompt fragment for the Stability API.
#[derive(Debug, Clone, Serialize)]
struct TextPrompt {
    text: String,
    weight: f32,
}

/// Stability text-to-image request body.
#[derive(Debug, Clone, Serialize)]
struct StabilityRequest {
    text_prompts: Vec<TextPrompt>,
    width: u32,
    height: u32,
    samples: u8,
}

/// A generated artifact in the Stability response.
#[derive(Debug, Clone, Deserialize)]
struct StabilityArtifact {
    #[serde(default)]
    base64: Option<String>,
}

/// Stability text-to-image response body.
#[derive(Debug, Clone, Deserialize)]
struct StabilityResponse {
    #[serde(default)]
    artifacts: Vec<StabilityArtifact>,
}

/// Stability HTTP client.
#[derive(Debug, Clone)]
pub struct StabilityImageClient {
    client: reqwest::Client,
    api_key: String,
    engine: String,
    base_url: String,
    retry: RetryPolicy,
}

impl StabilityImageClient {
    /// Creates a client from provider settings. The settings `model` field
    /// selects the engine.
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
            engine: settings
                .model()
                .clone()
                .unwrap_or_else(|| DEFAULT_ENGINE.to_string()),
            base_url: settings
                .base_url()
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            retry,
        })
    }

    async fn send_once(&self, request: &StabilityRequest) -> Result<MediaSource, ProviderError> {
        let url = format!(
            "{}/v1/generation/{}/text-to-image",
            self.base_url, self.engine
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Accept", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(provider = "stability", error = %e, "HTTP request failed");
                ProviderError::new(ProviderErrorKind::Http(e.to_string()))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(provider = "stability", status = %status, body = %body, "API error");
            return Err(ProviderError::new(ProviderErrorKind::Api {
                status: status.as_u16(),
                message: body,
            }));
        }

        let parsed: StabilityResponse = response.json().await.map_err(|e| {
            ProviderError::new(ProviderErrorKind::MalformedResponse(format!(
                "Failed to parse JSON: {}",
                e
            )))
        })?;

        let base64 = parsed
            .artifacts
            .into_iter()
            .find_map(|artifact| artifact.base64)
            .ok_or_else(|| {
                ProviderError::new(ProviderErrorKind::MalformedResponse(
                    "Response contained no image artifact".to_string(),
                ))
            })?;

        Ok(MediaSource::Base64(format!(
            "data:image/png;base64,{}",
            base64
        )))
    }
}

#[async_trait]
impl ImageGenerator for StabilityImageClient {
    #[instrument(skip(self, request), fields(provider = "stability", engine = %self.engine))]
    async fn generate_image(&self, request: &ImageRequest) -> Result<MediaSource, ProviderError> {
        let (width, height) = request.aspect_ratio().stability_dimensions();

        let mut text_prompts = vec![TextPrompt {
            text: request.prompt().clone(),
            weight: 1.0,
        }];
        if let Some(negative) = request.negative_prompt() {
            text_prompts.push(TextPrompt {
                text: negative.clone(),
                weight: -1.0,
            });
        }

        let body = StabilityRequest {
            text_prompts,
            width,
            height,
            samples: 1,
        };

        debug!(
            provider = "stability",
            engine = %self.engine,
            width,
            height,
            "Sending image generation request"
        );

        with_backoff(self.retry, "stability", || self.send_once(&body)).await
    }

    fn service(&self) -> &'static str {
        "stability"
    }

    fn model(&self) -> &str {
        &self.engine
    }
}
