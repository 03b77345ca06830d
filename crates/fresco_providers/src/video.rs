//! Video generation clients: Runway (primary) and Luma (fallback).

use crate::{ProviderSettings, RetryPolicy, VideoGenerator, VideoRequest, retry::with_backoff};
use async_trait::async_trait;
use fresco_core::MediaSource;
use fresco_error::{ConfigError, ProviderError, ProviderErrorKind};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, instrument};

const RUNWAY_BASE_URL: &str = "https://api.dev.runwayml.com";
const RUNWAY_MODEL: &str = "gen3a_turbo";
const RUNWAY_API_VERSION: &str = "2024-11-06";
const LUMA_BASE_URL: &str = "https://api.lumalabs.ai";
const LUMA_MODEL: &str = "ray-2";

fn build_client(timeout: Duration) -> Result<reqwest::Client, ConfigError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ConfigError::new(format!("Failed to build HTTP client: {}", e)))
}

/// Runway text-to-video request body.
#[derive(Debug, Clone, Serialize)]
struct RunwayRequest {
    #[serde(rename = "promptText")]
    prompt_text: String,
    model: String,
    duration: u32,
    ratio: String,
}

/// Runway text-to-video response body.
#[derive(Debug, Clone, Deserialize)]
struct RunwayResponse {
    #[serde(default)]
    output: Vec<String>,
}

/// Runway HTTP client.
#[derive(Debug, Clone)]
pub struct RunwayVideoClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    retry: RetryPolicy,
}

impl RunwayVideoClient {
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
                .unwrap_or_else(|| RUNWAY_MODEL.to_string()),
            base_url: settings
                .base_url()
                .clone()
                .unwrap_or_else(|| RUNWAY_BASE_URL.to_string()),
            retry,
        })
    }

    async fn send_once(&self, request: &RunwayRequest) -> Result<MediaSource, ProviderError> {
        let url = format!("{}/v1/text_to_video", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("X-Runway-Version", RUNWAY_API_VERSION)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(provider = "runway", error = %e, "HTTP request failed");
                ProviderError::new(ProviderErrorKind::Http(e.to_string()))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(provider = "runway", status = %status, body = %body, "API error");
            return Err(ProviderError::new(ProviderErrorKind::Api {
                status: status.as_u16(),
                message: body,
            }));
        }

        let parsed: RunwayResponse = response.json().await.map_err(|e| {
            ProviderError::new(ProviderErrorKind::MalformedResponse(format!(
                "Failed to parse JSON: {}",
                e
            )))
        })?;

        let asset_url = parsed.output.into_iter().next().ok_or_else(|| {
            ProviderError::new(ProviderErrorKind::MalformedResponse(
                "Response contained no output asset".to_string(),
            ))
        })?;

        Ok(MediaSource::Url(asset_url))
    }
}

#[async_trait]
impl VideoGenerator for RunwayVideoClient {
    #[instrument(skip(self, request), fields(provider = "runway", model = %self.model))]
    async fn generate_video(&self, request: &VideoRequest) -> Result<MediaSource, ProviderError> {
        let body = RunwayRequest {
            prompt_text: request.prompt().clone(),
            model: self.model.clone(),
            duration: *request.duration_secs(),
            ratio: request.ratio(),
        };

        debug!(
            provider = "runway",
            model = %self.model,
            duration = body.duration,
            ratio = %body.ratio,
            "Sending video generation request"
        );

        with_backoff(self.retry, "runway", || self.send_once(&body)).await
    }

    fn service(&self) -> &'static str {
        "runway"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Luma Dream Machine request body.
#[derive(Debug, Clone, Serialize)]
struct LumaRequest {
    prompt: String,
    model: String,
    resolution: String,
    duration: String,
}

/// Assets in a Luma generation response.
#[derive(Debug, Clone, Deserialize)]
struct LumaAssets {
    #[serde(default)]
    video: Option<String>,
}

/// Luma generation response body.
#[derive(Debug, Clone, Deserialize)]
struct LumaResponse {
    #[serde(default)]
    assets: Option<LumaAssets>,
}

/// Luma HTTP client.
#[derive(Debug, Clone)]
pub struct LumaVideoClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    retry: RetryPolicy,
}

impl LumaVideoClient {
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
                .unwrap_or_else(|| LUMA_MODEL.to_string()),
            base_url: settings
                .base_url()
                .clone()
                .unwrap_or_else(|| LUMA_BASE_URL.to_string()),
            retry,
        })
    }

    async fn send_once(&self, request: &LumaRequest) -> Result<MediaSource, ProviderError> {
        let url = format!("{}/dream-machine/v1/generations", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(provider = "luma", error = %e, "HTTP request failed");
                ProviderError::new(ProviderErrorKind::Http(e.to_string()))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(provider = "luma", status = %status, body = %body, "API error");
            return Err(ProviderError::new(ProviderErrorKind::Api {
                status: status.as_u16(),
                message: body,
            }));
        }

        let parsed: LumaResponse = response.json().await.map_err(|e| {
            ProviderError::new(ProviderErrorKind::MalformedResponse(format!(
                "Failed to parse JSON: {}",
                e
            )))
        })?;

        let video_url = parsed
            .assets
            .and_then(|assets| assets.video)
            .ok_or_else(|| {
                ProviderError::new(ProviderErrorKind::MalformedResponse(
                    "Response contained no video asset".to_string(),
                ))
            })?;

        Ok(MediaSource::Url(video_url))
    }
}

#[async_trait]
impl VideoGenerator for LumaVideoClient {
    #[instrument(skip(self, request), fields(provider = "luma", model = %self.model))]
    async fn generate_video(&self, request: &VideoRequest) -> Result<MediaSource, ProviderError> {
        let body = LumaRequest {
            prompt: request.prompt().clone(),
            model: self.model.clone(),
            resolution: request.resolution_label(),
            duration: format!("{}s", request.duration_secs()),
        };

        debug!(
            provider = "luma",
            model = %self.model,
            resolution = %body.resolution,
            duration = %body.duration,
            "Sending video generation request"
        );

        with_backoff(self.retry, "luma", || self.send_once(&body)).await
    }

    fn service(&self) -> &'static str {
        "luma"
    }

    fn model(&self) -> &str {
        &self.model
    }
}
