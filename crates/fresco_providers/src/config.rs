//! Provider configuration.
//!
//! Credentials are resolved once, at startup, into an explicit
//! [`ProviderConfig`]; adapters never read the process environment at call
//! time. A capability with no configured credential is a configuration
//! error when the registry is built, not a runtime surprise.

use crate::RetryPolicy;
use derive_getters::Getters;
use fresco_error::ConfigError;
use serde::Deserialize;

/// Credential and overrides for one provider.
#[derive(Debug, Clone, PartialEq, Deserialize, Getters)]
pub struct ProviderSettings {
    /// API key for the provider
    api_key: String,
    /// Model override; adapters supply a default when absent
    #[serde(default)]
    model: Option<String>,
    /// Endpoint override for gateways and tests
    #[serde(default)]
    base_url: Option<String>,
}

impl ProviderSettings {
    /// Creates settings with just an API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: None,
            base_url: None,
        }
    }

    /// Sets the model override.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets the endpoint override.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_video_timeout_secs() -> u64 {
    180
}

/// Provider credentials and HTTP behavior for one deployment.
#[derive(Debug, Clone, Deserialize, Getters)]
#[serde(default)]
pub struct ProviderConfig {
    /// Anthropic messages API (text, primary)
    anthropic: Option<ProviderSettings>,
    /// OpenAI-compatible API (text fallback; image primary)
    openai: Option<ProviderSettings>,
    /// Stability text-to-image API (image fallback)
    stability: Option<ProviderSettings>,
    /// Runway text-to-video API (video, primary)
    runway: Option<ProviderSettings>,
    /// Luma Dream Machine API (video fallback)
    luma: Option<ProviderSettings>,
    /// 429 retry bound and backoff base
    retry: RetryPolicy,
    /// Per-call timeout for text and image requests
    #[serde(default = "default_request_timeout_secs")]
    request_timeout_secs: u64,
    /// Per-call timeout for video requests
    #[serde(default = "default_video_timeout_secs")]
    video_timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            anthropic: None,
            openai: None,
            stability: None,
            runway: None,
            luma: None,
            retry: RetryPolicy::default(),
            request_timeout_secs: default_request_timeout_secs(),
            video_timeout_secs: default_video_timeout_secs(),
        }
    }
}

impl ProviderConfig {
    /// Loads configuration from `fresco.toml` (optional) layered with
    /// `FRESCO__`-prefixed environment variables, e.g.
    /// `FRESCO__ANTHROPIC__API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns an error if a source fails to load or deserialize.
    pub fn load() -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("fresco").required(false))
            .add_source(config::Environment::with_prefix("FRESCO").separator("__"))
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to load configuration: {}", e)))?;

        settings
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Invalid provider configuration: {}", e)))
    }

    /// Sets the Anthropic credential.
    pub fn with_anthropic(mut self, settings: ProviderSettings) -> Self {
        self.anthropic = Some(settings);
        self
    }

    /// Sets the OpenAI credential.
    pub fn with_openai(mut self, settings: ProviderSettings) -> Self {
        self.openai = Some(settings);
        self
    }

    /// Sets the Stability credential.
    pub fn with_stability(mut self, settings: ProviderSettings) -> Self {
        self.stability = Some(settings);
        self
    }

    /// Sets the Runway credential.
    pub fn with_runway(mut self, settings: ProviderSettings) -> Self {
        self.runway = Some(settings);
        self
    }

    /// Sets the Luma credential.
    pub fn with_luma(mut self, settings: ProviderSettings) -> Self {
        self.luma = Some(settings);
        self
    }

    /// Overrides the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}
