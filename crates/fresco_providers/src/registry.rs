//! Provider registry: one selected adapter per capability.

use crate::{
    AnthropicClient, ImageGenerator, LumaVideoClient, OpenAiChatClient, OpenAiImageClient,
    ProviderConfig, RunwayVideoClient, StabilityImageClient, TextGenerator, VideoGenerator,
};
use fresco_core::MediaType;
use fresco_error::ConfigError;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Selected generation adapters, one per capability.
///
/// [`ProviderRegistry::from_config`] picks the primary adapter whose
/// credential is configured (falling back to the secondary) and fails at
/// startup when a capability has none. Swapping a provider is a
/// configuration change, never an orchestrator change. The `with_*` chain
/// exists for composing registries out of arbitrary implementations.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    text: Option<Arc<dyn TextGenerator>>,
    image: Option<Arc<dyn ImageGenerator>>,
    video: Option<Arc<dyn VideoGenerator>>,
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("text", &self.text.is_some())
            .field("image", &self.image.is_some())
            .field("video", &self.video.is_some())
            .finish()
    }
}

impl ProviderRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the text adapter.
    pub fn with_text(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.text = Some(generator);
        self
    }

    /// Sets the image adapter.
    pub fn with_image(mut self, generator: Arc<dyn ImageGenerator>) -> Self {
        self.image = Some(generator);
        self
    }

    /// Sets the video adapter.
    pub fn with_video(mut self, generator: Arc<dyn VideoGenerator>) -> Self {
        self.video = Some(generator);
        self
    }

    /// Builds a fully-populated registry from configured credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if any capability has no configured provider, or an
    /// HTTP client cannot be constructed.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, ConfigError> {
        let timeout = Duration::from_secs(*config.request_timeout_secs());
        let video_timeout = Duration::from_secs(*config.video_timeout_secs());
        let retry = *config.retry();

        let text: Arc<dyn TextGenerator> = if let Some(settings) = config.anthropic() {
            Arc::new(AnthropicClient::from_settings(settings, timeout, retry)?)
        } else if let Some(settings) = config.openai() {
            Arc::new(OpenAiChatClient::from_settings(settings, timeout, retry)?)
        } else {
            return Err(ConfigError::new(
                "No text provider configured: set anthropic or openai credentials",
            ));
        };

        let image: Arc<dyn ImageGenerator> = if let Some(settings) = config.openai() {
            Arc::new(OpenAiImageClient::from_settings(settings, timeout, retry)?)
        } else if let Some(settings) = config.stability() {
            Arc::new(StabilityImageClient::from_settings(
                settings, timeout, retry,
            )?)
        } else {
            return Err(ConfigError::new(
                "No image provider configured: set openai or stability credentials",
            ));
        };

        let video: Arc<dyn VideoGenerator> = if let Some(settings) = config.runway() {
            Arc::new(RunwayVideoClient::from_settings(
                settings,
                video_timeout,
                retry,
            )?)
        } else if let Some(settings) = config.luma() {
            Arc::new(LumaVideoClient::from_settings(
                settings,
                video_timeout,
                retry,
            )?)
        } else {
            return Err(ConfigError::new(
                "No video provider configured: set runway or luma credentials",
            ));
        };

        info!(
            text = text.service(),
            image = image.service(),
            video = video.service(),
            "Provider registry configured"
        );

        Ok(Self {
            text: Some(text),
            image: Some(image),
            video: Some(video),
        })
    }

    /// The selected text adapter, when configured.
    pub fn text(&self) -> Option<&Arc<dyn TextGenerator>> {
        self.text.as_ref()
    }

    /// The selected image adapter, when configured.
    pub fn image(&self) -> Option<&Arc<dyn ImageGenerator>> {
        self.image.as_ref()
    }

    /// The selected video adapter, when configured.
    pub fn video(&self) -> Option<&Arc<dyn VideoGenerator>> {
        self.video.as_ref()
    }

    /// True when the registry can serve the given media type.
    pub fn supports(&self, media_type: MediaType) -> bool {
        match media_type {
            MediaType::Copy => self.text.is_some(),
            MediaType::Image => self.image.is_some(),
            MediaType::Video => self.video.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProviderSettings;

    fn full_config() -> ProviderConfig {
        ProviderConfig::default()
            .with_anthropic(ProviderSettings::new("sk-ant"))
            .with_openai(ProviderSettings::new("sk-oa"))
            .with_runway(ProviderSettings::new("key-rw"))
    }

    #[test]
    fn from_config_selects_primaries() {
        let registry = ProviderRegistry::from_config(&full_config()).expect("valid config");
        assert_eq!(registry.text().unwrap().service(), "anthropic");
        assert_eq!(registry.image().unwrap().service(), "openai");
        assert_eq!(registry.video().unwrap().service(), "runway");
    }

    #[test]
    fn from_config_falls_back_by_credential_availability() {
        let config = ProviderConfig::default()
            .with_openai(ProviderSettings::new("sk-oa"))
            .with_luma(ProviderSettings::new("key-luma"));
        let registry = ProviderRegistry::from_config(&config).expect("valid config");
        assert_eq!(registry.text().unwrap().service(), "openai");
        assert_eq!(registry.video().unwrap().service(), "luma");
    }

    #[test]
    fn missing_capability_is_a_startup_error() {
        let config = ProviderConfig::default().with_anthropic(ProviderSettings::new("sk-ant"));
        let err = ProviderRegistry::from_config(&config).unwrap_err();
        assert!(err.message.contains("image provider"));
    }

    #[test]
    fn supports_reflects_composition() {
        let registry = ProviderRegistry::new();
        assert!(!registry.supports(MediaType::Copy));
        assert!(!registry.supports(MediaType::Image));
        assert!(!registry.supports(MediaType::Video));
    }
}
