//! Capability traits and request types for generation providers.

use async_trait::async_trait;
use derive_getters::Getters;
use fresco_core::MediaSource;
use fresco_error::ProviderError;

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Text generation request.
#[derive(Debug, Clone, PartialEq, Getters, derive_builder::Builder)]
#[builder(setter(into), pattern = "owned")]
pub struct TextRequest {
    /// The fully-formed prompt
    prompt: String,
    /// Optional system prompt
    #[builder(default)]
    system: Option<String>,
    /// Maximum tokens to generate
    #[builder(default)]
    max_tokens: Option<u32>,
    /// Sampling temperature
    #[builder(default)]
    temperature: Option<f32>,
}

impl TextRequest {
    /// Creates a builder for `TextRequest`.
    pub fn builder() -> TextRequestBuilder {
        TextRequestBuilder::default()
    }
}

/// Generated text returned by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct TextOutput {
    /// The raw generated text
    text: String,
}

impl TextOutput {
    /// Creates a new text output.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Consumes the output and returns the text.
    pub fn into_text(self) -> String {
        self.text
    }
}

/// Aspect ratio hint for image generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum AspectRatio {
    /// 1:1, used for Instagram
    Square,
    /// 16:9-ish, used everywhere else
    #[default]
    Landscape,
}

impl AspectRatio {
    /// Size string accepted by OpenAI-compatible image endpoints.
    pub fn openai_size(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1024x1024",
            AspectRatio::Landscape => "1792x1024",
        }
    }

    /// Pixel dimensions accepted by the Stability text-to-image endpoint.
    pub fn stability_dimensions(&self) -> (u32, u32) {
        match self {
            AspectRatio::Square => (1024, 1024),
            AspectRatio::Landscape => (1344, 768),
        }
    }
}

/// Image generation request.
#[derive(Debug, Clone, PartialEq, Getters, derive_builder::Builder)]
#[builder(setter(into), pattern = "owned")]
pub struct ImageRequest {
    /// The fully-formed prompt
    prompt: String,
    /// Elements the image should avoid
    #[builder(default)]
    negative_prompt: Option<String>,
    /// Aspect ratio hint
    #[builder(default)]
    aspect_ratio: AspectRatio,
}

impl ImageRequest {
    /// Creates a builder for `ImageRequest`.
    pub fn builder() -> ImageRequestBuilder {
        ImageRequestBuilder::default()
    }
}

/// Video generation request.
#[derive(Debug, Clone, PartialEq, Getters, derive_builder::Builder)]
#[builder(setter(into), pattern = "owned")]
pub struct VideoRequest {
    /// The fully-formed prompt
    prompt: String,
    /// Target clip duration in seconds
    #[builder(default = "5")]
    duration_secs: u32,
    /// Frame width in pixels
    #[builder(default = "1280")]
    width: u32,
    /// Frame height in pixels
    #[builder(default = "720")]
    height: u32,
    /// Frames per second
    #[builder(default = "24")]
    fps: u32,
}

impl VideoRequest {
    /// Creates a builder for `VideoRequest`.
    pub fn builder() -> VideoRequestBuilder {
        VideoRequestBuilder::default()
    }

    /// Width:height ratio string (e.g. `1280:720`).
    pub fn ratio(&self) -> String {
        format!("{}:{}", self.width, self.height)
    }

    /// Vertical-resolution label (e.g. `720p`).
    pub fn resolution_label(&self) -> String {
        format!("{}p", self.height)
    }
}

/// Text generation capability.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generates text for the given request.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider is unreachable, rate-limits past the
    /// retry bound, rejects the request, or returns a response without the
    /// expected text field.
    async fn generate_text(&self, request: &TextRequest) -> ProviderResult<TextOutput>;

    /// Stable service identifier (e.g. `anthropic`), kept on stored files.
    fn service(&self) -> &'static str;

    /// Model identifier the adapter is configured with.
    fn model(&self) -> &str;
}

/// Image generation capability.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generates an image, returned as a remote URL or inline data-URI.
    ///
    /// # Errors
    ///
    /// Same contract as [`TextGenerator::generate_text`]; a 2xx response
    /// with no candidate image field is a malformed-response error.
    async fn generate_image(&self, request: &ImageRequest) -> ProviderResult<MediaSource>;

    /// Stable service identifier.
    fn service(&self) -> &'static str;

    /// Model identifier the adapter is configured with.
    fn model(&self) -> &str;
}

/// Video generation capability.
#[async_trait]
pub trait VideoGenerator: Send + Sync {
    /// Generates a video clip, returned as a remote URL or inline data-URI.
    ///
    /// # Errors
    ///
    /// Same contract as [`TextGenerator::generate_text`].
    async fn generate_video(&self, request: &VideoRequest) -> ProviderResult<MediaSource>;

    /// Stable service identifier.
    fn service(&self) -> &'static str;

    /// Model identifier the adapter is configured with.
    fn model(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn video_request_defaults_match_primary_path() {
        let request = VideoRequest::builder()
            .prompt("a product montage")
            .build()
            .expect("valid request");

        assert_eq!(*request.duration_secs(), 5);
        assert_eq!(request.ratio(), "1280:720");
        assert_eq!(request.resolution_label(), "720p");
        assert_eq!(*request.fps(), 24);
    }

    #[test]
    fn aspect_ratio_maps_to_provider_formats() {
        assert_eq!(AspectRatio::Square.openai_size(), "1024x1024");
        assert_eq!(AspectRatio::Landscape.stability_dimensions(), (1344, 768));
    }
}
