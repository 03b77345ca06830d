//! Generation provider adapters for Fresco.
//!
//! One adapter per external capability (text, image, video), each issuing a
//! single typed HTTP request with 429-aware backoff and defensive response
//! parsing. Adapters are swappable behind the capability traits; the
//! [`ProviderRegistry`] selects one adapter per capability from configured
//! credentials at startup.

mod anthropic;
mod config;
mod openai;
mod registry;
mod retry;
mod stability;
mod traits;
mod video;

pub use anthropic::AnthropicClient;
pub use config::{ProviderConfig, ProviderSettings};
pub use openai::{OpenAiChatClient, OpenAiImageClient};
pub use registry::ProviderRegistry;
pub use retry::{RetryPolicy, with_backoff};
pub use stability::StabilityImageClient;
pub use traits::{
    AspectRatio, ImageGenerator, ImageRequest, ImageRequestBuilder, ProviderResult, TextGenerator,
    TextOutput, TextRequest, TextRequestBuilder, VideoGenerator, VideoRequest,
    VideoRequestBuilder,
};
pub use video::{LumaVideoClient, RunwayVideoClient};
