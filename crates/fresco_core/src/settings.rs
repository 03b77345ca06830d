//! Generation settings supplied by the caller.

use crate::{MediaType, Platform};
use serde::{Deserialize, Serialize};

/// Tone applied to generated copy and media prompts.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Tone {
    #[default]
    Professional,
    Casual,
    Enthusiastic,
    Informative,
    Humorous,
}

/// Platform selection: a single platform or the full social set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformSelection {
    /// Expands to facebook, instagram, linkedin, twitter.
    All,
    /// A single explicit platform.
    #[serde(untagged)]
    One(Platform),
}

impl Default for PlatformSelection {
    fn default() -> Self {
        PlatformSelection::All
    }
}

impl PlatformSelection {
    /// The ordered platform list the orchestrator iterates.
    pub fn expand(&self) -> Vec<Platform> {
        match self {
            PlatformSelection::All => Platform::socials().to_vec(),
            PlatformSelection::One(platform) => vec![*platform],
        }
    }
}

/// Media type selection: a single type or all three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaSelection {
    /// Expands to copy, image, video.
    All,
    /// A single explicit media type.
    #[serde(untagged)]
    One(MediaType),
}

impl Default for MediaSelection {
    fn default() -> Self {
        MediaSelection::All
    }
}

impl MediaSelection {
    /// The ordered media type list the orchestrator iterates.
    pub fn expand(&self) -> Vec<MediaType> {
        match self {
            MediaSelection::All => MediaType::all().to_vec(),
            MediaSelection::One(media) => vec![*media],
        }
    }
}

/// Caller-supplied settings for one generation run.
///
/// Every field has a default so a bare `{}` payload generates the full
/// matrix in a professional tone.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerationSettings {
    /// Platform selection ("all" or a single platform)
    pub platform: PlatformSelection,
    /// Media type selection ("all" or copy|image|video)
    pub content_type: MediaSelection,
    /// Tone conditioning prompts and sampling temperature
    pub tone: Tone,
    /// Comma-separated keywords woven into copy prompts
    pub keywords: Option<String>,
    /// Overrides the synthesized image prompt when present
    pub custom_image_prompt: Option<String>,
    /// Overrides the synthesized video prompt when present
    pub custom_video_prompt: Option<String>,
}
