//! Generation cell types: the unit of fan-out and failure isolation.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Target platform for generated content.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Platform {
    Facebook,
    Instagram,
    Linkedin,
    Twitter,
    Email,
}

impl Platform {
    /// The four social platforms an "all" selection expands to.
    ///
    /// Email is opt-in only: it participates when selected explicitly.
    pub fn socials() -> [Platform; 4] {
        [
            Platform::Facebook,
            Platform::Instagram,
            Platform::Linkedin,
            Platform::Twitter,
        ]
    }
}

/// Content category within a platform.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ContentCategory {
    OrganicPost,
    PaidAd,
}

impl ContentCategory {
    /// Fixed enumeration order used by the orchestrator.
    pub fn all() -> [ContentCategory; 2] {
        [ContentCategory::OrganicPost, ContentCategory::PaidAd]
    }
}

/// Media type of a generated content item.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MediaType {
    Copy,
    Image,
    Video,
}

impl MediaType {
    /// Fixed enumeration order used by the orchestrator.
    pub fn all() -> [MediaType; 3] {
        [MediaType::Copy, MediaType::Image, MediaType::Video]
    }

    /// True for media types that carry a binary artifact.
    pub fn has_binary(&self) -> bool {
        matches!(self, MediaType::Image | MediaType::Video)
    }
}

/// One cell of the generation matrix.
///
/// Each cell is processed independently; a failing cell never aborts the
/// remaining matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenerationCell {
    /// Target platform
    pub platform: Platform,
    /// Organic post or paid ad
    pub category: ContentCategory,
    /// Copy, image, or video
    pub media_type: MediaType,
}

impl GenerationCell {
    /// Creates a new generation cell.
    pub fn new(platform: Platform, category: ContentCategory, media_type: MediaType) -> Self {
        Self {
            platform,
            category,
            media_type,
        }
    }

    /// Stable idempotency key for upserting the cell's record.
    ///
    /// Hashes (campaign, platform, category, media type, prompt) so that
    /// re-running the same campaign with the same settings updates the
    /// existing record instead of duplicating it. A different prompt is a
    /// different key on purpose: new creative, new record.
    pub fn idempotency_key(&self, campaign_id: Uuid, prompt: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(campaign_id.as_bytes());
        hasher.update([0x1f]);
        hasher.update(self.platform.to_string().as_bytes());
        hasher.update([0x1f]);
        hasher.update(self.category.to_string().as_bytes());
        hasher.update([0x1f]);
        hasher.update(self.media_type.to_string().as_bytes());
        hasher.update([0x1f]);
        hasher.update(prompt.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

impl std::fmt::Display for GenerationCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.platform, self.category, self.media_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_strings_are_snake_case() {
        assert_eq!(Platform::Linkedin.to_string(), "linkedin");
        assert_eq!(ContentCategory::OrganicPost.to_string(), "organic_post");
        assert_eq!(MediaType::Copy.to_string(), "copy");
    }

    #[test]
    fn enum_parse_round_trip() {
        assert_eq!("twitter".parse::<Platform>().unwrap(), Platform::Twitter);
        assert_eq!(
            "paid_ad".parse::<ContentCategory>().unwrap(),
            ContentCategory::PaidAd
        );
        assert_eq!("video".parse::<MediaType>().unwrap(), MediaType::Video);
        assert!("tiktok".parse::<Platform>().is_err());
    }

    #[test]
    fn idempotency_key_is_stable_and_prompt_sensitive() {
        let campaign = Uuid::new_v4();
        let cell = GenerationCell::new(
            Platform::Twitter,
            ContentCategory::OrganicPost,
            MediaType::Copy,
        );

        let a = cell.idempotency_key(campaign, "prompt one");
        let b = cell.idempotency_key(campaign, "prompt one");
        let c = cell.idempotency_key(campaign, "prompt two");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn cell_display_includes_all_coordinates() {
        let cell = GenerationCell::new(
            Platform::Instagram,
            ContentCategory::PaidAd,
            MediaType::Image,
        );
        assert_eq!(cell.to_string(), "instagram/paid_ad/image");
    }
}
