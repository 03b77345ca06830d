//! Persisted record types for generated content and stored files.

use crate::{ContentCategory, MediaType, Platform};
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a generated content record.
///
/// Records are created as `Generated`; later transitions are driven by the
/// UI layer and out of scope here.
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
pub enum ContentStatus {
    #[default]
    Generated,
    Draft,
    Published,
}

/// New generated-content record, prior to persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(setter(into), pattern = "owned")]
pub struct NewGeneratedContent {
    /// Owning campaign
    campaign_id: Uuid,
    /// Stable upsert key (see `GenerationCell::idempotency_key`)
    cell_key: String,
    /// Target platform
    platform: Platform,
    /// Organic post or paid ad
    category: ContentCategory,
    /// Copy, image, or video
    media_type: MediaType,
    /// Generated text (copy body, caption, or script)
    content_text: String,
    /// Public URL of the stored artifact; present only for image/video
    #[builder(default)]
    media_url: Option<String>,
    /// The exact prompt sent to the provider, kept for traceability
    generated_prompt: String,
    /// Initial lifecycle status
    #[builder(default)]
    status: ContentStatus,
}

impl NewGeneratedContent {
    /// Creates a builder for `NewGeneratedContent`.
    pub fn builder() -> NewGeneratedContentBuilder {
        NewGeneratedContentBuilder::default()
    }
}

/// Persisted generated-content record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(setter(into), pattern = "owned")]
pub struct GeneratedContentRecord {
    /// Record id
    id: Uuid,
    /// Owning campaign
    campaign_id: Uuid,
    /// Stable upsert key
    cell_key: String,
    /// Target platform
    platform: Platform,
    /// Organic post or paid ad
    category: ContentCategory,
    /// Copy, image, or video
    media_type: MediaType,
    /// Generated text
    content_text: String,
    /// Public URL of the stored artifact; present only for image/video
    #[builder(default)]
    media_url: Option<String>,
    /// The exact prompt sent to the provider
    generated_prompt: String,
    /// Lifecycle status
    status: ContentStatus,
    /// Creation timestamp
    created_at: DateTime<Utc>,
    /// Last update timestamp
    updated_at: DateTime<Utc>,
}

impl GeneratedContentRecord {
    /// Creates a builder for `GeneratedContentRecord`.
    pub fn builder() -> GeneratedContentRecordBuilder {
        GeneratedContentRecordBuilder::default()
    }
}

/// New stored-file metadata row, prior to persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(setter(into), pattern = "owned")]
pub struct NewStoredFile {
    /// Owning campaign
    campaign_id: Uuid,
    /// Storage-relative path (`campaigns/{campaign}/{kind}/...`)
    file_path: String,
    /// Public URL of the object
    public_url: String,
    /// Object size in bytes
    file_size_bytes: i64,
    /// MIME type of the object
    mime_type: String,
    /// Provider service that generated the artifact
    ai_service: String,
    /// Provider model that generated the artifact
    ai_model: String,
    /// Prompt used for generation
    generation_prompt: String,
    /// Back-reference to the content record, when known
    #[builder(default)]
    generated_content_id: Option<Uuid>,
}

impl NewStoredFile {
    /// Creates a builder for `NewStoredFile`.
    pub fn builder() -> NewStoredFileBuilder {
        NewStoredFileBuilder::default()
    }
}

/// Persisted stored-file metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(setter(into), pattern = "owned")]
pub struct StoredFile {
    /// Record id
    id: Uuid,
    /// Owning campaign
    campaign_id: Uuid,
    /// Storage-relative path
    file_path: String,
    /// Public URL of the object
    public_url: String,
    /// Object size in bytes
    file_size_bytes: i64,
    /// MIME type of the object
    mime_type: String,
    /// Provider service that generated the artifact
    ai_service: String,
    /// Provider model that generated the artifact
    ai_model: String,
    /// Prompt used for generation
    generation_prompt: String,
    /// Back-reference to the content record, when known
    #[builder(default)]
    generated_content_id: Option<Uuid>,
    /// Creation timestamp
    created_at: DateTime<Utc>,
}

impl StoredFile {
    /// Creates a builder for `StoredFile`.
    pub fn builder() -> StoredFileBuilder {
        StoredFileBuilder::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_content_defaults_to_generated_status() {
        let content = NewGeneratedContent::builder()
            .campaign_id(Uuid::new_v4())
            .cell_key("abc")
            .platform(Platform::Twitter)
            .category(ContentCategory::OrganicPost)
            .media_type(MediaType::Copy)
            .content_text("hello")
            .generated_prompt("prompt")
            .build()
            .expect("valid record");

        assert_eq!(*content.status(), ContentStatus::Generated);
        assert!(content.media_url().is_none());
    }

    #[test]
    fn status_serializes_snake_case() {
        assert_eq!(ContentStatus::Generated.to_string(), "generated");
        assert_eq!("published".parse::<ContentStatus>().unwrap(), ContentStatus::Published);
    }
}
