//! Core data types for the Fresco content generation pipeline.
//!
//! This crate provides the foundation data types used across all Fresco crates.

mod campaign;
mod cell;
mod media;
mod record;
mod settings;
mod telemetry;

pub use campaign::{CampaignDescriptor, CampaignDescriptorBuilder};
pub use cell::{ContentCategory, GenerationCell, MediaType, Platform};
pub use media::MediaSource;
pub use record::{
    ContentStatus, GeneratedContentRecord, GeneratedContentRecordBuilder, NewGeneratedContent,
    NewGeneratedContentBuilder, NewStoredFile, NewStoredFileBuilder, StoredFile, StoredFileBuilder,
};
pub use settings::{GenerationSettings, MediaSelection, PlatformSelection, Tone};
pub use telemetry::init_telemetry;
