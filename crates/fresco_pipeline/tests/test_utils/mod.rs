//! Shared fakes and fixtures for pipeline tests.

#![allow(dead_code)]

use async_trait::async_trait;
use fresco_core::{CampaignDescriptor, MediaSource};
use fresco_error::{ProviderError, ProviderErrorKind};
use fresco_providers::{
    ImageGenerator, ImageRequest, ProviderRegistry, TextGenerator, TextOutput, TextRequest,
    VideoGenerator, VideoRequest,
};
use fresco_storage::{MemoryBlobStore, MemoryFileRecordStore, Uploader};
use std::sync::Arc;

// "fake png" / "fake mp4" as base64.
pub const FAKE_PNG_B64: &str = "data:image/png;base64,ZmFrZSBwbmc=";
pub const FAKE_MP4_B64: &str = "data:video/mp4;base64,ZmFrZSBtcDQ=";

/// Text generator returning a canned response.
#[derive(Debug, Clone)]
pub struct FakeTextGenerator {
    pub response: String,
}

impl FakeTextGenerator {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

#[async_trait]
impl TextGenerator for FakeTextGenerator {
    async fn generate_text(&self, _request: &TextRequest) -> Result<TextOutput, ProviderError> {
        Ok(TextOutput::new(self.response.clone()))
    }

    fn service(&self) -> &'static str {
        "fake-text"
    }

    fn model(&self) -> &str {
        "fake-text-1"
    }
}

/// Image generator returning an inline data-URI.
#[derive(Debug, Clone, Default)]
pub struct FakeImageGenerator;

#[async_trait]
impl ImageGenerator for FakeImageGenerator {
    async fn generate_image(&self, _request: &ImageRequest) -> Result<MediaSource, ProviderError> {
        Ok(MediaSource::Base64(FAKE_PNG_B64.to_string()))
    }

    fn service(&self) -> &'static str {
        "fake-image"
    }

    fn model(&self) -> &str {
        "fake-image-1"
    }
}

/// Image generator that always fails with a provider error.
#[derive(Debug, Clone, Default)]
pub struct FailingImageGenerator;

#[async_trait]
impl ImageGenerator for FailingImageGenerator {
    async fn generate_image(&self, _request: &ImageRequest) -> Result<MediaSource, ProviderError> {
        Err(ProviderError::new(ProviderErrorKind::Api {
            status: 500,
            message: "image backend down".to_string(),
        }))
    }

    fn service(&self) -> &'static str {
        "fake-image"
    }

    fn model(&self) -> &str {
        "fake-image-1"
    }
}

/// Video generator returning an inline data-URI.
#[derive(Debug, Clone, Default)]
pub struct FakeVideoGenerator;

#[async_trait]
impl VideoGenerator for FakeVideoGenerator {
    async fn generate_video(&self, _request: &VideoRequest) -> Result<MediaSource, ProviderError> {
        Ok(MediaSource::Base64(FAKE_MP4_B64.to_string()))
    }

    fn service(&self) -> &'static str {
        "fake-video"
    }

    fn model(&self) -> &str {
        "fake-video-1"
    }
}

/// Video generator that always fails with a provider error.
#[derive(Debug, Clone, Default)]
pub struct FailingVideoGenerator;

#[async_trait]
impl VideoGenerator for FailingVideoGenerator {
    async fn generate_video(&self, _request: &VideoRequest) -> Result<MediaSource, ProviderError> {
        Err(ProviderError::new(ProviderErrorKind::Api {
            status: 500,
            message: "video backend down".to_string(),
        }))
    }

    fn service(&self) -> &'static str {
        "fake-video"
    }

    fn model(&self) -> &str {
        "fake-video-1"
    }
}

/// Registry with all three capabilities succeeding.
pub fn all_success_registry() -> Arc<ProviderRegistry> {
    Arc::new(
        ProviderRegistry::new()
            .with_text(Arc::new(FakeTextGenerator::new("generated copy")))
            .with_image(Arc::new(FakeImageGenerator))
            .with_video(Arc::new(FakeVideoGenerator)),
    )
}

/// Registry where both media capabilities fail but text succeeds.
pub fn failing_media_registry() -> Arc<ProviderRegistry> {
    Arc::new(
        ProviderRegistry::new()
            .with_text(Arc::new(FakeTextGenerator::new("generated copy")))
            .with_image(Arc::new(FailingImageGenerator))
            .with_video(Arc::new(FailingVideoGenerator)),
    )
}

/// Uploader over in-memory backends, returned alongside both stores.
pub fn memory_uploader() -> (Arc<Uploader>, Arc<MemoryBlobStore>, Arc<MemoryFileRecordStore>) {
    let blobs = Arc::new(MemoryBlobStore::new());
    let records = Arc::new(MemoryFileRecordStore::new());
    let uploader = Arc::new(Uploader::new(blobs.clone(), records.clone()));
    (uploader, blobs, records)
}

/// The campaign from the Summer Sale scenario.
pub fn summer_sale() -> CampaignDescriptor {
    CampaignDescriptor::builder()
        .title("Summer Sale")
        .brand_name("Acme")
        .description("20% off all items")
        .target_audience("young professionals")
        .build()
        .unwrap()
}
