//! Fresco: an AI campaign content generation pipeline.
//!
//! For a marketing campaign, Fresco generates the cross-product of
//! {platform} x {content category} x {media type} content items: copy via a
//! text LLM, images and video via their generation APIs. It uploads binary
//! artifacts to object storage, and persists one record per successful cell.
//! Cells fail independently; the caller receives an aggregate outcome with a
//! preview of what generated and which cells did not.
//!
//! # Example
//!
//! ```no_run
//! use fresco::{
//!     CampaignContentService, ContentGenerator, InvocationPayload, Orchestrator,
//!     ProviderConfig, ProviderRegistry, Uploader,
//! };
//! use fresco::{DieselContentStore, DieselFileRecordStore, create_pool};
//! use fresco::{S3BlobStore, S3StorageConfig};
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! fresco::init_telemetry();
//!
//! let providers = Arc::new(ProviderRegistry::from_config(&ProviderConfig::load()?)?);
//! let pool = create_pool()?;
//! let blobs = Arc::new(S3BlobStore::new(S3StorageConfig {
//!     bucket: "campaign-media".into(),
//!     region: "us-east-1".into(),
//!     endpoint_url: None,
//! })?);
//! let uploader = Arc::new(Uploader::new(blobs, Arc::new(DieselFileRecordStore::new(pool.clone()))));
//! let store = Arc::new(DieselContentStore::new(pool));
//!
//! let orchestrator = Orchestrator::new(ContentGenerator::new(providers, uploader), store);
//! let service = CampaignContentService::new(orchestrator);
//!
//! let payload: InvocationPayload = serde_json::from_str(r#"{
//!     "campaignData": {
//!         "title": "Summer Sale",
//!         "brandName": "Acme",
//!         "description": "20% off all items",
//!         "targetAudience": "young professionals"
//!     },
//!     "aiSettings": {"platform": "twitter", "contentType": "copy", "tone": "enthusiastic"}
//! }"#)?;
//!
//! let response = service.invoke(payload).await?;
//! println!("generated {} items", response.generated_count);
//! # Ok(())
//! # }
//! ```

mod payload;
mod service;

pub use payload::{ErrorResponse, InvocationPayload, InvocationResponse, error_status};
pub use service::CampaignContentService;

// Core domain types
pub use fresco_core::{
    CampaignDescriptor, ContentCategory, ContentStatus, GeneratedContentRecord,
    GenerationCell, GenerationSettings, MediaSelection, MediaSource, MediaType, Platform,
    PlatformSelection, StoredFile, Tone, init_telemetry,
};

// Errors
pub use fresco_error::{FrescoError, FrescoResult};

// Providers
pub use fresco_providers::{ProviderConfig, ProviderRegistry, RetryPolicy};

// Storage
pub use fresco_storage::{
    BlobStore, FileRecordStore, MemoryBlobStore, MemoryFileRecordStore, S3BlobStore,
    S3StorageConfig, UploadContext, Uploader,
};

// Persistence
pub use fresco_database::{DieselContentStore, DieselFileRecordStore, PgPool, create_pool};

// Pipeline
pub use fresco_pipeline::{
    CellFailure, CellPreview, ContentGenerator, ContentStore, GenerationOutcome,
    MediaFailurePolicy, MemoryContentStore, Orchestrator,
};
