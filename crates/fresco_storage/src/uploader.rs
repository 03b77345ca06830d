//! Media uploader: normalizes provider payloads to bytes, writes them to the
//! blob store, and records file metadata.

use crate::{BlobStore, StorageResult};
use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use derive_getters::Getters;
use fresco_core::{MediaType, NewStoredFile, StoredFile};
use fresco_error::{DatabaseError, FrescoResult, StorageError, StorageErrorKind};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{instrument, warn};
use uuid::Uuid;

/// Persistence seam for stored-file metadata rows.
#[async_trait]
pub trait FileRecordStore: Send + Sync {
    /// Inserts a stored-file row and returns the persisted record.
    async fn insert_stored_file(&self, file: &NewStoredFile) -> Result<StoredFile, DatabaseError>;
}

/// In-memory file record store for local development and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileRecordStore {
    files: Arc<RwLock<Vec<StoredFile>>>,
}

impl MemoryFileRecordStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows (for testing).
    pub async fn len(&self) -> usize {
        self.files.read().await.len()
    }

    /// Check if the store is empty (for testing).
    pub async fn is_empty(&self) -> bool {
        self.files.read().await.is_empty()
    }

    /// Snapshot of all rows (for testing).
    pub async fn all(&self) -> Vec<StoredFile> {
        self.files.read().await.clone()
    }
}

#[async_trait]
impl FileRecordStore for MemoryFileRecordStore {
    async fn insert_stored_file(&self, file: &NewStoredFile) -> Result<StoredFile, DatabaseError> {
        let record = StoredFile::builder()
            .id(Uuid::new_v4())
            .campaign_id(*file.campaign_id())
            .file_path(file.file_path().clone())
            .public_url(file.public_url().clone())
            .file_size_bytes(*file.file_size_bytes())
            .mime_type(file.mime_type().clone())
            .ai_service(file.ai_service().clone())
            .ai_model(file.ai_model().clone())
            .generation_prompt(file.generation_prompt().clone())
            .generated_content_id(*file.generated_content_id())
            .created_at(Utc::now())
            .build()
            .expect("all stored-file fields are set");

        self.files.write().await.push(record.clone());
        Ok(record)
    }
}

/// Provenance carried alongside an uploaded artifact.
#[derive(Debug, Clone, PartialEq, Getters, derive_builder::Builder)]
#[builder(setter(into), pattern = "owned")]
pub struct UploadContext {
    /// Owning campaign
    campaign_id: Uuid,
    /// Media kind, used in the storage path
    kind: MediaType,
    /// Provider service that generated the artifact
    service: String,
    /// Provider model that generated the artifact
    model: String,
    /// Prompt used for generation
    prompt: String,
}

impl UploadContext {
    /// Creates a builder for `UploadContext`.
    pub fn builder() -> UploadContextBuilder {
        UploadContextBuilder::default()
    }
}

/// Parses a `data:<mime>;base64,<payload>` envelope into mime type and bytes.
fn parse_data_uri(data: &str) -> StorageResult<(String, Vec<u8>)> {
    let rest = data.strip_prefix("data:").ok_or_else(|| {
        StorageError::new(StorageErrorKind::InvalidPayload(
            "Missing data: prefix".to_string(),
        ))
    })?;

    let (mime, payload) = rest.split_once(";base64,").ok_or_else(|| {
        StorageError::new(StorageErrorKind::InvalidPayload(
            "Missing ;base64, separator".to_string(),
        ))
    })?;

    if mime.is_empty() || !mime.contains('/') {
        return Err(StorageError::new(StorageErrorKind::InvalidPayload(
            format!("Invalid mime type: {:?}", mime),
        )));
    }

    use base64::Engine as _;
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| {
            StorageError::new(StorageErrorKind::InvalidPayload(format!(
                "Base64 decode failed: {}",
                e
            )))
        })?;

    Ok((mime.to_string(), bytes))
}

/// File extension for a mime type; unknown types get `bin`.
fn extension_for_mime(mime: &str) -> &'static str {
    match mime {
        "image/png" => "png",
        "image/jpeg" => "jpg",
        "image/webp" => "webp",
        "image/gif" => "gif",
        "video/mp4" => "mp4",
        "video/webm" => "webm",
        "video/quicktime" => "mov",
        _ => "bin",
    }
}

/// Default mime type when a fetched response carries no content type.
fn default_mime_for(kind: MediaType) -> &'static str {
    match kind {
        MediaType::Video => "video/mp4",
        _ => "image/png",
    }
}

/// Builds the storage path `campaigns/{campaign}/{kind}/{kind}_{ts}_{entropy}.{ext}`.
fn build_file_path(campaign_id: Uuid, kind: MediaType, ext: &str) -> String {
    let timestamp = Utc::now().timestamp_millis();
    let entropy = Uuid::new_v4().simple().to_string();
    format!(
        "campaigns/{}/{}/{}_{}_{}.{}",
        campaign_id,
        kind,
        kind,
        timestamp,
        &entropy[..8],
        ext
    )
}

/// Uploads generated media and records its metadata as one logical unit.
#[derive(Clone)]
pub struct Uploader {
    blobs: Arc<dyn BlobStore>,
    records: Arc<dyn FileRecordStore>,
    http: reqwest::Client,
}

impl Uploader {
    /// Creates a new uploader over the given backends.
    pub fn new(blobs: Arc<dyn BlobStore>, records: Arc<dyn FileRecordStore>) -> Self {
        Self {
            blobs,
            records,
            http: reqwest::Client::new(),
        }
    }

    /// Uploads an inline base64 data-URI payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the envelope is invalid, the object write fails,
    /// or metadata persistence fails (the object is then deleted).
    #[instrument(skip(self, data, ctx), fields(campaign_id = %ctx.campaign_id, kind = %ctx.kind))]
    pub async fn upload_base64(&self, data: &str, ctx: &UploadContext) -> FrescoResult<StoredFile> {
        let (mime, bytes) = parse_data_uri(data)?;
        self.store_bytes(Bytes::from(bytes), &mime, ctx).await
    }

    /// Fetches a remote media URL and uploads its bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch fails or returns non-2xx, or the
    /// write/record path fails.
    #[instrument(skip(self, ctx), fields(campaign_id = %ctx.campaign_id, kind = %ctx.kind))]
    pub async fn upload_from_url(&self, url: &str, ctx: &UploadContext) -> FrescoResult<StoredFile> {
        let response = self.http.get(url).send().await.map_err(|e| {
            StorageError::new(StorageErrorKind::Fetch {
                status: None,
                url: format!("{}: {}", url, e),
            })
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(StorageError::new(StorageErrorKind::Fetch {
                status: Some(status.as_u16()),
                url: url.to_string(),
            })
            .into());
        }

        let mime = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.split(';').next().unwrap_or(value).trim().to_string())
            .unwrap_or_else(|| default_mime_for(*ctx.kind()).to_string());

        let bytes = response.bytes().await.map_err(|e| {
            StorageError::new(StorageErrorKind::Fetch {
                status: Some(status.as_u16()),
                url: format!("{}: {}", url, e),
            })
        })?;

        self.store_bytes(bytes, &mime, ctx).await
    }

    /// Writes bytes to the blob store and persists the metadata row.
    ///
    /// The two writes form one logical unit: when the metadata insert fails
    /// the uploaded object is deleted before the error is surfaced, so the
    /// caller never observes a half-completed upload.
    async fn store_bytes(
        &self,
        bytes: Bytes,
        mime: &str,
        ctx: &UploadContext,
    ) -> FrescoResult<StoredFile> {
        let ext = extension_for_mime(mime);
        let path = build_file_path(*ctx.campaign_id(), *ctx.kind(), ext);
        let size = bytes.len() as i64;

        self.blobs.put(&path, bytes, mime).await?;
        let public_url = self.blobs.public_url(&path);

        let new_file = NewStoredFile::builder()
            .campaign_id(*ctx.campaign_id())
            .file_path(path.clone())
            .public_url(public_url)
            .file_size_bytes(size)
            .mime_type(mime)
            .ai_service(ctx.service().clone())
            .ai_model(ctx.model().clone())
            .generation_prompt(ctx.prompt().clone())
            .build()
            .expect("all stored-file fields are set");

        match self.records.insert_stored_file(&new_file).await {
            Ok(record) => Ok(record),
            Err(db_err) => {
                if let Err(delete_err) = self.blobs.delete(&path).await {
                    warn!(
                        path = %path,
                        error = %delete_err,
                        "Compensating delete failed, object is orphaned"
                    );
                }
                Err(db_err.into())
            }
        }
    }
}
