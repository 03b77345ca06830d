//! S3 blob store backed by the `object_store` crate.

use crate::{BlobStore, StorageResult};
use async_trait::async_trait;
use bytes::Bytes;
use fresco_error::{StorageError, StorageErrorKind};
use object_store::Error as ObjectStoreError;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path;
use object_store::{ObjectStoreExt, PutPayload, Result as ObjectResult};
use serde::Deserialize;

/// S3 backend configuration.
///
/// `endpoint_url` targets S3-compatible providers (MinIO, Spaces); when set,
/// public URLs are path-style under that endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct S3StorageConfig {
    /// Bucket name
    pub bucket: String,
    /// AWS region (or region identifier for S3-compatible providers)
    pub region: String,
    /// Optional custom endpoint URL for S3-compatible providers
    #[serde(default)]
    pub endpoint_url: Option<String>,
}

/// S3 blob store.
#[derive(Clone)]
pub struct S3BlobStore {
    store: AmazonS3,
    bucket: String,
    region: String,
    endpoint_url: Option<String>,
}

impl S3BlobStore {
    /// Creates a new S3 store. Credentials come from the environment via
    /// `AmazonS3Builder::from_env`.
    ///
    /// # Errors
    ///
    /// Returns an error if the builder configuration is invalid.
    pub fn new(config: S3StorageConfig) -> StorageResult<Self> {
        let mut builder = AmazonS3Builder::from_env()
            .with_region(config.region.clone())
            .with_bucket_name(config.bucket.clone());

        if let Some(ref endpoint) = config.endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::new(StorageErrorKind::InvalidConfig(e.to_string())))?;

        Ok(Self {
            store,
            bucket: config.bucket,
            region: config.region,
            endpoint_url: config.endpoint_url,
        })
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn put(&self, path: &str, bytes: Bytes, _content_type: &str) -> StorageResult<()> {
        let size = bytes.len() as u64;
        let location = Path::from(path.to_string());
        let start = std::time::Instant::now();

        let result: ObjectResult<_> = self.store.put(&location, PutPayload::from(bytes)).await;

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %path,
                size_bytes = size,
                "S3 upload failed"
            );
            StorageError::new(StorageErrorKind::Upload(e.to_string()))
        })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %path,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload successful"
        );

        Ok(())
    }

    async fn get(&self, path: &str) -> StorageResult<Bytes> {
        let location = Path::from(path.to_string());

        let result: ObjectResult<_> = self.store.get(&location).await;

        let result = result.map_err(|e| match e {
            ObjectStoreError::NotFound { .. } => {
                StorageError::new(StorageErrorKind::NotFound(path.to_string()))
            }
            other => {
                tracing::error!(
                    error = %other,
                    bucket = %self.bucket,
                    key = %path,
                    "S3 download failed"
                );
                StorageError::new(StorageErrorKind::Upload(other.to_string()))
            }
        })?;

        result
            .bytes()
            .await
            .map_err(|e| StorageError::new(StorageErrorKind::Upload(e.to_string())))
    }

    async fn delete(&self, path: &str) -> StorageResult<()> {
        let location = Path::from(path.to_string());

        let result: ObjectResult<_> = self.store.delete(&location).await;

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %path,
                "S3 delete failed"
            );
            StorageError::new(StorageErrorKind::Delete(e.to_string()))
        })
    }

    /// For AWS S3, uses the standard virtual-hosted format; for S3-compatible
    /// providers, path-style under the configured endpoint.
    fn public_url(&self, path: &str) -> String {
        format_public_url(
            self.endpoint_url.as_deref(),
            &self.bucket,
            &self.region,
            path,
        )
    }
}

fn format_public_url(endpoint: Option<&str>, bucket: &str, region: &str, path: &str) -> String {
    if let Some(endpoint) = endpoint {
        let base_url = endpoint.trim_end_matches('/');
        format!("{}/{}/{}", base_url, bucket, path)
    } else {
        format!("https://{}.s3.{}.amazonaws.com/{}", bucket, region, path)
    }
}
