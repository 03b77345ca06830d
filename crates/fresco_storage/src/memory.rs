//! In-memory blob store for local development and tests.

use crate::{BlobStore, StorageResult};
use async_trait::async_trait;
use bytes::Bytes;
use fresco_error::{StorageError, StorageErrorKind};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Blob store backed by a HashMap. All data is lost on drop.
#[derive(Debug, Clone)]
pub struct MemoryBlobStore {
    blobs: Arc<RwLock<HashMap<String, (Bytes, String)>>>,
    base_url: String,
}

impl Default for MemoryBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBlobStore {
    /// Creates an empty store with the `memory://` URL scheme.
    pub fn new() -> Self {
        Self {
            blobs: Arc::new(RwLock::new(HashMap::new())),
            base_url: "memory://".to_string(),
        }
    }

    /// Number of stored objects (for testing).
    pub async fn len(&self) -> usize {
        self.blobs.read().await.len()
    }

    /// Check if the store is empty (for testing).
    pub async fn is_empty(&self) -> bool {
        self.blobs.read().await.is_empty()
    }

    /// True when an object exists at the path (for testing).
    pub async fn contains(&self, path: &str) -> bool {
        self.blobs.read().await.contains_key(path)
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, path: &str, bytes: Bytes, content_type: &str) -> StorageResult<()> {
        self.blobs
            .write()
            .await
            .insert(path.to_string(), (bytes, content_type.to_string()));
        Ok(())
    }

    async fn get(&self, path: &str) -> StorageResult<Bytes> {
        self.blobs
            .read()
            .await
            .get(path)
            .map(|(bytes, _)| bytes.clone())
            .ok_or_else(|| StorageError::new(StorageErrorKind::NotFound(path.to_string())))
    }

    async fn delete(&self, path: &str) -> StorageResult<()> {
        self.blobs
            .write()
            .await
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| StorageError::new(StorageErrorKind::NotFound(path.to_string())))
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
