//! Blob store abstraction.

use async_trait::async_trait;
use bytes::Bytes;
use fresco_error::StorageError;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Path-addressed binary storage.
///
/// Backends must be safe to share across cells being processed concurrently;
/// all writes are independent inserts keyed by generated paths.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Writes an object at the given path.
    async fn put(&self, path: &str, bytes: Bytes, content_type: &str) -> StorageResult<()>;

    /// Reads an object's bytes.
    async fn get(&self, path: &str) -> StorageResult<Bytes>;

    /// Deletes an object. Used for compensating cleanup after a failed
    /// metadata write.
    async fn delete(&self, path: &str) -> StorageResult<()>;

    /// Public URL for the object at the given path.
    fn public_url(&self, path: &str) -> String;
}
