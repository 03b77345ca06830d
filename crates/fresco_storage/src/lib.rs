//! Object storage backends and the media uploader for Fresco.
//!
//! Generated binaries arrive as base64 data-URIs or remote URLs; the
//! [`Uploader`] normalizes them to bytes, writes them under
//! `campaigns/{campaign}/{kind}/`, and records file metadata through the
//! [`FileRecordStore`] seam. A metadata failure after a successful object
//! write triggers a compensating delete so no orphaned object masquerades as
//! a successful upload.

mod backend;
mod memory;
mod s3;
mod uploader;

pub use backend::{BlobStore, StorageResult};
pub use memory::MemoryBlobStore;
pub use s3::{S3BlobStore, S3StorageConfig};
pub use uploader::{
    FileRecordStore, MemoryFileRecordStore, UploadContext, UploadContextBuilder, Uploader,
};
