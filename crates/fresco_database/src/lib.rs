//! Diesel persistence gateways for Fresco.
//!
//! Implements the pipeline's `ContentStore` and the storage crate's
//! `FileRecordStore` seams over PostgreSQL. Content upserts use
//! `ON CONFLICT (campaign_id, cell_key) DO UPDATE` so re-generation updates
//! records in place instead of duplicating them.

mod connection;
mod gateway;
mod models;
pub mod schema;

pub use connection::{PgPool, create_pool, establish_connection};
pub use gateway::{DieselContentStore, DieselFileRecordStore};
pub use models::{
    GeneratedContentRow, NewGeneratedContentRow, NewStoredFileRow, StoredFileRow,
};

/// Result type for database operations.
pub type DatabaseResult<T> = Result<T, fresco_error::DatabaseError>;
