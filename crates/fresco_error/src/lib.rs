//! Error types for the Fresco content generation pipeline.
//!
//! Each concern (provider calls, object storage, persistence, configuration)
//! has its own error type carrying a kind enum plus the source location where
//! the error was created. The aggregate [`FrescoError`] is what crosses crate
//! boundaries.

mod config;
mod database;
mod provider;
mod storage;

pub use config::ConfigError;
pub use database::{DatabaseError, DatabaseErrorKind};
pub use provider::{ProviderError, ProviderErrorKind};
pub use storage::{StorageError, StorageErrorKind};

/// Aggregate error for pipeline operations that span concerns.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum FrescoError {
    /// Provider adapter failure (HTTP, rate limit, malformed response).
    #[display("{}", _0)]
    Provider(ProviderError),
    /// Object storage or upload failure.
    #[display("{}", _0)]
    Storage(StorageError),
    /// Persistence failure.
    #[display("{}", _0)]
    Database(DatabaseError),
    /// Configuration failure.
    #[display("{}", _0)]
    Config(ConfigError),
}

impl FrescoError {
    /// True when the error is a missing-credential condition, which is fatal
    /// for the whole invocation rather than a single cell.
    pub fn is_credential_missing(&self) -> bool {
        matches!(
            self,
            FrescoError::Provider(ProviderError {
                kind: ProviderErrorKind::CredentialMissing(_),
                ..
            })
        )
    }
}

/// Result type alias used across the Fresco crates.
pub type FrescoResult<T> = Result<T, FrescoError>;
