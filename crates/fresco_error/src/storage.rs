//! Storage error types.

/// Kinds of storage errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StorageErrorKind {
    /// Payload does not match the expected data-URI envelope
    InvalidPayload(String),
    /// Fetching a remote media URL failed
    Fetch {
        /// HTTP status, when a response was received
        status: Option<u16>,
        /// The URL that was fetched
        url: String,
    },
    /// Object write failed
    Upload(String),
    /// Object delete failed
    Delete(String),
    /// Object not found at the specified path
    NotFound(String),
    /// Invalid storage configuration
    InvalidConfig(String),
}

impl std::fmt::Display for StorageErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageErrorKind::InvalidPayload(msg) => write!(f, "Invalid payload: {}", msg),
            StorageErrorKind::Fetch { status, url } => match status {
                Some(code) => write!(f, "Fetch failed (status {}): {}", code, url),
                None => write!(f, "Fetch failed: {}", url),
            },
            StorageErrorKind::Upload(msg) => write!(f, "Upload failed: {}", msg),
            StorageErrorKind::Delete(msg) => write!(f, "Delete failed: {}", msg),
            StorageErrorKind::NotFound(path) => write!(f, "Object not found: {}", path),
            StorageErrorKind::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

/// Storage error with location tracking.
///
/// # Examples
///
/// ```
/// use fresco_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::NotFound("campaigns/x/image".to_string()));
/// assert!(format!("{}", err).contains("not found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// The kind of error that occurred
    pub kind: StorageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StorageError {
    /// Create a new storage error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
