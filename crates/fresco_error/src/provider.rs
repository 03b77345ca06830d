//! Provider error types.

/// Kinds of provider adapter errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ProviderErrorKind {
    /// No provider credential is configured for a capability
    #[display("No provider configured for {}", _0)]
    CredentialMissing(String),
    /// Rate limited (HTTP 429) and the retry bound was exhausted
    #[display("Rate limited after {} retries", retries)]
    RateLimited {
        /// Number of retries attempted before giving up
        retries: u32,
    },
    /// Provider returned a non-success status
    #[display("API error (status {}): {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body captured for diagnostics
        message: String,
    },
    /// Provider returned 2xx but the expected result field is absent
    #[display("Malformed response: {}", _0)]
    MalformedResponse(String),
    /// Transport-level failure before a status was received
    #[display("HTTP error: {}", _0)]
    Http(String),
}

/// Provider error with location tracking.
///
/// # Examples
///
/// ```
/// use fresco_error::{ProviderError, ProviderErrorKind};
///
/// let err = ProviderError::new(ProviderErrorKind::CredentialMissing("video".to_string()));
/// assert!(format!("{}", err).contains("No provider configured"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Provider Error: {} at line {} in {}", kind, line, file)]
pub struct ProviderError {
    /// The kind of error that occurred
    pub kind: ProviderErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ProviderError {
    /// Create a new provider error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ProviderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// True for an HTTP 429 response (the only retryable condition).
    pub fn is_rate_limit_status(&self) -> bool {
        matches!(self.kind, ProviderErrorKind::Api { status: 429, .. })
    }
}
