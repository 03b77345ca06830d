//! Media payload shapes returned by generation providers.

use serde::{Deserialize, Serialize};

/// Where a generated media payload is sourced from.
///
/// Providers return either a remote URL to fetch or an inline base64
/// data-URI (`data:<mime>;base64,<payload>`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaSource {
    /// URL to fetch the content from
    Url(String),
    /// Base64 data-URI with inline content
    Base64(String),
}
