//! Invocation payload and response DTOs.
//!
//! Top-level keys are camelCase; preview/failure entries keep the snake_case
//! keys the dashboard consumes.

use fresco_core::{CampaignDescriptor, GenerationSettings};
use fresco_error::{FrescoError, ProviderErrorKind};
use fresco_pipeline::{CellFailure, CellPreview};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Inbound generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationPayload {
    /// Owning campaign; minted when absent
    #[serde(default)]
    pub campaign_id: Option<Uuid>,
    /// Campaign descriptor driving prompt construction
    pub campaign_data: CampaignDescriptor,
    /// Generation settings; defaults produce the full matrix
    #[serde(default)]
    pub ai_settings: GenerationSettings,
}

/// Aggregate response for a completed generation run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResponse {
    /// Always true for a completed run; per-cell failures are listed below
    pub success: bool,
    /// The campaign the records belong to (minted when the payload had none)
    pub campaign_id: Uuid,
    /// Number of records persisted
    pub generated_count: usize,
    /// Per-cell summaries in deterministic enumeration order
    pub preview: Vec<CellPreview>,
    /// Cells that generated nothing, with error summaries
    pub failures: Vec<CellFailure>,
}

/// Error response for an aborted invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error summary
    pub error: String,
}

impl ErrorResponse {
    /// Builds the response body for an invocation-level error.
    pub fn from_error(err: &FrescoError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

/// HTTP-equivalent status code for an invocation-level error.
///
/// Configuration problems (including missing credentials) are the caller's
/// deployment at fault: 500. Upstream provider and storage failures map to
/// 502.
pub fn error_status(err: &FrescoError) -> u16 {
    match err {
        FrescoError::Config(_) => 500,
        FrescoError::Database(_) => 500,
        FrescoError::Provider(provider) => match provider.kind {
            ProviderErrorKind::CredentialMissing(_) => 500,
            _ => 502,
        },
        FrescoError::Storage(_) => 502,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fresco_core::{MediaSelection, MediaType, Platform, PlatformSelection, Tone};
    use fresco_error::{ConfigError, ProviderError};

    #[test]
    fn payload_parses_camel_case_wire_format() {
        let payload: InvocationPayload = serde_json::from_str(
            r#"{
                "campaignId": "7f3c8a2e-1b4d-4f6a-9c0e-2d5b8a7c4e1f",
                "campaignData": {
                    "title": "Summer Sale",
                    "brandName": "Acme",
                    "description": "20% off all items",
                    "targetAudience": "young professionals"
                },
                "aiSettings": {"platform": "twitter", "contentType": "copy", "tone": "enthusiastic"}
            }"#,
        )
        .expect("valid payload");

        assert!(payload.campaign_id.is_some());
        assert_eq!(payload.campaign_data.brand_name(), "Acme");
        assert_eq!(
            payload.ai_settings.platform,
            PlatformSelection::One(Platform::Twitter)
        );
        assert_eq!(
            payload.ai_settings.content_type,
            MediaSelection::One(MediaType::Copy)
        );
        assert_eq!(payload.ai_settings.tone, Tone::Enthusiastic);
    }

    #[test]
    fn payload_defaults_settings_when_absent() {
        let payload: InvocationPayload = serde_json::from_str(
            r#"{"campaignData": {"title": "T", "brandName": "B", "description": "D", "targetAudience": "A"}}"#,
        )
        .expect("valid payload");

        assert!(payload.campaign_id.is_none());
        assert_eq!(payload.ai_settings.platform, PlatformSelection::All);
    }

    #[test]
    fn credential_errors_are_configuration_faults() {
        let missing = FrescoError::from(ProviderError::new(
            ProviderErrorKind::CredentialMissing("video".to_string()),
        ));
        assert_eq!(error_status(&missing), 500);

        let upstream = FrescoError::from(ProviderError::new(ProviderErrorKind::Api {
            status: 503,
            message: "down".to_string(),
        }));
        assert_eq!(error_status(&upstream), 502);

        let config = FrescoError::from(ConfigError::new("bad config"));
        assert_eq!(error_status(&config), 500);
    }
}
