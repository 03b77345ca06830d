//! Campaign content service: the invocation entry point.

use crate::{InvocationPayload, InvocationResponse};
use fresco_error::FrescoResult;
use fresco_pipeline::Orchestrator;
use tracing::{info, instrument};
use uuid::Uuid;

/// Drives one generation run per invocation.
#[derive(Clone)]
pub struct CampaignContentService {
    orchestrator: Orchestrator,
}

impl CampaignContentService {
    /// Creates a service over a wired orchestrator.
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self { orchestrator }
    }

    /// Runs generation for the payload's campaign.
    ///
    /// A missing `campaignId` mints a new one; the response always carries
    /// the id the records were persisted under.
    ///
    /// # Errors
    ///
    /// Returns an invocation-level error when a requested media type has no
    /// configured provider. Per-cell failures do not error; they appear in
    /// the response's failures list.
    #[instrument(skip(self, payload), fields(campaign = %payload.campaign_data.title()))]
    pub async fn invoke(&self, payload: InvocationPayload) -> FrescoResult<InvocationResponse> {
        let campaign_id = payload.campaign_id.unwrap_or_else(Uuid::new_v4);

        info!(
            campaign_id = %campaign_id,
            minted = payload.campaign_id.is_none(),
            "Handling generation invocation"
        );

        let outcome = self
            .orchestrator
            .generate_campaign_content(campaign_id, &payload.campaign_data, &payload.ai_settings)
            .await?;

        Ok(InvocationResponse {
            success: true,
            campaign_id,
            generated_count: *outcome.generated_count(),
            preview: outcome.preview().clone(),
            failures: outcome.failures().clone(),
        })
    }
}
