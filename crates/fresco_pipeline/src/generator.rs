//! Per-cell content generation.
//!
//! Copy cells call the text provider directly. Image and video cells call
//! their provider, then hand the payload to the uploader; the draft carries
//! the stored file so the orchestrator can persist the record with its media
//! URL in one step. Failures propagate as typed errors; there is no
//! placeholder content.

use crate::prompt;
use derive_getters::Getters;
use fresco_core::{
    CampaignDescriptor, GenerationCell, GenerationSettings, MediaSource, MediaType, StoredFile,
};
use fresco_error::{FrescoError, FrescoResult, ProviderError, ProviderErrorKind};
use fresco_providers::{ImageRequest, ProviderRegistry, TextRequest, VideoRequest};
use fresco_storage::{UploadContext, Uploader};
use std::sync::Arc;
use tracing::{instrument, warn};
use uuid::Uuid;

const COPY_MAX_TOKENS: u32 = 1024;

/// What to do when an image/video cell fails.
///
/// Applied uniformly to both media capabilities. The default propagates the
/// failure so the cell produces no record at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaFailurePolicy {
    /// Fail the cell; nothing is persisted.
    #[default]
    Propagate,
    /// Generate a text script for the cell instead, recorded as copy.
    DegradeToText,
}

/// Output of one successful cell generation.
///
/// `cell` may differ from the requested cell when a media failure degraded
/// to a text script (media type becomes copy).
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct GeneratedDraft {
    /// The cell the draft belongs to
    cell: GenerationCell,
    /// Generated text (copy body, caption, or script)
    content_text: String,
    /// The exact prompt sent to the provider
    prompt: String,
    /// Uploaded artifact, present for image/video
    media: Option<StoredFile>,
}

/// Generates content for a single cell.
#[derive(Clone)]
pub struct ContentGenerator {
    providers: Arc<ProviderRegistry>,
    uploader: Arc<Uploader>,
    policy: MediaFailurePolicy,
}

impl ContentGenerator {
    /// Creates a generator with the default propagate-on-failure policy.
    pub fn new(providers: Arc<ProviderRegistry>, uploader: Arc<Uploader>) -> Self {
        Self {
            providers,
            uploader,
            policy: MediaFailurePolicy::default(),
        }
    }

    /// Sets the media failure policy.
    pub fn with_policy(mut self, policy: MediaFailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The provider registry backing this generator.
    pub fn providers(&self) -> &ProviderRegistry {
        &self.providers
    }

    /// Generates the draft for one cell.
    ///
    /// # Errors
    ///
    /// Returns an error when the needed provider is missing, the provider
    /// call fails past its retry bound, the response is malformed, or the
    /// upload/metadata path fails (for media cells with the propagate
    /// policy).
    #[instrument(skip(self, campaign, settings), fields(cell = %cell, campaign_id = %campaign_id))]
    pub async fn generate(
        &self,
        campaign_id: Uuid,
        cell: GenerationCell,
        campaign: &CampaignDescriptor,
        settings: &GenerationSettings,
    ) -> FrescoResult<GeneratedDraft> {
        match cell.media_type {
            MediaType::Copy => self.generate_copy(cell, campaign, settings).await,
            MediaType::Image | MediaType::Video => {
                let result = self
                    .generate_media(campaign_id, cell, campaign, settings)
                    .await;
                match (result, self.policy) {
                    (Ok(draft), _) => Ok(draft),
                    (Err(err), MediaFailurePolicy::Propagate) => Err(err),
                    (Err(err), MediaFailurePolicy::DegradeToText) => {
                        warn!(cell = %cell, error = %err, "Media cell failed, degrading to text script");
                        self.degrade_to_script(cell, campaign, settings).await
                    }
                }
            }
        }
    }

    async fn generate_copy(
        &self,
        cell: GenerationCell,
        campaign: &CampaignDescriptor,
        settings: &GenerationSettings,
    ) -> FrescoResult<GeneratedDraft> {
        let text_provider = self.providers.text().ok_or_else(missing_text_provider)?;

        let prompt_text = prompt::copy_prompt(&cell, campaign, settings);
        let request = TextRequest::builder()
            .prompt(prompt_text.clone())
            .max_tokens(Some(COPY_MAX_TOKENS))
            .temperature(Some(prompt::temperature_for(settings.tone)))
            .build()
            .expect("all text request fields are set");

        let output = text_provider.generate_text(&request).await?;

        Ok(GeneratedDraft {
            cell,
            content_text: output.into_text(),
            prompt: prompt_text,
            media: None,
        })
    }

    async fn generate_media(
        &self,
        campaign_id: Uuid,
        cell: GenerationCell,
        campaign: &CampaignDescriptor,
        settings: &GenerationSettings,
    ) -> FrescoResult<GeneratedDraft> {
        let (prompt_text, source, service, model) = match cell.media_type {
            MediaType::Image => {
                let provider = self.providers.image().ok_or_else(|| {
                    FrescoError::from(ProviderError::new(ProviderErrorKind::CredentialMissing(
                        "image".to_string(),
                    )))
                })?;
                let prompt_text = prompt::image_prompt(&cell, campaign, settings);
                let request = ImageRequest::builder()
                    .prompt(prompt_text.clone())
                    .aspect_ratio(prompt::aspect_for(cell.platform))
                    .build()
                    .expect("all image request fields are set");
                let source = provider.generate_image(&request).await?;
                (
                    prompt_text,
                    source,
                    provider.service().to_string(),
                    provider.model().to_string(),
                )
            }
            MediaType::Video => {
                let provider = self.providers.video().ok_or_else(|| {
                    FrescoError::from(ProviderError::new(ProviderErrorKind::CredentialMissing(
                        "video".to_string(),
                    )))
                })?;
                let prompt_text = prompt::video_prompt(&cell, campaign, settings);
                let request = VideoRequest::builder()
                    .prompt(prompt_text.clone())
                    .build()
                    .expect("all video request fields are set");
                let source = provider.generate_video(&request).await?;
                (
                    prompt_text,
                    source,
                    provider.service().to_string(),
                    provider.model().to_string(),
                )
            }
            MediaType::Copy => unreachable!("copy cells are handled by generate_copy"),
        };

        let ctx = UploadContext::builder()
            .campaign_id(campaign_id)
            .kind(cell.media_type)
            .service(service)
            .model(model)
            .prompt(prompt_text.clone())
            .build()
            .expect("all upload context fields are set");

        let stored = match source {
            MediaSource::Base64(data) => self.uploader.upload_base64(&data, &ctx).await?,
            MediaSource::Url(url) => self.uploader.upload_from_url(&url, &ctx).await?,
        };

        let caption = match cell.media_type {
            MediaType::Video => format!(
                "Campaign video for \"{}\" on {}",
                campaign.title(),
                cell.platform
            ),
            _ => format!(
                "Campaign visual for \"{}\" on {}",
                campaign.title(),
                cell.platform
            ),
        };

        Ok(GeneratedDraft {
            cell,
            content_text: caption,
            prompt: prompt_text,
            media: Some(stored),
        })
    }

    /// Fallback path: record a text script as a copy cell.
    async fn degrade_to_script(
        &self,
        cell: GenerationCell,
        campaign: &CampaignDescriptor,
        settings: &GenerationSettings,
    ) -> FrescoResult<GeneratedDraft> {
        let text_provider = self.providers.text().ok_or_else(missing_text_provider)?;

        let prompt_text = prompt::script_prompt(&cell, campaign, settings);
        let request = TextRequest::builder()
            .prompt(prompt_text.clone())
            .max_tokens(Some(COPY_MAX_TOKENS))
            .temperature(Some(prompt::temperature_for(settings.tone)))
            .build()
            .expect("all text request fields are set");

        let output = text_provider.generate_text(&request).await?;

        // The degraded record is copy: the media-consistency invariant
        // (image/video rows always carry a media URL) stays intact.
        let degraded = GenerationCell::new(cell.platform, cell.category, MediaType::Copy);

        Ok(GeneratedDraft {
            cell: degraded,
            content_text: output.into_text(),
            prompt: prompt_text,
            media: None,
        })
    }
}

fn missing_text_provider() -> FrescoError {
    FrescoError::from(ProviderError::new(ProviderErrorKind::CredentialMissing(
        "text".to_string(),
    )))
}
