//! Matrix fan-out over generation cells.

use crate::{ContentGenerator, ContentStore};
use derive_getters::Getters;
use fresco_core::{
    CampaignDescriptor, ContentCategory, GeneratedContentRecord, GenerationCell,
    GenerationSettings, MediaType, NewGeneratedContent, Platform,
};
use fresco_error::{FrescoResult, ProviderError, ProviderErrorKind};
use futures::StreamExt;
use futures::stream;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

const PREVIEW_CHARS: usize = 150;
const DEFAULT_CONCURRENCY: usize = 4;

/// Truncated summary of one generated cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct CellPreview {
    /// Target platform
    platform: Platform,
    /// Content category
    content_type: ContentCategory,
    /// Media type of the persisted record
    media_type: MediaType,
    /// Generated text, truncated to ~150 characters
    content: String,
    /// True when the record carries a media URL
    has_media: bool,
}

/// A cell that failed to generate, with its error summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct CellFailure {
    /// Target platform
    platform: Platform,
    /// Content category
    content_type: ContentCategory,
    /// Media type that was requested
    media_type: MediaType,
    /// Why the cell failed
    error: String,
}

/// Aggregate result of one generation run.
///
/// `generated_count` equals the number of persisted records exactly; cells
/// absent from `preview` appear in `failures`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct GenerationOutcome {
    /// Number of records persisted
    generated_count: usize,
    /// Per-cell summaries in deterministic enumeration order
    preview: Vec<CellPreview>,
    /// Cells that generated nothing
    failures: Vec<CellFailure>,
}

/// Drives the generation matrix for a campaign.
#[derive(Clone)]
pub struct Orchestrator {
    generator: ContentGenerator,
    store: Arc<dyn ContentStore>,
    concurrency: usize,
}

impl Orchestrator {
    /// Creates an orchestrator with the default concurrency cap.
    pub fn new(generator: ContentGenerator, store: Arc<dyn ContentStore>) -> Self {
        Self {
            generator,
            store,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Sets the concurrency cap. A cap of 1 processes cells sequentially.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Expands settings into the full cell matrix: platform-major, then
    /// category (organic before paid), then media type.
    pub fn expand_cells(settings: &GenerationSettings) -> Vec<GenerationCell> {
        let platforms = settings.platform.expand();
        let media_types = settings.content_type.expand();

        let mut cells =
            Vec::with_capacity(platforms.len() * ContentCategory::all().len() * media_types.len());
        for platform in &platforms {
            for category in ContentCategory::all() {
                for media_type in &media_types {
                    cells.push(GenerationCell::new(*platform, category, *media_type));
                }
            }
        }
        cells
    }

    /// Generates content for every cell of the campaign's matrix.
    ///
    /// Cells fail independently: a per-cell error is logged, recorded in the
    /// outcome's failures, and the run continues. The whole invocation fails
    /// only when a requested media type has no configured provider, since no cell
    /// of that kind could ever succeed.
    ///
    /// # Errors
    ///
    /// Returns a credential error when a requested capability has no
    /// provider.
    #[instrument(skip(self, campaign, settings), fields(campaign_id = %campaign_id))]
    pub async fn generate_campaign_content(
        &self,
        campaign_id: Uuid,
        campaign: &CampaignDescriptor,
        settings: &GenerationSettings,
    ) -> FrescoResult<GenerationOutcome> {
        for media_type in settings.content_type.expand() {
            if !self.generator.providers().supports(media_type) {
                return Err(ProviderError::new(ProviderErrorKind::CredentialMissing(
                    media_type.to_string(),
                ))
                .into());
            }
        }

        let cells = Self::expand_cells(settings);
        info!(cell_count = cells.len(), "Starting generation run");

        // Buffered streaming preserves enumeration order, so the preview
        // list is deterministic regardless of completion order.
        let results: Vec<(GenerationCell, FrescoResult<GeneratedContentRecord>)> =
            stream::iter(cells.into_iter().map(|cell| async move {
                let result = self
                    .process_cell(campaign_id, cell, campaign, settings)
                    .await;
                (cell, result)
            }))
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut preview = Vec::new();
        let mut failures = Vec::new();
        for (cell, result) in results {
            match result {
                Ok(record) => preview.push(CellPreview {
                    platform: *record.platform(),
                    content_type: *record.category(),
                    media_type: *record.media_type(),
                    content: truncate_chars(record.content_text(), PREVIEW_CHARS),
                    has_media: record.media_url().is_some(),
                }),
                Err(err) => {
                    warn!(
                        platform = %cell.platform,
                        category = %cell.category,
                        media_type = %cell.media_type,
                        error = %err,
                        "Cell generation failed, continuing"
                    );
                    failures.push(CellFailure {
                        platform: cell.platform,
                        content_type: cell.category,
                        media_type: cell.media_type,
                        error: err.to_string(),
                    });
                }
            }
        }

        let generated_count = preview.len();
        info!(
            generated = generated_count,
            failed = failures.len(),
            "Generation run complete"
        );

        Ok(GenerationOutcome {
            generated_count,
            preview,
            failures,
        })
    }

    async fn process_cell(
        &self,
        campaign_id: Uuid,
        cell: GenerationCell,
        campaign: &CampaignDescriptor,
        settings: &GenerationSettings,
    ) -> FrescoResult<GeneratedContentRecord> {
        let draft = self
            .generator
            .generate(campaign_id, cell, campaign, settings)
            .await?;

        // The draft's cell can differ from the requested one when a media
        // failure degraded to a text script.
        let record_cell = *draft.cell();
        let cell_key = record_cell.idempotency_key(campaign_id, draft.prompt());

        let new_content = NewGeneratedContent::builder()
            .campaign_id(campaign_id)
            .cell_key(cell_key)
            .platform(record_cell.platform)
            .category(record_cell.category)
            .media_type(record_cell.media_type)
            .content_text(draft.content_text().clone())
            .media_url(
                draft
                    .media()
                    .as_ref()
                    .map(|stored| stored.public_url().clone()),
            )
            .generated_prompt(draft.prompt().clone())
            .build()
            .expect("all generated-content fields are set");

        self.store
            .upsert_generated(&new_content)
            .await
            .map_err(Into::into)
    }
}

/// Truncates to a character count, respecting char boundaries.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        text.chars().take(max_chars).collect()
    }
}
