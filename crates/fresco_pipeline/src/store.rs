//! Persistence seam for generated content records.

use async_trait::async_trait;
use chrono::Utc;
use fresco_core::{GeneratedContentRecord, NewGeneratedContent};
use fresco_error::DatabaseError;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Persistence seam used by the orchestrator.
///
/// Upserts are keyed by `(campaign_id, cell_key)`: re-running the same
/// campaign with the same settings updates existing records instead of
/// duplicating them.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Inserts or updates the record for a generation cell.
    async fn upsert_generated(
        &self,
        content: &NewGeneratedContent,
    ) -> Result<GeneratedContentRecord, DatabaseError>;

    /// Lists all records for a campaign.
    async fn list_for_campaign(
        &self,
        campaign_id: Uuid,
    ) -> Result<Vec<GeneratedContentRecord>, DatabaseError>;
}

/// In-memory content store for unit tests and local development.
///
/// Stores records in a HashMap keyed by `(campaign_id, cell_key)` behind an
/// RwLock. All data is lost when the store is dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryContentStore {
    records: Arc<RwLock<HashMap<(Uuid, String), GeneratedContentRecord>>>,
}

impl MemoryContentStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records (for testing).
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Check if the store is empty (for testing).
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Clear all records (for testing).
    pub async fn clear(&self) {
        self.records.write().await.clear();
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn upsert_generated(
        &self,
        content: &NewGeneratedContent,
    ) -> Result<GeneratedContentRecord, DatabaseError> {
        let key = (*content.campaign_id(), content.cell_key().clone());
        let mut records = self.records.write().await;
        let now = Utc::now();

        // Preserve identity and creation time on conflict, matching the
        // database gateway's ON CONFLICT DO UPDATE semantics.
        let (id, created_at) = records
            .get(&key)
            .map(|existing| (*existing.id(), *existing.created_at()))
            .unwrap_or_else(|| (Uuid::new_v4(), now));

        let record = GeneratedContentRecord::builder()
            .id(id)
            .campaign_id(*content.campaign_id())
            .cell_key(content.cell_key().clone())
            .platform(*content.platform())
            .category(*content.category())
            .media_type(*content.media_type())
            .content_text(content.content_text().clone())
            .media_url(content.media_url().clone())
            .generated_prompt(content.generated_prompt().clone())
            .status(*content.status())
            .created_at(created_at)
            .updated_at(now)
            .build()
            .expect("all generated-content fields are set");

        records.insert(key, record.clone());
        Ok(record)
    }

    async fn list_for_campaign(
        &self,
        campaign_id: Uuid,
    ) -> Result<Vec<GeneratedContentRecord>, DatabaseError> {
        let records = self.records.read().await;
        let mut results: Vec<GeneratedContentRecord> = records
            .values()
            .filter(|record| *record.campaign_id() == campaign_id)
            .cloned()
            .collect();

        // Sort for consistent ordering
        results.sort_by(|a, b| {
            a.created_at()
                .cmp(b.created_at())
                .then_with(|| a.cell_key().cmp(b.cell_key()))
        });
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fresco_core::{ContentCategory, MediaType, Platform};

    fn new_content(campaign_id: Uuid, cell_key: &str, text: &str) -> NewGeneratedContent {
        NewGeneratedContent::builder()
            .campaign_id(campaign_id)
            .cell_key(cell_key)
            .platform(Platform::Twitter)
            .category(ContentCategory::OrganicPost)
            .media_type(MediaType::Copy)
            .content_text(text)
            .generated_prompt("prompt")
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn upsert_is_idempotent_per_cell_key() {
        let store = MemoryContentStore::new();
        let campaign = Uuid::new_v4();

        let first = store
            .upsert_generated(&new_content(campaign, "key-1", "v1"))
            .await
            .unwrap();
        let second = store
            .upsert_generated(&new_content(campaign, "key-1", "v2"))
            .await
            .unwrap();

        assert_eq!(store.len().await, 1);
        assert_eq!(first.id(), second.id());
        assert_eq!(second.content_text(), "v2");
    }

    #[tokio::test]
    async fn distinct_cell_keys_create_distinct_records() {
        let store = MemoryContentStore::new();
        let campaign = Uuid::new_v4();

        store
            .upsert_generated(&new_content(campaign, "key-1", "a"))
            .await
            .unwrap();
        store
            .upsert_generated(&new_content(campaign, "key-2", "b"))
            .await
            .unwrap();

        assert_eq!(store.len().await, 2);
        assert_eq!(store.list_for_campaign(campaign).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn list_filters_by_campaign() {
        let store = MemoryContentStore::new();
        let campaign_a = Uuid::new_v4();
        let campaign_b = Uuid::new_v4();

        store
            .upsert_generated(&new_content(campaign_a, "key-1", "a"))
            .await
            .unwrap();
        store
            .upsert_generated(&new_content(campaign_b, "key-1", "b"))
            .await
            .unwrap();

        let listed = store.list_for_campaign(campaign_a).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].content_text(), "a");
    }
}
