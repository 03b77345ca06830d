//! Diesel-backed implementations of the persistence seams.

use crate::{
    GeneratedContentRow, NewGeneratedContentRow, NewStoredFileRow, PgPool, StoredFileRow,
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::upsert::excluded;
use fresco_core::{GeneratedContentRecord, NewGeneratedContent, NewStoredFile, StoredFile};
use fresco_error::{DatabaseError, DatabaseErrorKind};
use fresco_pipeline::ContentStore;
use fresco_storage::FileRecordStore;
use tracing::instrument;
use uuid::Uuid;

fn checkout(
    pool: &PgPool,
) -> Result<PooledConnection<ConnectionManager<PgConnection>>, DatabaseError> {
    pool.get()
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Connection(e.to_string())))
}

/// Content store over PostgreSQL.
///
/// Diesel is synchronous; queries run on the blocking thread pool.
#[derive(Clone)]
pub struct DieselContentStore {
    pool: PgPool,
}

impl DieselContentStore {
    /// Creates a store over the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentStore for DieselContentStore {
    #[instrument(skip(self, content), fields(campaign_id = %content.campaign_id()))]
    async fn upsert_generated(
        &self,
        content: &NewGeneratedContent,
    ) -> Result<GeneratedContentRecord, DatabaseError> {
        use crate::schema::generated_content::dsl::*;

        let pool = self.pool.clone();
        let new_row = NewGeneratedContentRow::from(content);

        let row: GeneratedContentRow = tokio::task::spawn_blocking(move || {
            let mut conn = checkout(&pool)?;
            diesel::insert_into(generated_content)
                .values(&new_row)
                .on_conflict((campaign_id, cell_key))
                .do_update()
                .set((
                    content_text.eq(excluded(content_text)),
                    media_url.eq(excluded(media_url)),
                    generated_prompt.eq(excluded(generated_prompt)),
                    status.eq(excluded(status)),
                    updated_at.eq(excluded(updated_at)),
                ))
                .get_result::<GeneratedContentRow>(&mut conn)
                .map_err(DatabaseError::from)
        })
        .await
        .map_err(|e| {
            DatabaseError::new(DatabaseErrorKind::Query(format!(
                "Blocking task failed: {}",
                e
            )))
        })??;

        GeneratedContentRecord::try_from(row)
    }

    #[instrument(skip(self))]
    async fn list_for_campaign(
        &self,
        campaign: Uuid,
    ) -> Result<Vec<GeneratedContentRecord>, DatabaseError> {
        use crate::schema::generated_content::dsl::*;

        let pool = self.pool.clone();

        let rows: Vec<GeneratedContentRow> = tokio::task::spawn_blocking(move || {
            let mut conn = checkout(&pool)?;
            generated_content
                .filter(campaign_id.eq(campaign))
                .order((created_at.asc(), cell_key.asc()))
                .load::<GeneratedContentRow>(&mut conn)
                .map_err(DatabaseError::from)
        })
        .await
        .map_err(|e| {
            DatabaseError::new(DatabaseErrorKind::Query(format!(
                "Blocking task failed: {}",
                e
            )))
        })??;

        rows.into_iter()
            .map(GeneratedContentRecord::try_from)
            .collect()
    }
}

/// File record store over PostgreSQL.
#[derive(Clone)]
pub struct DieselFileRecordStore {
    pool: PgPool,
}

impl DieselFileRecordStore {
    /// Creates a store over the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileRecordStore for DieselFileRecordStore {
    #[instrument(skip(self, file), fields(path = %file.file_path()))]
    async fn insert_stored_file(&self, file: &NewStoredFile) -> Result<StoredFile, DatabaseError> {
        use crate::schema::stored_files::dsl::*;

        let pool = self.pool.clone();
        let new_row = NewStoredFileRow::from(file);

        let row: StoredFileRow = tokio::task::spawn_blocking(move || {
            let mut conn = checkout(&pool)?;
            diesel::insert_into(stored_files)
                .values(&new_row)
                .get_result::<StoredFileRow>(&mut conn)
                .map_err(DatabaseError::from)
        })
        .await
        .map_err(|e| {
            DatabaseError::new(DatabaseErrorKind::Query(format!(
                "Blocking task failed: {}",
                e
            )))
        })??;

        StoredFile::try_from(row)
    }
}
