//! Diesel row types and conversions to the core domain model.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use fresco_core::{
    ContentCategory, ContentStatus, GeneratedContentRecord, MediaType, NewGeneratedContent,
    NewStoredFile, Platform, StoredFile,
};
use fresco_error::{DatabaseError, DatabaseErrorKind};
use uuid::Uuid;

fn parse_enum<T: std::str::FromStr>(value: &str, column: &str) -> Result<T, DatabaseError> {
    value.parse::<T>().map_err(|_| {
        DatabaseError::new(DatabaseErrorKind::Serialization(format!(
            "Invalid {} value: {:?}",
            column, value
        )))
    })
}

/// Database row for the generated_content table.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable)]
#[diesel(table_name = crate::schema::generated_content)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct GeneratedContentRow {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub cell_key: String,
    pub platform: String,
    pub content_type: String,
    pub media_type: String,
    pub content_text: String,
    pub media_url: Option<String>,
    pub generated_prompt: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<GeneratedContentRow> for GeneratedContentRecord {
    type Error = DatabaseError;

    fn try_from(row: GeneratedContentRow) -> Result<Self, Self::Error> {
        let platform: Platform = parse_enum(&row.platform, "platform")?;
        let category: ContentCategory = parse_enum(&row.content_type, "content_type")?;
        let media_type: MediaType = parse_enum(&row.media_type, "media_type")?;
        let status: ContentStatus = parse_enum(&row.status, "status")?;

        GeneratedContentRecord::builder()
            .id(row.id)
            .campaign_id(row.campaign_id)
            .cell_key(row.cell_key)
            .platform(platform)
            .category(category)
            .media_type(media_type)
            .content_text(row.content_text)
            .media_url(row.media_url)
            .generated_prompt(row.generated_prompt)
            .status(status)
            .created_at(row.created_at)
            .updated_at(row.updated_at)
            .build()
            .map_err(|e| DatabaseError::new(DatabaseErrorKind::Serialization(e.to_string())))
    }
}

/// Insertable row for the generated_content table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::generated_content)]
pub struct NewGeneratedContentRow {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub cell_key: String,
    pub platform: String,
    pub content_type: String,
    pub media_type: String,
    pub content_text: String,
    pub media_url: Option<String>,
    pub generated_prompt: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&NewGeneratedContent> for NewGeneratedContentRow {
    fn from(content: &NewGeneratedContent) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            campaign_id: *content.campaign_id(),
            cell_key: content.cell_key().clone(),
            platform: content.platform().to_string(),
            content_type: content.category().to_string(),
            media_type: content.media_type().to_string(),
            content_text: content.content_text().clone(),
            media_url: content.media_url().clone(),
            generated_prompt: content.generated_prompt().clone(),
            status: content.status().to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Database row for the stored_files table.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable)]
#[diesel(table_name = crate::schema::stored_files)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StoredFileRow {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub file_path: String,
    pub public_url: String,
    pub file_size_bytes: i64,
    pub mime_type: String,
    pub ai_service: String,
    pub ai_model: String,
    pub generation_prompt: String,
    pub generated_content_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<StoredFileRow> for StoredFile {
    type Error = DatabaseError;

    fn try_from(row: StoredFileRow) -> Result<Self, Self::Error> {
        StoredFile::builder()
            .id(row.id)
            .campaign_id(row.campaign_id)
            .file_path(row.file_path)
            .public_url(row.public_url)
            .file_size_bytes(row.file_size_bytes)
            .mime_type(row.mime_type)
            .ai_service(row.ai_service)
            .ai_model(row.ai_model)
            .generation_prompt(row.generation_prompt)
            .generated_content_id(row.generated_content_id)
            .created_at(row.created_at)
            .build()
            .map_err(|e| DatabaseError::new(DatabaseErrorKind::Serialization(e.to_string())))
    }
}

/// Insertable row for the stored_files table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::stored_files)]
pub struct NewStoredFileRow {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub file_path: String,
    pub public_url: String,
    pub file_size_bytes: i64,
    pub mime_type: String,
    pub ai_service: String,
    pub ai_model: String,
    pub generation_prompt: String,
    pub generated_content_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<&NewStoredFile> for NewStoredFileRow {
    fn from(file: &NewStoredFile) -> Self {
        Self {
            id: Uuid::new_v4(),
            campaign_id: *file.campaign_id(),
            file_path: file.file_path().clone(),
            public_url: file.public_url().clone(),
            file_size_bytes: *file.file_size_bytes(),
            mime_type: file.mime_type().clone(),
            ai_service: file.ai_service().clone(),
            ai_model: file.ai_model().clone(),
            generation_prompt: file.generation_prompt().clone(),
            generated_content_id: *file.generated_content_id(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> GeneratedContentRow {
        let now = Utc::now();
        GeneratedContentRow {
            id: Uuid::new_v4(),
            campaign_id: Uuid::new_v4(),
            cell_key: "abc123".to_string(),
            platform: "twitter".to_string(),
            content_type: "organic_post".to_string(),
            media_type: "copy".to_string(),
            content_text: "hello".to_string(),
            media_url: None,
            generated_prompt: "prompt".to_string(),
            status: "generated".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn row_converts_to_domain_record() {
        let row = sample_row();
        let record = GeneratedContentRecord::try_from(row.clone()).unwrap();

        assert_eq!(*record.platform(), Platform::Twitter);
        assert_eq!(*record.category(), ContentCategory::OrganicPost);
        assert_eq!(*record.media_type(), MediaType::Copy);
        assert_eq!(*record.status(), ContentStatus::Generated);
        assert_eq!(record.cell_key(), &row.cell_key);
    }

    #[test]
    fn unknown_enum_value_is_a_serialization_error() {
        let mut row = sample_row();
        row.platform = "myspace".to_string();

        let err = GeneratedContentRecord::try_from(row).unwrap_err();
        assert!(matches!(err.kind, DatabaseErrorKind::Serialization(_)));
    }

    #[test]
    fn insert_row_carries_enum_strings() {
        let content = NewGeneratedContent::builder()
            .campaign_id(Uuid::new_v4())
            .cell_key("k")
            .platform(Platform::Linkedin)
            .category(ContentCategory::PaidAd)
            .media_type(MediaType::Image)
            .content_text("text")
            .media_url(Some("https://cdn.example.com/a.png".to_string()))
            .generated_prompt("p")
            .build()
            .unwrap();

        let row = NewGeneratedContentRow::from(&content);
        assert_eq!(row.platform, "linkedin");
        assert_eq!(row.content_type, "paid_ad");
        assert_eq!(row.media_type, "image");
        assert_eq!(row.status, "generated");
    }
}
