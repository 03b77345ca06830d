//! Live PostgreSQL gateway tests.
//!
//! Requires DATABASE_URL pointing at a database with the generated_content
//! and stored_files tables. Run with `--features pg-tests`.

use fresco_core::{ContentCategory, MediaType, NewGeneratedContent, Platform};
use fresco_database::{DieselContentStore, create_pool};
use fresco_pipeline::ContentStore;
use uuid::Uuid;

fn sample_content(campaign_id: Uuid, text: &str) -> NewGeneratedContent {
    NewGeneratedContent::builder()
        .campaign_id(campaign_id)
        .cell_key("pg-test-cell")
        .platform(Platform::Twitter)
        .category(ContentCategory::OrganicPost)
        .media_type(MediaType::Copy)
        .content_text(text)
        .generated_prompt("pg test prompt")
        .build()
        .expect("valid content")
}

#[tokio::test]
#[cfg_attr(not(feature = "pg-tests"), ignore)]
async fn upsert_updates_in_place_on_conflict() {
    dotenvy::dotenv().ok();
    let pool = create_pool().expect("DATABASE_URL must be set for pg tests");
    let store = DieselContentStore::new(pool);

    let campaign_id = Uuid::new_v4();

    let first = store
        .upsert_generated(&sample_content(campaign_id, "first version"))
        .await
        .expect("insert succeeds");
    let second = store
        .upsert_generated(&sample_content(campaign_id, "second version"))
        .await
        .expect("upsert succeeds");

    assert_eq!(first.id(), second.id());
    assert_eq!(second.content_text(), "second version");

    let records = store
        .list_for_campaign(campaign_id)
        .await
        .expect("list succeeds");
    assert_eq!(records.len(), 1);
}
