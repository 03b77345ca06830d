//! End-to-end service tests: real provider clients against a wiremock
//! server, in-memory storage and persistence.

use fresco::{
    CampaignContentService, ContentGenerator, ContentStore, ErrorResponse, InvocationPayload,
    MemoryContentStore, Orchestrator, ProviderConfig, ProviderRegistry, Uploader, error_status,
};
use fresco::{MemoryBlobStore, MemoryFileRecordStore};
use fresco_providers::ProviderSettings;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mock_all_providers(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "msg_test",
            "type": "message",
            "role": "assistant",
            "model": "claude-3-5-haiku-latest",
            "content": [{"type": "text", "text": "Sizzling summer savings are here!"}]
        })))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/images/generations"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": [{"b64_json": "ZmFrZSBwbmc="}]})),
        )
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/text_to_video"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "output": [format!("{}/assets/clip.mp4", server.uri())]
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/assets/clip.mp4"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(b"fake mp4".to_vec())
                .insert_header("content-type", "video/mp4"),
        )
        .mount(server)
        .await;
}

fn service_over(registry: ProviderRegistry, store: Arc<MemoryContentStore>) -> CampaignContentService {
    let uploader = Arc::new(Uploader::new(
        Arc::new(MemoryBlobStore::new()),
        Arc::new(MemoryFileRecordStore::new()),
    ));
    let generator = ContentGenerator::new(Arc::new(registry), uploader);
    CampaignContentService::new(Orchestrator::new(generator, store))
}

fn payload(settings_json: serde_json::Value) -> InvocationPayload {
    serde_json::from_value(json!({
        "campaignData": {
            "title": "Summer Sale",
            "brandName": "Acme",
            "description": "20% off all items",
            "targetAudience": "young professionals"
        },
        "aiSettings": settings_json
    }))
    .expect("valid payload")
}

#[tokio::test]
async fn invoke_generates_all_media_types_for_one_platform() {
    let server = MockServer::start().await;
    mock_all_providers(&server).await;

    let config = ProviderConfig::default()
        .with_anthropic(ProviderSettings::new("sk-ant").with_base_url(server.uri()))
        .with_openai(ProviderSettings::new("sk-oa").with_base_url(server.uri()))
        .with_runway(ProviderSettings::new("key-rw").with_base_url(server.uri()));
    let registry = ProviderRegistry::from_config(&config).expect("valid config");

    let store = Arc::new(MemoryContentStore::new());
    let service = service_over(registry, store.clone());

    let response = service
        .invoke(payload(json!({"platform": "twitter", "contentType": "all"})))
        .await
        .expect("invocation succeeds");

    // 1 platform x 2 categories x 3 media types.
    assert!(response.success);
    assert_eq!(response.generated_count, 6);
    assert!(response.failures.is_empty());
    assert_eq!(store.len().await, 6);

    let media_previews: Vec<_> = response
        .preview
        .iter()
        .filter(|preview| *preview.has_media())
        .collect();
    assert_eq!(media_previews.len(), 4);
}

#[tokio::test]
async fn response_wire_format_matches_contract() {
    let server = MockServer::start().await;
    mock_all_providers(&server).await;

    let config = ProviderConfig::default()
        .with_anthropic(ProviderSettings::new("sk-ant").with_base_url(server.uri()))
        .with_openai(ProviderSettings::new("sk-oa").with_base_url(server.uri()))
        .with_runway(ProviderSettings::new("key-rw").with_base_url(server.uri()));
    let registry = ProviderRegistry::from_config(&config).expect("valid config");

    let service = service_over(registry, Arc::new(MemoryContentStore::new()));
    let response = service
        .invoke(payload(json!({"platform": "twitter", "contentType": "copy"})))
        .await
        .unwrap();

    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["success"], json!(true));
    assert_eq!(value["generatedCount"], json!(2));
    assert!(value["campaignId"].is_string());

    let entry = &value["preview"][0];
    assert_eq!(entry["platform"], json!("twitter"));
    assert_eq!(entry["content_type"], json!("organic_post"));
    assert_eq!(entry["media_type"], json!("copy"));
    assert_eq!(entry["has_media"], json!(false));
    assert!(entry["content"].as_str().unwrap().contains("summer savings"));
}

#[tokio::test]
async fn minted_campaign_id_is_returned() {
    let server = MockServer::start().await;
    mock_all_providers(&server).await;

    let config = ProviderConfig::default()
        .with_anthropic(ProviderSettings::new("sk-ant").with_base_url(server.uri()))
        .with_openai(ProviderSettings::new("sk-oa").with_base_url(server.uri()))
        .with_runway(ProviderSettings::new("key-rw").with_base_url(server.uri()));
    let registry = ProviderRegistry::from_config(&config).expect("valid config");

    let store = Arc::new(MemoryContentStore::new());
    let service = service_over(registry, store.clone());

    let input = payload(json!({"platform": "twitter", "contentType": "copy"}));
    assert!(input.campaign_id.is_none());

    let response = service.invoke(input).await.unwrap();

    // Records were persisted under the minted id.
    let records = store.list_for_campaign(response.campaign_id).await.unwrap();
    assert_eq!(records.len(), 2);
}

#[tokio::test]
async fn missing_capability_maps_to_configuration_fault() {
    let server = MockServer::start().await;

    // Text-only registry; video was never configured.
    let registry = ProviderRegistry::new().with_text(Arc::new(
        fresco_providers::AnthropicClient::from_settings(
            &ProviderSettings::new("sk-ant").with_base_url(server.uri()),
            std::time::Duration::from_secs(5),
            fresco::RetryPolicy::default(),
        )
        .unwrap(),
    ));

    let service = service_over(registry, Arc::new(MemoryContentStore::new()));
    let err = service
        .invoke(payload(json!({"platform": "twitter", "contentType": "video"})))
        .await
        .unwrap_err();

    assert_eq!(error_status(&err), 500);
    let body = ErrorResponse::from_error(&err);
    assert!(body.error.contains("No provider configured"));
}
