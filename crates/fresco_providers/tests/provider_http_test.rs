//! HTTP-level tests for provider adapters: retry bounds, error mapping, and
//! defensive response parsing, against a wiremock server.

use fresco_core::MediaSource;
use fresco_error::ProviderErrorKind;
use fresco_providers::{
    AnthropicClient, ImageGenerator, ImageRequest, LumaVideoClient, OpenAiImageClient,
    ProviderSettings, RetryPolicy, RunwayVideoClient, TextGenerator, TextRequest, VideoGenerator,
    VideoRequest,
};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TIMEOUT: Duration = Duration::from_secs(5);

fn fast_retry(max_retries: u32) -> RetryPolicy {
    RetryPolicy::new(max_retries, 1)
}

fn settings_for(server: &MockServer) -> ProviderSettings {
    ProviderSettings::new("test-key").with_base_url(server.uri())
}

fn anthropic_body(text: &str) -> serde_json::Value {
    json!({
        "id": "msg_test",
        "type": "message",
        "role": "assistant",
        "model": "claude-3-5-haiku-latest",
        "content": [{"type": "text", "text": text}],
        "usage": {"input_tokens": 10, "output_tokens": 5}
    })
}

#[tokio::test]
async fn anthropic_returns_generated_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(anthropic_body("generated copy")))
        .mount(&server)
        .await;

    let client =
        AnthropicClient::from_settings(&settings_for(&server), TIMEOUT, fast_retry(2)).unwrap();
    let output = client
        .generate_text(&TextRequest::builder().prompt("write copy").build().unwrap())
        .await
        .expect("generation succeeds");

    assert_eq!(output.text(), "generated copy");
}

#[tokio::test]
async fn anthropic_retries_through_429s_then_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .up_to_n_times(3)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(anthropic_body("finally")))
        .mount(&server)
        .await;

    let client =
        AnthropicClient::from_settings(&settings_for(&server), TIMEOUT, fast_retry(3)).unwrap();
    let output = client
        .generate_text(&TextRequest::builder().prompt("p").build().unwrap())
        .await
        .expect("succeeds after retries");

    assert_eq!(output.text(), "finally");
    assert_eq!(server.received_requests().await.unwrap().len(), 4);
}

#[tokio::test]
async fn anthropic_escalates_when_retry_bound_exceeded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&server)
        .await;

    let client =
        AnthropicClient::from_settings(&settings_for(&server), TIMEOUT, fast_retry(2)).unwrap();
    let err = client
        .generate_text(&TextRequest::builder().prompt("p").build().unwrap())
        .await
        .unwrap_err();

    assert!(matches!(
        err.kind,
        ProviderErrorKind::RateLimited { retries: 2 }
    ));
    // Initial attempt plus the two permitted retries.
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn anthropic_server_errors_fail_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let client =
        AnthropicClient::from_settings(&settings_for(&server), TIMEOUT, fast_retry(2)).unwrap();
    let err = client
        .generate_text(&TextRequest::builder().prompt("p").build().unwrap())
        .await
        .unwrap_err();

    match err.kind {
        ProviderErrorKind::Api { status, message } => {
            assert_eq!(status, 500);
            assert!(message.contains("internal error"));
        }
        other => panic!("expected Api error, got {:?}", other),
    }
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn anthropic_missing_text_block_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"content": []})))
        .mount(&server)
        .await;

    let client =
        AnthropicClient::from_settings(&settings_for(&server), TIMEOUT, fast_retry(2)).unwrap();
    let err = client
        .generate_text(&TextRequest::builder().prompt("p").build().unwrap())
        .await
        .unwrap_err();

    assert!(matches!(
        err.kind,
        ProviderErrorKind::MalformedResponse(_)
    ));
}

#[tokio::test]
async fn openai_image_returns_data_uri_for_b64_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/images/generations"))
        .and(header("Authorization", "Bearer test-key"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": [{"b64_json": "aGVsbG8="}]})),
        )
        .mount(&server)
        .await;

    let client =
        OpenAiImageClient::from_settings(&settings_for(&server), TIMEOUT, fast_retry(2)).unwrap();
    let media = client
        .generate_image(&ImageRequest::builder().prompt("a poster").build().unwrap())
        .await
        .expect("image generation succeeds");

    assert_eq!(
        media,
        MediaSource::Base64("data:image/png;base64,aGVsbG8=".to_string())
    );
}

#[tokio::test]
async fn openai_image_returns_url_when_no_b64() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/images/generations"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": [{"url": "https://cdn.example.com/img.png"}]})),
        )
        .mount(&server)
        .await;

    let client =
        OpenAiImageClient::from_settings(&settings_for(&server), TIMEOUT, fast_retry(2)).unwrap();
    let media = client
        .generate_image(&ImageRequest::builder().prompt("a poster").build().unwrap())
        .await
        .unwrap();

    assert_eq!(
        media,
        MediaSource::Url("https://cdn.example.com/img.png".to_string())
    );
}

#[tokio::test]
async fn openai_image_empty_data_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/images/generations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    let client =
        OpenAiImageClient::from_settings(&settings_for(&server), TIMEOUT, fast_retry(2)).unwrap();
    let err = client
        .generate_image(&ImageRequest::builder().prompt("a poster").build().unwrap())
        .await
        .unwrap_err();

    assert!(matches!(
        err.kind,
        ProviderErrorKind::MalformedResponse(_)
    ));
}

#[tokio::test]
async fn runway_returns_first_output_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/text_to_video"))
        .and(header("X-Runway-Version", "2024-11-06"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"output": ["https://cdn.example.com/clip.mp4"]})),
        )
        .mount(&server)
        .await;

    let client =
        RunwayVideoClient::from_settings(&settings_for(&server), TIMEOUT, fast_retry(2)).unwrap();
    let media = client
        .generate_video(&VideoRequest::builder().prompt("a montage").build().unwrap())
        .await
        .unwrap();

    assert_eq!(
        media,
        MediaSource::Url("https://cdn.example.com/clip.mp4".to_string())
    );
}

#[tokio::test]
async fn luma_missing_video_asset_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/dream-machine/v1/generations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"assets": null})))
        .mount(&server)
        .await;

    let client =
        LumaVideoClient::from_settings(&settings_for(&server), TIMEOUT, fast_retry(2)).unwrap();
    let err = client
        .generate_video(&VideoRequest::builder().prompt("a montage").build().unwrap())
        .await
        .unwrap_err();

    assert!(matches!(
        err.kind,
        ProviderErrorKind::MalformedResponse(_)
    ));
}
