//! Tests for the gateway client against a mock server

use super::*;
use crate::config::{GatewayConfig, ProviderConfig, ProviderKind};
use crate::error::{ErrorKind, RATE_LIMIT_MESSAGE};
use crate::limiter::{RateLimitConfig, SlidingWindowRateLimiter};
use futures::StreamExt;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_json, body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_test_client(kind: ProviderKind, base_url: &str, max_requests: u32) -> GatewayClient {
    let config = GatewayConfig::new(
        ProviderConfig::new(kind)
            .with_api_key("test-api-key")
            .with_base_url(base_url),
    )
    .with_rate_limit(RateLimitConfig::per_minute(max_requests));
    let limiter = SlidingWindowRateLimiter::new(config.rate_limit)
        .expect("Failed to create limiter");
    let http = reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("Failed to create HTTP client");
    GatewayClient::with_http_client(config, limiter, http)
}

fn mock_completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-test123",
        "object": "chat.completion",
        "created": 1704067200,
        "model": "gpt-3.5-turbo",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

fn sse_body(fragments: &[&str]) -> String {
    let mut body = String::new();
    for fragment in fragments {
        body.push_str(&format!(
            "data: {}\n\n",
            json!({"choices": [{"delta": {"content": fragment}}]})
        ));
    }
    body.push_str("data: [DONE]\n\n");
    body
}

#[test]
fn test_new_rejects_missing_api_key() {
    let config = GatewayConfig::new(ProviderConfig::new(ProviderKind::OpenAi));
    let err = GatewayClient::new(config, SlidingWindowRateLimiter::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
}

#[test]
fn test_new_with_valid_config() {
    let config = GatewayConfig::new(
        ProviderConfig::new(ProviderKind::StableLm).with_api_key("stable-key"),
    );
    let client = GatewayClient::new(config, SlidingWindowRateLimiter::default()).unwrap();
    assert_eq!(client.provider(), ProviderKind::StableLm);
    // Debug output must not leak the key
    assert!(!format!("{:?}", client).contains("stable-key"));
}

#[tokio::test]
async fn test_chat_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", "Bearer test-api-key"))
        .and(body_json(json!({
            "model": "gpt-3.5-turbo",
            "messages": [{"role": "user", "content": "Hello"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_completion("Hi there!")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(ProviderKind::OpenAi, &mock_server.uri(), 15);
    let completion = client
        .chat_completion("  Hello  ", ResponseFormat::Text)
        .await
        .unwrap();

    assert_eq!(completion.content(), Some("Hi there!"));
    assert_eq!(completion.raw()["id"], "chatcmpl-test123");
    assert_eq!(client.limiter().current_count(), 1);
}

#[tokio::test]
async fn test_chat_json_mode() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({"response_format": {"type": "json_object"}})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(mock_completion(r#"{"answer": 42}"#)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(ProviderKind::OpenAi, &mock_server.uri(), 15);
    let completion = client
        .chat_completion("Answer in JSON", ResponseFormat::JsonObject)
        .await
        .unwrap();

    let value: serde_json::Value = completion.parse_json_content().unwrap();
    assert_eq!(value["answer"], 42);
}

#[tokio::test]
async fn test_stablelm_chat_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({
            "model": "stable-lm-zephyr-3b",
            "max_tokens": 200
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_completion("ok")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(ProviderKind::StableLm, &mock_server.uri(), 15);
    let completion = client.chat_completion("Hi", ResponseFormat::Text).await.unwrap();
    assert_eq!(completion.content(), Some("ok"));
}

#[tokio::test]
async fn test_upstream_error_uses_provider_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {
                "message": "Incorrect API key provided",
                "type": "invalid_request_error"
            }
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(ProviderKind::OpenAi, &mock_server.uri(), 15);
    let err = client
        .chat_completion("Hello", ResponseFormat::Text)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::UpstreamFailure);
    assert_eq!(err.status(), 401);
    assert_eq!(err.message(), "Incorrect API key provided");
}

#[tokio::test]
async fn test_upstream_error_falls_back_per_operation() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("<html>unavailable</html>"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(ProviderKind::OpenAi, &mock_server.uri(), 15);

    let err = client.chat_completion("Hi", ResponseFormat::Text).await.unwrap_err();
    assert_eq!(err.status(), 503);
    assert_eq!(err.message(), CHAT_FALLBACK);

    let err = client.generate_speech("Hi").await.unwrap_err();
    assert_eq!(err.message(), SPEECH_FALLBACK);

    let err = client.generate_image("Hi").await.unwrap_err();
    assert_eq!(err.message(), IMAGE_FALLBACK);
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_transport_failure_is_500() {
    // Port 1 on loopback refuses connections
    let client = create_test_client(ProviderKind::OpenAi, "http://127.0.0.1:1", 15);
    let err = client.generate_image("a cat").await.unwrap_err();

    assert_eq!(err.status(), 500);
    assert!(err.message().starts_with(IMAGE_FALLBACK));
}

#[tokio::test]
async fn test_rate_limited_call_never_reaches_server() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_completion("ok")))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = create_test_client(ProviderKind::OpenAi, &mock_server.uri(), 2);
    client.chat_completion("one", ResponseFormat::Text).await.unwrap();
    client.chat_completion("two", ResponseFormat::Text).await.unwrap();

    let err = client
        .chat_completion("three", ResponseFormat::Text)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RateLimited);
    assert_eq!(err.status(), 429);
    assert_eq!(err.message(), RATE_LIMIT_MESSAGE);
    assert_eq!(client.limiter().current_count(), 2);
}

#[tokio::test]
async fn test_invalid_input_does_not_consume_quota() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_completion("ok")))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = create_test_client(ProviderKind::OpenAi, &mock_server.uri(), 2);

    let err = client.chat_completion("", ResponseFormat::Text).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    let err = client.generate_image(&"a".repeat(1001)).await.unwrap_err();
    assert_eq!(err.status(), 400);
    assert_eq!(client.limiter().current_count(), 0);

    client.chat_completion("one", ResponseFormat::Text).await.unwrap();
    client.chat_completion("two", ResponseFormat::Text).await.unwrap();
}

#[tokio::test]
async fn test_clients_sharing_limiter_share_quota() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_completion("ok")))
        .mount(&mock_server)
        .await;

    let first = create_test_client(ProviderKind::OpenAi, &mock_server.uri(), 1);
    let second = GatewayClient::with_http_client(
        first.config().clone(),
        first.limiter().clone(),
        reqwest::Client::builder().no_proxy().build().unwrap(),
    );

    first.chat_completion("one", ResponseFormat::Text).await.unwrap();
    let err = second
        .chat_completion("two", ResponseFormat::Text)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RateLimited);
}

#[tokio::test]
async fn test_openai_speech() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/audio/speech"))
        .and(header("Authorization", "Bearer test-api-key"))
        .and(body_json(json!({
            "model": "tts-1",
            "input": "Read this",
            "voice": "alloy",
            "response_format": "mp3"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(vec![0xFF, 0xFB, 0x90, 0x00], "application/octet-stream"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(ProviderKind::OpenAi, &mock_server.uri(), 15);
    let audio = client.generate_speech("Read this").await.unwrap();

    assert_eq!(audio.bytes.as_ref(), &[0xFF, 0xFB, 0x90, 0x00]);
    assert_eq!(audio.mime_type, DEFAULT_AUDIO_MIME);
}

#[tokio::test]
async fn test_stablelm_speech_uses_response_mime() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/audio/speech"))
        .and(body_json(json!({"text": "Read this", "voice_id": "en-US-1"})))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"RIFF".to_vec(), "audio/wav"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(ProviderKind::StableLm, &mock_server.uri(), 15);
    let audio = client.generate_speech("Read this").await.unwrap();

    assert_eq!(audio.len(), 4);
    assert_eq!(audio.mime_type, "audio/wav");
}

#[tokio::test]
async fn test_image_generation() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .and(body_partial_json(json!({"prompt": "a red bicycle", "n": 1})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "created": 1704067200,
            "data": [{"url": "https://images.example/1.png"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(ProviderKind::OpenAi, &mock_server.uri(), 15);
    let image = client.generate_image("a red bicycle").await.unwrap();

    assert_eq!(image.urls(), vec!["https://images.example/1.png"]);
}

#[tokio::test]
async fn test_chat_stream_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({"stream": true})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(sse_body(&["He", "llo"]).into_bytes(), "text/event-stream"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(ProviderKind::OpenAi, &mock_server.uri(), 15);
    let mut stream = client
        .chat_completion_stream("Say hello", CancellationToken::new())
        .await
        .unwrap();

    let mut fragments = Vec::new();
    while let Some(fragment) = stream.next().await {
        fragments.push(fragment.unwrap());
    }
    assert_eq!(fragments, vec!["He", "llo"]);
    assert_eq!(stream.state(), crate::streaming::StreamState::Completed);
}

#[tokio::test]
async fn test_chat_stream_upstream_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {"message": "You exceeded your current quota"}
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(ProviderKind::OpenAi, &mock_server.uri(), 15);
    let err = client
        .chat_completion_stream("Hi", CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(err.status(), 429);
    assert_eq!(err.message(), "You exceeded your current quota");
}

#[tokio::test]
async fn test_chat_stream_cancelled_before_connect() {
    let mock_server = MockServer::start().await;

    let client = create_test_client(ProviderKind::OpenAi, &mock_server.uri(), 15);
    let token = CancellationToken::new();
    token.cancel();

    let err = client.chat_completion_stream("Hi", token).await.unwrap_err();
    assert!(err.is_cancelled());
    assert!(err.user_message().is_none());
    // The slot was taken at admission
    assert_eq!(client.limiter().current_count(), 1);
}
