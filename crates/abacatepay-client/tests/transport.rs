//! Transport and response pipeline tests against a mock HTTP server.

mod common;

use std::time::{Duration, Instant};

use abacatepay_client::{decode, discard, ClientError, RequestOptions, Transport};
use serde::{Deserialize, Serialize};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{transport, transport_with_timeout, API_KEY, TEST_VERSION};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct TestMessage {
    message: String,
}

fn success() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"message": "Success"}))
}

async fn fetch_message(transport: Transport) -> Result<TestMessage, ClientError> {
    let response = transport.get("/test", None).await?;
    decode(response).await
}

async fn mount_authenticated(server: &MockServer, verb: &str, route: &str) {
    Mock::given(method(verb))
        .and(path(route))
        .and(header("authorization", format!("Bearer {API_KEY}").as_str()))
        .and(header("content-type", "application/json"))
        .and(header(
            "user-agent",
            format!("AbacatePay-Rust-SDK/{TEST_VERSION}").as_str(),
        ))
        .respond_with(success())
        .expect(1)
        .mount(server)
        .await;
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn construction_requires_api_key_and_url() {
    let err = Transport::new("", "https://api.test.com", "1.0.0", Duration::from_secs(1))
        .unwrap_err();
    assert!(matches!(err, ClientError::Configuration(_)));

    let err = Transport::new("test-key", "", "1.0.0", Duration::from_secs(1)).unwrap_err();
    assert!(matches!(err, ClientError::Configuration(_)));

    let transport =
        Transport::new("test-key", "https://api.test.com", "1.0.0", Duration::from_secs(1));
    assert!(transport.is_ok());
}

// ============================================================================
// Methods and default headers
// ============================================================================

#[tokio::test]
async fn get_sends_default_headers() {
    let server = MockServer::start().await;
    mount_authenticated(&server, "GET", "/test").await;

    let response = transport(&server).get("/test", None).await.unwrap();
    let message: TestMessage = decode(response).await.unwrap();

    assert_eq!(message.message, "Success");
}

#[tokio::test]
async fn delete_sends_default_headers() {
    let server = MockServer::start().await;
    mount_authenticated(&server, "DELETE", "/test/xpto").await;

    let response = transport(&server).delete("/test/xpto", None).await.unwrap();

    discard(response).await.unwrap();
}

#[tokio::test]
async fn post_sends_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/test/xpto"))
        .and(header("authorization", "Bearer test-key"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"message": "Success"})))
        .respond_with(success())
        .expect(1)
        .mount(&server)
        .await;

    let body = TestMessage {
        message: "Success".into(),
    };
    let response = transport(&server)
        .post("/test/xpto", &body, None)
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn put_sends_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/test/xpto"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_json(json!({"message": "Updated"})))
        .respond_with(success())
        .expect(1)
        .mount(&server)
        .await;

    let body = TestMessage {
        message: "Updated".into(),
    };
    let response = transport(&server)
        .put("/test/xpto", &body, None)
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn get_has_no_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(success())
        .mount(&server)
        .await;

    transport(&server).get("/test", None).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].body.is_empty());
}

// ============================================================================
// Per-request options
// ============================================================================

#[tokio::test]
async fn header_overrides_win() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/test"))
        .and(header("authorization", "Bearer override-key"))
        .and(header("content-type", "application/vnd.custom+json"))
        .and(header("x-custom-header", "test-value"))
        .respond_with(success())
        .expect(1)
        .mount(&server)
        .await;

    let options = RequestOptions::new()
        .with_header("Authorization", "Bearer override-key")
        .with_header("Content-Type", "application/vnd.custom+json")
        .with_header("X-Custom-Header", "test-value");

    transport(&server)
        .post("/test", &json!({"message": "hi"}), Some(&options))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let auth: Vec<_> = requests[0].headers.get_all("authorization").iter().collect();
    assert_eq!(auth.len(), 1);
}

#[tokio::test]
async fn invalid_header_override_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(success())
        .expect(0)
        .mount(&server)
        .await;

    let options = RequestOptions::new().with_header("bad header", "value");
    let err = transport(&server)
        .get("/test", Some(&options))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::InvalidHeader { .. }));
}

#[tokio::test]
async fn shorter_timeout_override_is_honored() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(success().set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let options = RequestOptions::new().with_timeout(Duration::from_millis(100));
    let started = Instant::now();
    let err = transport(&server)
        .get("/slow", Some(&options))
        .await
        .unwrap_err();

    assert!(err.is_timeout(), "expected timeout, got {err:?}");
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[tokio::test]
async fn default_timeout_applies_without_override() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(success().set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let err = transport_with_timeout(&server, Duration::from_millis(100))
        .get("/slow", None)
        .await
        .unwrap_err();

    assert!(err.is_timeout());
}

#[tokio::test]
async fn zero_timeout_override_keeps_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(success().set_delay(Duration::from_millis(200)))
        .mount(&server)
        .await;

    let options = RequestOptions::new().with_timeout(Duration::ZERO);
    let response = transport(&server)
        .get("/test", Some(&options))
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn zero_default_timeout_does_not_abort_calls() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/test"))
        .respond_with(success())
        .expect(1)
        .mount(&server)
        .await;

    let transport = transport_with_timeout(&server, Duration::ZERO);
    let message = fetch_message(transport).await.unwrap();

    assert_eq!(message.message, "Success");
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn unreachable_host_is_transport_error() {
    let transport =
        Transport::new("test-key", "http://127.0.0.1:1", "1.0.0", Duration::from_secs(2)).unwrap();

    let err = transport.get("/test", None).await.unwrap_err();

    assert!(matches!(err, ClientError::Transport(_)));
    assert!(!err.is_timeout());
}

#[tokio::test]
async fn unserializable_body_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(success())
        .expect(0)
        .mount(&server)
        .await;

    // JSON object keys must be strings.
    let mut body = std::collections::HashMap::new();
    body.insert(vec![1_u8], "value");

    let err = transport(&server)
        .post("/test", &body, None)
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Encoding(_)));
}

#[tokio::test]
async fn bad_request_preserves_raw_json_body() {
    let server = MockServer::start().await;
    let raw = r#"{"message": "Success", "error": "Bad Request"}"#;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400).set_body_string(raw))
        .mount(&server)
        .await;

    let response = transport(&server).get("/test", None).await.unwrap();
    let err = decode::<TestMessage, _>(response).await.unwrap_err();

    match err {
        ClientError::Api { status, body } => {
            assert_eq!(status, 400);
            assert_eq!(body, raw);
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_success_body_is_decoding_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"invalid": json}"#))
        .mount(&server)
        .await;

    let response = transport(&server).get("/test", None).await.unwrap();
    let err = decode::<TestMessage, _>(response).await.unwrap_err();

    assert!(matches!(err, ClientError::Decoding(_)));
}

// ============================================================================
// Concurrency
// ============================================================================

#[tokio::test]
async fn shared_transport_serves_concurrent_calls() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/test"))
        .respond_with(success())
        .expect(8)
        .mount(&server)
        .await;

    let transport = transport(&server);
    let calls = (0..8).map(|_| fetch_message(transport.clone()));

    let results = futures::future::join_all(calls).await;

    assert!(results.iter().all(Result::is_ok));
}
