//! Integration tests for the HTTP transport against a mock server

use assert_matches::assert_matches;
use futures::StreamExt;
use http::HeaderValue;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use photonai_protocol::RequestMethod;
use photonai_transport::{
    CancellationToken, HttpRequest, HttpTransport, RequestError, Transport, TransportExt,
};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Deserialize, PartialEq)]
struct Chunk {
    id: String,
}

fn post(server: &MockServer, stream_mode: bool) -> HttpRequest {
    HttpRequest::new(RequestMethod::Post, format!("{}/v1/test", server.uri()))
        .with_header(AUTHORIZATION, HeaderValue::from_static("Bearer test-key"))
        .with_header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
        .with_body(serde_json::to_vec(&json!({"stream": stream_mode})).unwrap())
        .with_stream_mode(stream_mode)
}

fn sse_body(payloads: &[&str]) -> String {
    payloads
        .iter()
        .map(|payload| format!("data: {}\n\n", payload))
        .collect()
}

#[tokio::test]
async fn test_execute_sends_headers_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/test"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_json(json!({"stream": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "abc"})))
        .expect(1)
        .mount(&server)
        .await;

    let transport = HttpTransport::new().unwrap();
    let chunk: Chunk = transport.execute_decoded(post(&server, false)).await.unwrap();
    assert_eq!(chunk, Chunk { id: "abc".into() });
}

#[tokio::test]
async fn test_execute_raw_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-request-id", "req_42")
                .set_body_string("{}"),
        )
        .mount(&server)
        .await;

    let transport = HttpTransport::new().unwrap();
    let request = HttpRequest::new(RequestMethod::Get, format!("{}/v1/models", server.uri()));
    let response = transport.execute(request).await.unwrap();

    assert!(response.is_success());
    assert_eq!(response.get_header("x-request-id"), Some("req_42"));
    assert_eq!(response.text(), "{}");
}

#[tokio::test]
async fn test_non_success_status_is_classified() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let transport = HttpTransport::new().unwrap();
    let error = transport
        .execute_decoded::<Chunk>(post(&server, false))
        .await
        .unwrap_err();

    assert_eq!(error, RequestError::HttpStatus { status: 429 });
    assert_eq!(error.code(), 429);
    assert_eq!(error.message(), "Response with non-success status code");
}

#[tokio::test]
async fn test_connection_failure_has_no_code() {
    let transport = HttpTransport::new().unwrap();
    let request = HttpRequest::new(RequestMethod::Post, "http://127.0.0.1:1/v1/test");

    let error = transport.execute_decoded::<Chunk>(request).await.unwrap_err();
    assert_matches!(error, RequestError::Transport { .. });
    assert_eq!(error.code(), -1);
}

#[tokio::test]
async fn test_undecodable_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let transport = HttpTransport::new().unwrap();
    let error = transport
        .execute_decoded::<Chunk>(post(&server, false))
        .await
        .unwrap_err();

    assert_matches!(error, RequestError::Decode { .. });
    assert_eq!(error.code(), -1);
}

#[tokio::test]
async fn test_execute_until_cancelled_aborts_slow_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": "late"}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let transport = HttpTransport::new().unwrap();
    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        canceller.cancel();
    });

    let result = transport
        .execute_until_cancelled::<Chunk>(post(&server, false), &token)
        .await;
    assert_eq!(result, Ok(None));
}

#[tokio::test]
async fn test_stream_delivers_events_until_done() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/test"))
        .and(header("accept", "text/event-stream"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            sse_body(&[r#"{"id":"1"}"#, r#"{"id":"2"}"#, "[DONE]"]),
            "text/event-stream",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let transport = HttpTransport::new().unwrap();
    let ids: Vec<_> = transport
        .stream_decoded(post(&server, true), |chunk: Chunk| chunk.id)
        .collect()
        .await;

    assert_eq!(ids, vec![Ok("1".to_string()), Ok("2".to_string())]);
}

#[tokio::test]
async fn test_stream_non_success_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let transport = HttpTransport::new().unwrap();
    let mut stream = transport.stream_decoded(post(&server, true), |chunk: Chunk| chunk.id);

    assert_eq!(
        stream.next().await,
        Some(Err(RequestError::HttpStatus { status: 401 }))
    );
    assert_eq!(stream.next().await, None);
}

#[tokio::test]
async fn test_stream_mode_mismatch_makes_no_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let transport = HttpTransport::new().unwrap();

    let mut stream = transport.stream_decoded(post(&server, false), |chunk: Chunk| chunk.id);
    assert_eq!(
        stream.next().await,
        Some(Err(RequestError::StreamModeMismatch { stream_mode: false }))
    );

    let result = transport.execute_decoded::<Chunk>(post(&server, true)).await;
    assert_eq!(
        result,
        Err(RequestError::StreamModeMismatch { stream_mode: true })
    );
}
