use httpmock::Method::POST;
use httpmock::MockServer;
use serde_json::json;
use std::time::Duration;
use translator_critic::core::config::{DEFAULT_CRITIQUE_MODEL, DEFAULT_TRANSLATION_MODEL};
use translator_critic::{AppConfig, ErrorKind, LlmClient, LlmResult};

fn live_client(server: &MockServer) -> LlmClient {
    LlmClient::new(&AppConfig::live(server.url("/v1/process"), "test-key")).unwrap()
}

#[tokio::test]
async fn translate_sends_bearer_and_model_payload() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/process")
                .header("Authorization", "Bearer test-key")
                .header("content-type", "application/json")
                .json_body_partial(format!(r#"{{"model_name": "{}"}}"#, DEFAULT_TRANSLATION_MODEL))
                .body_contains("Hello world")
                .body_contains("French");
            then.status(200)
                .json_body(json!({ "response": "Bonjour le monde" }));
        })
        .await;

    let result = live_client(&server).translate("Hello world", "fr").await;

    mock.assert_async().await;
    assert_eq!(result, LlmResult::Success { text: "Bonjour le monde".to_string() });
}

#[tokio::test]
async fn critique_uses_critique_model() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/process")
                .json_body_partial(format!(r#"{{"model_name": "{}"}}"#, DEFAULT_CRITIQUE_MODEL))
                .body_contains("Bonjour le monde");
            then.status(200)
                .json_body(json!({ "response": "Rating: 8/10" }));
        })
        .await;

    let result = live_client(&server)
        .critique("Hello world", "Bonjour le monde")
        .await;

    mock.assert_async().await;
    assert_eq!(result.text(), Some("Rating: 8/10"));
}

#[tokio::test]
async fn non_success_status_is_upstream_http_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/process");
            then.status(500).body("Internal Server Error");
        })
        .await;

    let result = live_client(&server).translate("Test text", "english").await;

    match result {
        LlmResult::Failure { kind, message } => {
            assert_eq!(kind, ErrorKind::UpstreamHttpError);
            assert!(message.contains("500"), "{}", message);
            assert!(message.contains("Internal Server Error"), "{}", message);
        }
        other => panic!("expected failure, got {:?}", other),
    }
}

#[tokio::test]
async fn client_error_status_keeps_status_code() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/process");
            then.status(401).json_body(json!({ "detail": "bad key" }));
        })
        .await;

    let result = live_client(&server).critique("a", "b").await;

    assert_eq!(result.kind(), Some(ErrorKind::UpstreamHttpError));
    assert!(matches!(result, LlmResult::Failure { ref message, .. } if message.contains("401")));
}

#[tokio::test]
async fn missing_response_field_is_malformed() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/process");
            then.status(200).json_body(json!({ "wrong_key": "value" }));
        })
        .await;

    let result = live_client(&server).translate("Test text", "english").await;

    assert_eq!(result.kind(), Some(ErrorKind::UpstreamMalformedResponse));
}

#[tokio::test]
async fn invalid_json_is_malformed() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/process");
            then.status(200).body("This is not valid JSON");
        })
        .await;

    let result = live_client(&server).translate("Test text", "english").await;

    assert_eq!(result.kind(), Some(ErrorKind::UpstreamMalformedResponse));
}

#[tokio::test]
async fn non_string_response_field_is_malformed() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/process");
            then.status(200).json_body(json!({ "response": { "text": "nested" } }));
        })
        .await;

    let result = live_client(&server).translate("Test text", "english").await;

    assert_eq!(result.kind(), Some(ErrorKind::UpstreamMalformedResponse));
}

#[tokio::test]
async fn slow_upstream_is_timeout() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/process");
            then.status(200)
                .delay(Duration::from_millis(1500))
                .json_body(json!({ "response": "late" }));
        })
        .await;

    let config = AppConfig {
        timeout_ms: 100,
        ..AppConfig::live(server.url("/v1/process"), "test-key")
    };
    let result = LlmClient::new(&config).unwrap().translate("Test text", "english").await;

    assert_eq!(result.kind(), Some(ErrorKind::Timeout));
}

#[tokio::test]
async fn refused_connection_is_transport_error() {
    // nothing listens on port 1
    let config = AppConfig::live("http://127.0.0.1:1/v1/process", "test-key");
    let result = LlmClient::new(&config).unwrap().translate("Test text", "english").await;

    assert_eq!(result.kind(), Some(ErrorKind::TransportError));
}

#[tokio::test]
async fn invalid_input_never_reaches_upstream() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/process");
            then.status(200).json_body(json!({ "response": "unused" }));
        })
        .await;

    let client = live_client(&server);
    assert_eq!(client.translate("", "english").await.kind(), Some(ErrorKind::InvalidInput));
    assert_eq!(client.critique("", "x").await.kind(), Some(ErrorKind::InvalidInput));

    assert_eq!(mock.hits_async().await, 0);
}

#[tokio::test]
async fn blank_response_field_is_malformed() {
    for body in [json!({ "response": "" }), json!({ "response": "  \n" })] {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/process");
                then.status(200).json_body(body.clone());
            })
            .await;

        let result = live_client(&server).translate("Hello", "fr").await;

        assert_eq!(result.kind(), Some(ErrorKind::UpstreamMalformedResponse), "{}", body);
    }
}
