//! OpenAI-compatible client contract tests.
//!
//! Verify the wire format of chat completion requests and how provider
//! answers map onto `LlmError`.

use std::time::Duration;

use serde_json::json;
use synapse::llm::{
    CompletionRequest, GenerativeModel, LlmError, OpenAiCompatibleClient, OpenAiCompatibleConfig,
};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "model": "llama-3.3-70b-versatile",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

fn client(server: &MockServer, api_key: Option<&str>) -> OpenAiCompatibleClient {
    let config = OpenAiCompatibleConfig::new(api_key.map(String::from), "llama-3.3-70b-versatile")
        .with_base_url(format!("{}/openai/v1", server.uri()))
        .with_timeout(Duration::from_secs(5));
    OpenAiCompatibleClient::new(config).unwrap()
}

fn request() -> CompletionRequest {
    CompletionRequest::new("You plan schedules.", "Tasks:\nMath HW")
}

#[tokio::test]
async fn test_request_format() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "llama-3.3-70b-versatile",
            "messages": [
                { "role": "system", "content": "You plan schedules." },
                { "role": "user", "content": "Tasks:\nMath HW" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("{\"days\": []}")))
        .expect(1)
        .mount(&server)
        .await;

    let text = client(&server, Some("test-key")).complete(&request()).await.unwrap();
    assert_eq!(text, "{\"days\": []}");
}

#[tokio::test]
async fn test_content_is_trimmed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("\n  [1]  \n")))
        .mount(&server)
        .await;

    let text = client(&server, None).complete(&request()).await.unwrap();
    assert_eq!(text, "[1]");
}

#[tokio::test]
async fn test_no_key_sends_no_authorization() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("ok")))
        .expect(1)
        .mount(&server)
        .await;

    client(&server, None).complete(&request()).await.unwrap();

    let received = server.received_requests().await.unwrap();
    assert!(received[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_error_status_maps_to_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": { "message": "Rate limit reached for model", "type": "tokens" }
        })))
        .mount(&server)
        .await;

    let err = client(&server, Some("k")).complete(&request()).await.unwrap_err();
    match &err {
        LlmError::Http { status, message } => {
            assert_eq!(*status, 429);
            assert_eq!(message, "Rate limit reached for model");
        }
        other => panic!("expected Http error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_plain_text_error_body_kept() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = client(&server, None).complete(&request()).await.unwrap_err();
    assert!(matches!(err, LlmError::Http { status: 502, ref message } if message == "Bad Gateway"));
}

#[tokio::test]
async fn test_missing_content_is_malformed() {
    let server = MockServer::start().await;
    for body in [json!({ "choices": [] }), json!({ "choices": [ { "message": { "role": "assistant" } } ] })] {
        server.reset().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let err = client(&server, None).complete(&request()).await.unwrap_err();
        assert!(matches!(err, LlmError::MalformedResponse(_)));
    }
}

#[tokio::test]
async fn test_non_json_success_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client(&server, None).complete(&request()).await.unwrap_err();
    assert!(matches!(err, LlmError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion("late"))
                .set_delay(Duration::from_millis(800)),
        )
        .mount(&server)
        .await;

    let config = OpenAiCompatibleConfig::new(None, "m")
        .with_base_url(server.uri())
        .with_timeout(Duration::from_millis(100));
    let err = OpenAiCompatibleClient::new(config)
        .unwrap()
        .complete(&request())
        .await
        .unwrap_err();
    assert!(matches!(err, LlmError::Timeout(_)));
}

#[tokio::test]
async fn test_unreachable_server_is_request_error() {
    // Nothing listens on port 1.
    let config = OpenAiCompatibleConfig::new(None, "m").with_base_url("http://127.0.0.1:1/v1");
    let err = OpenAiCompatibleClient::new(config)
        .unwrap()
        .complete(&request())
        .await
        .unwrap_err();
    assert!(matches!(err, LlmError::Request(_) | LlmError::Timeout(_)));
}
