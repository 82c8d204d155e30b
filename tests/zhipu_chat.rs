//! Non-streaming chat integration tests against a mock HTTP server

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use zhipu_ai::prelude::*;

async fn provider_for(server: &MockServer) -> Zhipu {
    Zhipu::builder()
        .api_key("test-key")
        .base_url(server.uri())
        .build()
        .unwrap()
}

#[tokio::test]
async fn generate_maps_text_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "glm-4-plus",
            "messages": [{ "role": "user", "content": "Hello" }],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "resp_1",
            "created": 1700000000,
            "model": "glm-4-plus",
            "choices": [{
                "message": { "role": "assistant", "content": "Hi there!" },
                "finish_reason": "stop",
            }],
            "usage": { "prompt_tokens": 9, "completion_tokens": 4 },
        })))
        .expect(1)
        .mount(&server)
        .await;

    let model = provider_for(&server).await.chat_model("glm-4-plus");
    let response = model
        .generate(ChatRequest::new(vec![ChatMessage::user("Hello")]))
        .await
        .unwrap();

    assert_eq!(response.text.as_deref(), Some("Hi there!"));
    assert_eq!(response.finish_reason, FinishReason::Stop);
    assert_eq!(response.usage.prompt_tokens, 9.0);
    assert_eq!(response.usage.completion_tokens, 4.0);
    assert_eq!(response.metadata.id.as_deref(), Some("resp_1"));
    assert_eq!(response.metadata.model.as_deref(), Some("glm-4-plus"));
    assert!(response.tool_calls.is_none());
    assert!(response.request_body.is_some());
}

#[tokio::test]
async fn generate_maps_tool_calls_with_raw_arguments() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "resp_2",
            "created": 1700000000,
            "model": "glm-4-plus",
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": "",
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {
                            "name": "get_weather",
                            "arguments": "{\"city\":\"Beijing\"}",
                        },
                    }],
                },
                "finish_reason": "tool_calls",
            }],
            "usage": { "prompt_tokens": 20, "completion_tokens": 8 },
        })))
        .mount(&server)
        .await;

    let model = provider_for(&server).await.chat_model("glm-4-plus");
    let request = ChatRequest::new(vec![ChatMessage::user("weather in Beijing?")]).with_tools(
        vec![Tool::function(
            "get_weather",
            Some("Look up the weather".to_string()),
            json!({ "type": "object", "properties": { "city": { "type": "string" } } }),
        )],
    );
    let response = model.generate(request).await.unwrap();

    // Empty text collapses to None.
    assert!(response.text.is_none());
    assert_eq!(response.finish_reason, FinishReason::ToolCalls);
    let calls = response.tool_calls.unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].tool_call_id, "call_1");
    assert_eq!(calls[0].tool_name, "get_weather");
    // Arguments stay a raw JSON string.
    assert_eq!(calls[0].arguments, "{\"city\":\"Beijing\"}");
}

#[tokio::test]
async fn generate_without_usage_reports_nan() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{
                "message": { "role": "assistant", "content": "ok" },
                "finish_reason": "stop",
            }],
        })))
        .mount(&server)
        .await;

    let model = provider_for(&server).await.chat_model("glm-4-plus");
    let response = model
        .generate(ChatRequest::new(vec![ChatMessage::user("hi")]))
        .await
        .unwrap();

    assert!(response.usage.prompt_tokens.is_nan());
    assert!(response.usage.completion_tokens.is_nan());
}

#[tokio::test]
async fn structured_error_body_surfaces_provider_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": { "message": "model not found", "code": "1211" },
        })))
        .mount(&server)
        .await;

    let model = provider_for(&server).await.chat_model("no-such-model");
    let err = model
        .generate(ChatRequest::new(vec![ChatMessage::user("hi")]))
        .await
        .unwrap_err();

    match err {
        LlmError::ApiError { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "model not found");
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn unstructured_error_body_falls_back_to_raw_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let model = provider_for(&server).await.chat_model("glm-4-plus");
    let err = model
        .generate(ChatRequest::new(vec![ChatMessage::user("hi")]))
        .await
        .unwrap_err();

    match err {
        LlmError::ApiError { status, message } => {
            assert_eq!(status, 502);
            assert_eq!(message, "Bad Gateway");
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
}
