//! OpenAI chat-completions provider against a mocked endpoint.

use currency_agent::config::AgentConfig;
use currency_agent::error::AgentError;
use currency_agent::models::OpenAiModel;
use currency_agent::provider::openai::OpenAiProvider;
use currency_agent::provider::{create_provider, ModelProvider, ProviderRequest};
use currency_agent::types::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider_for(server: &MockServer) -> OpenAiProvider {
    OpenAiProvider::new(
        OpenAiModel::default(),
        "sk-test".into(),
        Some(format!("{}/v1/", server.uri())),
    )
}

fn request(text: &str) -> ProviderRequest {
    ProviderRequest {
        messages: vec![ModelMessage::user(text)],
        settings: GenerationSettings::default(),
        tools: None,
        response_format: None,
    }
}

#[tokio::test]
async fn parses_text_completion_and_usage() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({"model": "gpt-4o-mini-2024-07-18"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{
                "message": {"role": "assistant", "content": "{\"status\":\"completed\",\"message\":\"hi\"}"},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 12, "completion_tokens": 8, "total_tokens": 20}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = provider_for(&server)
        .generate_text(&request("hello"))
        .await
        .unwrap();

    assert_eq!(response.text, r#"{"status":"completed","message":"hi"}"#);
    assert_eq!(response.finish_reason, Some(FinishReason::Stop));
    assert_eq!(
        response.usage,
        Usage {
            input_tokens: 12,
            output_tokens: 8,
            total_tokens: 20,
        }
    );
    assert!(response.tool_calls.is_empty());
}

#[tokio::test]
async fn parses_tool_calls() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_abc",
                        "type": "function",
                        "function": {
                            "name": "get_exchange_rate",
                            "arguments": "{\"currency_from\":\"USD\",\"currency_to\":\"JPY\"}"
                        }
                    }]
                },
                "finish_reason": "tool_calls"
            }]
        })))
        .mount(&server)
        .await;

    let response = provider_for(&server)
        .generate_text(&request("USD to JPY"))
        .await
        .unwrap();

    assert_eq!(response.text, "");
    assert_eq!(response.finish_reason, Some(FinishReason::ToolCalls));
    assert_eq!(
        response.tool_calls,
        vec![AgentToolCall {
            id: "call_abc".into(),
            name: "get_exchange_rate".into(),
            arguments: json!({"currency_from": "USD", "currency_to": "JPY"}),
        }]
    );
    assert_eq!(response.usage, Usage::default());
}

#[tokio::test]
async fn unauthorized_maps_to_authentication_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .generate_text(&request("hello"))
        .await
        .unwrap_err();

    assert!(matches!(err, AgentError::Authentication(ref body) if body == "invalid api key"));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn server_error_is_retryable_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .generate_text(&request("hello"))
        .await
        .unwrap_err();

    assert!(matches!(err, AgentError::Api { status: 503, .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn empty_choices_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .generate_text(&request("hello"))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("No choices"));
}

#[test]
fn create_provider_requires_api_key() {
    let config = AgentConfig::from_lookup(|_| None);

    let err = create_provider(&config).err().expect("missing key must fail");

    assert_eq!(err.to_string(), "OPENAI_API_KEY environment variable not set.");
}

#[test]
fn create_provider_uses_configured_model() {
    let config = AgentConfig::from_lookup(|key| match key {
        "OPENAI_API_KEY" => Some("sk-test".into()),
        "CURRENCY_AGENT_MODEL" => Some("gpt-4o".into()),
        _ => None,
    });

    let provider = create_provider(&config).unwrap();

    assert_eq!(provider.provider_name(), "openai");
    assert_eq!(provider.model_id(), "gpt-4o");
    assert!(provider.capabilities().supports_tools);
}
