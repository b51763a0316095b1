//! Provider client tests against a local mock HTTP server

use assert_matches::assert_matches;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::error::{ApiFailure, GeneratorError};
use crate::services::RealTextGenerator;
use crate::traits::TextGenerator;
use crate::types::{GenerationRequest, GeneratorConfig, ProviderId};

fn generator_for(server: &MockServer, provider: ProviderId) -> RealTextGenerator {
    let config = GeneratorConfig::new(provider, "test-key")
        .unwrap()
        .with_model("test-model")
        .with_base_url(&server.uri())
        .unwrap()
        .with_timeout(Duration::from_secs(5));
    RealTextGenerator::new(config).unwrap()
}

fn sample_request() -> GenerationRequest {
    GenerationRequest::new("You are terse.", json!({"useCases": ["Demand forecasting"]}))
}

#[tokio::test]
async fn test_openai_completion_is_extracted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({"model": "test-model"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "{\"challenges\": []}"}}],
            "usage": {"total_tokens": 57}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let generator = generator_for(&server, ProviderId::OpenAI);
    let response = generator.generate(&sample_request()).await.unwrap();

    assert_eq!(response.content, "{\"challenges\": []}");
    assert_eq!(response.tokens_used, 57);
    assert_eq!(response.provider, ProviderId::OpenAI);
    assert_eq!(response.model, "test-model");
    assert!(generator.is_live());
}

#[tokio::test]
async fn test_anthropic_completion_sums_usage() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "test-key"))
        .and(header("anthropic-version", "2023-06-01"))
        .and(body_partial_json(json!({"system": "You are terse."})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{"type": "text", "text": "Prioritize forecasting."}],
            "usage": {"input_tokens": 20, "output_tokens": 6}
        })))
        .mount(&server)
        .await;

    let generator = generator_for(&server, ProviderId::Anthropic);
    let response = generator.generate(&sample_request()).await.unwrap();

    assert_eq!(response.content, "Prioritize forecasting.");
    assert_eq!(response.tokens_used, 26);
}

#[tokio::test]
async fn test_server_error_is_upstream_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let generator = generator_for(&server, ProviderId::OpenAI);
    let err = generator.generate(&sample_request()).await.unwrap_err();

    assert_matches!(
        err,
        GeneratorError::UpstreamGenerationFailure {
            provider: ProviderId::OpenAI,
            reason: ApiFailure::ServerError(_)
        }
    );
}

#[tokio::test]
async fn test_rejected_key_is_authentication_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "invalid key"})))
        .mount(&server)
        .await;

    let generator = generator_for(&server, ProviderId::Anthropic);
    let err = generator.generate(&sample_request()).await.unwrap_err();

    assert_matches!(
        err,
        GeneratorError::UpstreamGenerationFailure {
            reason: ApiFailure::AuthenticationFailed,
            ..
        }
    );
}

#[tokio::test]
async fn test_missing_content_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let generator = generator_for(&server, ProviderId::OpenAI);
    let err = generator.generate(&sample_request()).await.unwrap_err();

    assert_matches!(
        err,
        GeneratorError::UpstreamGenerationFailure {
            reason: ApiFailure::InvalidRequest(_),
            ..
        }
    );
}

#[tokio::test]
async fn test_slow_provider_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(500))
                .set_body_json(json!({"choices": [{"message": {"content": "late"}}]})),
        )
        .mount(&server)
        .await;

    let config = GeneratorConfig::new(ProviderId::OpenAI, "test-key")
        .unwrap()
        .with_base_url(&server.uri())
        .unwrap()
        .with_timeout(Duration::from_millis(50));
    let generator = RealTextGenerator::new(config).unwrap();

    let err = generator.generate(&sample_request()).await.unwrap_err();
    assert_matches!(
        err,
        GeneratorError::UpstreamGenerationFailure {
            reason: ApiFailure::Timeout,
            ..
        }
    );
}
