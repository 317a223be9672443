//! Gemini client behavior against a mock API

use insurance_compare::config::GeneratorConfig;
use insurance_compare::generator::{GeminiClient, GenerationError, TextGenerator};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/v1beta/models/gemini-1.5-pro:generateContent";

fn client_for(server: &MockServer) -> GeminiClient {
    GeminiClient::new(format!("{}/v1beta", server.uri()), "gemini-1.5-pro", "test-key")
        .expect("Failed to create client")
}

fn text_response(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [{"content": {"role": "model", "parts": [{"text": text}]}}]
    }))
}

#[tokio::test]
async fn test_generate_sends_prompt_and_parameters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(query_param("key", "test-key"))
        .and(body_partial_json(json!({
            "contents": [{"parts": [{"text": "Resumí esto"}]}],
            "generationConfig": {"topK": 40, "maxOutputTokens": 1024}
        })))
        .respond_with(text_response("## Resumen"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let settings = GeneratorConfig::default().summary;
    let text = client_for(&mock_server)
        .generate("Resumí esto", &settings)
        .await
        .expect("Generation failed");

    assert_eq!(text, "## Resumen");
}

#[tokio::test]
async fn test_rate_limit_is_reported() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(429))
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server)
        .generate("x", &GeneratorConfig::default().comparison)
        .await;

    assert!(matches!(
        result,
        Err(GenerationError::RateLimited { status: 429 })
    ));
}

#[tokio::test]
async fn test_server_error_is_unavailable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server)
        .generate("x", &GeneratorConfig::default().comparison)
        .await;

    assert!(matches!(result, Err(GenerationError::Unavailable(_))));
}

#[tokio::test]
async fn test_response_without_candidates_is_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        })))
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server)
        .generate("x", &GeneratorConfig::default().summary)
        .await;

    assert!(matches!(result, Err(GenerationError::EmptyResponse)));
}

#[tokio::test]
async fn test_malformed_body_is_unavailable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy error</html>"))
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server)
        .generate("x", &GeneratorConfig::default().summary)
        .await;

    assert!(matches!(result, Err(GenerationError::Unavailable(_))));
}
