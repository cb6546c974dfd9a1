pub mod deepseek;
pub mod gemini;
pub mod openai;

use serde_json::json;
use unified_llm::{Provider, ProviderType};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// The prompt every scenario sends.
pub const SYSTEM_PROMPT: &str = "You are a helpful and concise assistant.";
pub const USER_PROMPT: &str = "Describe Rust in one sentence.";

/// Text every fixture stream reassembles to.
pub const EXPECTED_TEXT: &str = "Rust is a systems programming language.";

/// Provider configuration for cross-provider testing
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub provider_type: ProviderType,
    pub model: &'static str,
    /// Path the adapter posts to, relative to the mock server root.
    pub completions_path: &'static str,
    pub fixture: &'static str,
    /// Non-streaming response body.
    pub completion_fixture: &'static str,
    /// `total_tokens` reported on the final event, when the fixture has one.
    pub total_tokens: Option<u32>,
    /// The response `id`, when the provider sends one.
    pub response_id: Option<&'static str>,
}

/// Trait for provider-specific test setup
pub trait ProviderTestSetup {
    fn get_config() -> ProviderConfig;

    /// Base URL to hand the adapter so it lands on the mock server.
    fn base_url(server_uri: &str) -> String;

    fn create_provider(base_url: &str) -> Provider;
}

/// Load test fixture from file
pub fn load_fixture(filename: &str) -> String {
    std::fs::read_to_string(filename)
        .unwrap_or_else(|_| panic!("Failed to load test fixture: {filename}"))
}

fn request_body(config: &ProviderConfig, stream: bool) -> serde_json::Value {
    json!({
        "model": config.model,
        "messages": [
            {"role": "system", "content": SYSTEM_PROMPT},
            {"role": "user", "content": USER_PROMPT}
        ],
        "stream": stream,
        "temperature": 0.2
    })
}

/// Mount the non-streaming completion mock on the provided mock server.
pub async fn mount_completion(mock_server: &MockServer, config: &ProviderConfig) {
    Mock::given(method("POST"))
        .and(path(config.completions_path))
        .and(header("authorization", "Bearer test-api-key"))
        .and(body_json(request_body(config, false)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(load_fixture(config.completion_fixture))
                .insert_header("content-type", "application/json"),
        )
        .expect(1)
        .mount(mock_server)
        .await;
}

/// Mount the streaming completion mock on the provided mock server.
pub async fn mount_stream(mock_server: &MockServer, config: &ProviderConfig) {
    Mock::given(method("POST"))
        .and(path(config.completions_path))
        .and(header("authorization", "Bearer test-api-key"))
        .and(body_json(request_body(config, true)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(load_fixture(config.fixture))
                .insert_header("content-type", "text/event-stream"),
        )
        .expect(1)
        .mount(mock_server)
        .await;
}
