use super::{ProviderConfig, ProviderTestSetup};
use unified_llm::{OpenAIProvider, Provider, ProviderType};

pub struct OpenAITestSetup;

impl ProviderTestSetup for OpenAITestSetup {
    fn get_config() -> ProviderConfig {
        ProviderConfig {
            provider_type: ProviderType::OpenAI,
            model: "gpt-4o-mini",
            completions_path: "/v1/chat/completions",
            fixture: "tests/cross_provider/fixtures/openai/chat_stream.sse",
            completion_fixture: "tests/cross_provider/fixtures/openai/chat_completion.json",
            total_tokens: None,
            response_id: Some("chatcmpl-9xYz"),
        }
    }

    fn base_url(server_uri: &str) -> String {
        format!("{server_uri}/v1")
    }

    fn create_provider(base_url: &str) -> Provider {
        let provider = OpenAIProvider::with_base_url("test-api-key", base_url)
            .expect("Failed to create OpenAI provider");
        Provider::OpenAI(provider)
    }
}
