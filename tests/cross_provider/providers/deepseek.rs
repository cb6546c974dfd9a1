use super::{ProviderConfig, ProviderTestSetup};
use unified_llm::{DeepSeekProvider, Provider, ProviderType};

pub struct DeepSeekTestSetup;

impl ProviderTestSetup for DeepSeekTestSetup {
    fn get_config() -> ProviderConfig {
        ProviderConfig {
            provider_type: ProviderType::DeepSeek,
            model: "deepseek-chat",
            completions_path: "/chat/completions",
            fixture: "tests/cross_provider/fixtures/deepseek/chat_stream.sse",
            completion_fixture: "tests/cross_provider/fixtures/deepseek/chat_completion.json",
            total_tokens: Some(22),
            response_id: Some("0f6c1f2e-7b3a-4c55-9d0e-2a1b3c4d5e6f"),
        }
    }

    // DeepSeek serves the API with and without the `/v1` prefix.
    fn base_url(server_uri: &str) -> String {
        format!("{server_uri}/")
    }

    fn create_provider(base_url: &str) -> Provider {
        let provider = DeepSeekProvider::with_base_url("test-api-key", base_url)
            .expect("Failed to create DeepSeek provider");
        Provider::DeepSeek(provider)
    }
}
