use super::{ProviderConfig, ProviderTestSetup};
use unified_llm::{GeminiProvider, Provider, ProviderType};

pub struct GeminiTestSetup;

impl ProviderTestSetup for GeminiTestSetup {
    fn get_config() -> ProviderConfig {
        ProviderConfig {
            provider_type: ProviderType::GoogleGemini,
            model: "gemini-2.0-flash",
            completions_path: "/v1beta/openai/chat/completions",
            // CRLF line endings, no event ids, text on the final event.
            fixture: "tests/cross_provider/fixtures/gemini/chat_stream.sse",
            completion_fixture: "tests/cross_provider/fixtures/gemini/chat_completion.json",
            total_tokens: Some(17),
            response_id: None,
        }
    }

    fn base_url(server_uri: &str) -> String {
        format!("{server_uri}/v1beta/openai")
    }

    fn create_provider(base_url: &str) -> Provider {
        let provider = GeminiProvider::with_base_url("test-api-key", base_url)
            .expect("Failed to create Gemini provider");
        Provider::GoogleGemini(provider)
    }
}
