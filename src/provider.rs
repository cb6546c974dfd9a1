use crate::factory::ProviderType;
use crate::providers::{DeepSeekProvider, GeminiProvider, OpenAIProvider};
use crate::{ChatMessage, ChunkStream, CompleteResponse, RequestOptions, Result};

/// A chat completion provider.
///
/// Implementations hold no per-call mutable state and can be shared across
/// concurrent calls.
#[async_trait::async_trait]
pub trait LLMProvider: Send + Sync + 'static {
    fn provider_type(&self) -> ProviderType;

    /// Run a non-streaming completion.
    async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
        options: Option<RequestOptions>,
    ) -> Result<CompleteResponse>;

    /// Generate the full text of a completion.
    async fn generate_text(
        &self,
        model: &str,
        messages: &[ChatMessage],
        options: Option<RequestOptions>,
    ) -> Result<String> {
        Ok(self.complete(model, messages, options).await?.content)
    }

    /// Start a streamed completion. Errors after the stream has started are
    /// delivered through the stream.
    async fn stream_text(
        &self,
        model: &str,
        messages: &[ChatMessage],
        options: Option<RequestOptions>,
    ) -> Result<ChunkStream>;
}

/// The closed set of provider adapters.
#[derive(Debug, Clone)]
pub enum Provider {
    OpenAI(OpenAIProvider),
    GoogleGemini(GeminiProvider),
    DeepSeek(DeepSeekProvider),
}

impl Provider {
    fn as_dyn(&self) -> &dyn LLMProvider {
        match self {
            Provider::OpenAI(provider) => provider,
            Provider::GoogleGemini(provider) => provider,
            Provider::DeepSeek(provider) => provider,
        }
    }
}

#[async_trait::async_trait]
impl LLMProvider for Provider {
    fn provider_type(&self) -> ProviderType {
        self.as_dyn().provider_type()
    }

    async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
        options: Option<RequestOptions>,
    ) -> Result<CompleteResponse> {
        self.as_dyn().complete(model, messages, options).await
    }

    async fn generate_text(
        &self,
        model: &str,
        messages: &[ChatMessage],
        options: Option<RequestOptions>,
    ) -> Result<String> {
        self.as_dyn().generate_text(model, messages, options).await
    }

    async fn stream_text(
        &self,
        model: &str,
        messages: &[ChatMessage],
        options: Option<RequestOptions>,
    ) -> Result<ChunkStream> {
        self.as_dyn().stream_text(model, messages, options).await
    }
}
