//! Google Gemini, through Google's OpenAI-compatible endpoint.

use super::compatible::{default_http_client, CompatibleClient};
use crate::factory::ProviderType;
use crate::provider::LLMProvider;
use crate::{ChatMessage, ChunkStream, CompleteResponse, RequestOptions, Result};
use reqwest::{Client, Url};

/// Google Gemini provider implementation.
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    client: CompatibleClient,
}

impl GeminiProvider {
    pub const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com/v1beta/openai";

    /// Create a new Google Gemini provider.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, Self::DEFAULT_BASE_URL)
    }

    /// Create a new Google Gemini provider with custom base URL.
    pub fn with_base_url(api_key: impl Into<String>, base_url: &str) -> Result<Self> {
        Self::with_client(api_key, base_url, default_http_client()?)
    }

    /// Create a provider that shares an existing HTTP client.
    pub fn with_client(api_key: impl Into<String>, base_url: &str, client: Client) -> Result<Self> {
        Ok(Self {
            client: CompatibleClient::new(ProviderType::GoogleGemini, api_key, base_url, client)?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        self.client.endpoint()
    }
}

#[async_trait::async_trait]
impl LLMProvider for GeminiProvider {
    fn provider_type(&self) -> ProviderType {
        ProviderType::GoogleGemini
    }

    async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
        options: Option<RequestOptions>,
    ) -> Result<CompleteResponse> {
        self.client.complete(model, messages, options).await
    }

    async fn stream_text(
        &self,
        model: &str,
        messages: &[ChatMessage],
        options: Option<RequestOptions>,
    ) -> Result<ChunkStream> {
        self.client.stream(model, messages, options).await
    }
}
