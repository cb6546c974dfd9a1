//! The public entry point.

use crate::factory::{AIModel, Configuration, ProviderFactory, ProviderType};
use crate::provider::{LLMProvider, Provider};
use crate::providers::compatible::default_http_client;
use crate::{ChatMessage, ChunkStream, CompleteResponse, Error, RequestOptions, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::debug;

/// Routes calls to the right provider, creating each adapter on first use.
///
/// ```no_run
/// # async fn run() -> unified_llm::Result<()> {
/// use unified_llm::{AIClient, AIModel, ChatMessage, Configuration, ProviderType};
///
/// let config = Configuration::new().with_api_key(ProviderType::DeepSeek, "sk-...");
/// let client = AIClient::new(config)?;
/// let text = client
///     .generate_text(&AIModel::deepseek_chat(), &[ChatMessage::user("Hello")], None)
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct AIClient {
    configuration: Configuration,
    http: reqwest::Client,
    /// One slot per provider type. A slot is filled once; a failed
    /// construction leaves it empty so the next call tries again.
    providers: HashMap<ProviderType, OnceCell<Arc<Provider>>>,
}

impl AIClient {
    pub fn new(configuration: Configuration) -> Result<Self> {
        Ok(Self::with_http_client(configuration, default_http_client()?))
    }

    /// Use a caller-supplied HTTP client for every provider.
    pub fn with_http_client(configuration: Configuration, http: reqwest::Client) -> Self {
        let providers = ProviderType::ALL
            .into_iter()
            .map(|provider_type| (provider_type, OnceCell::new()))
            .collect();

        Self {
            configuration,
            http,
            providers,
        }
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// The configured default model for a provider, if any.
    pub fn default_model(&self, provider_type: ProviderType) -> Option<AIModel> {
        self.configuration
            .default_model(provider_type)
            .map(|model| AIModel::new(provider_type, model))
    }

    /// Get the adapter for `provider_type`, constructing it on first use.
    pub async fn provider(&self, provider_type: ProviderType) -> Result<Arc<Provider>> {
        let slot = self
            .providers
            .get(&provider_type)
            .ok_or(Error::ProviderNotConfigured(provider_type))?;

        let provider = slot
            .get_or_try_init(|| async {
                debug!(provider = %provider_type, "Constructing provider adapter");
                ProviderFactory::create(provider_type, &self.configuration, &self.http)
                    .map(Arc::new)
            })
            .await?;

        Ok(Arc::clone(provider))
    }

    /// Whether the adapter for `provider_type` has been constructed.
    pub fn is_initialized(&self, provider_type: ProviderType) -> bool {
        self.providers
            .get(&provider_type)
            .is_some_and(|slot| slot.initialized())
    }

    async fn resolve(
        &self,
        model: &AIModel,
        options: Option<RequestOptions>,
    ) -> Result<(Arc<Provider>, Option<RequestOptions>)> {
        let provider = self.provider(model.provider_type()).await?;

        if model.model_name().trim().is_empty() {
            return Err(Error::config(format!(
                "A model name is required for {}",
                model.provider_type()
            )));
        }

        let options = RequestOptions::merge(options.as_ref(), self.configuration.default_options());
        Ok((provider, options))
    }

    /// Run a non-streaming completion, keeping usage and finish reason.
    #[tracing::instrument(skip_all, fields(model = %model))]
    pub async fn complete(
        &self,
        model: &AIModel,
        messages: &[ChatMessage],
        options: Option<RequestOptions>,
    ) -> Result<CompleteResponse> {
        let (provider, options) = self.resolve(model, options).await?;
        provider
            .complete(model.model_name(), messages, options)
            .await
    }

    /// Generate a complete text response.
    #[tracing::instrument(skip_all, fields(model = %model))]
    pub async fn generate_text(
        &self,
        model: &AIModel,
        messages: &[ChatMessage],
        options: Option<RequestOptions>,
    ) -> Result<String> {
        let (provider, options) = self.resolve(model, options).await?;
        provider
            .generate_text(model.model_name(), messages, options)
            .await
    }

    /// Generate a streamed response.
    ///
    /// Fails immediately on configuration errors and non-2xx statuses; later
    /// failures end the stream with an error item.
    #[tracing::instrument(skip_all, fields(model = %model))]
    pub async fn stream_text(
        &self,
        model: &AIModel,
        messages: &[ChatMessage],
        options: Option<RequestOptions>,
    ) -> Result<ChunkStream> {
        let (provider, options) = self.resolve(model, options).await?;
        provider
            .stream_text(model.model_name(), messages, options)
            .await
    }
}

impl std::fmt::Debug for AIClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let initialized: Vec<ProviderType> = ProviderType::ALL
            .into_iter()
            .filter(|provider_type| self.is_initialized(*provider_type))
            .collect();

        f.debug_struct("AIClient")
            .field("configured", &self.configuration.configured_providers())
            .field("initialized", &initialized)
            .finish_non_exhaustive()
    }
}
