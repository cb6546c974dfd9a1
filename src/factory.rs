use crate::provider::Provider;
use crate::providers::{DeepSeekProvider, GeminiProvider, OpenAIProvider};
use crate::types::RequestOptions;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;

/// Supported LLM providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProviderType {
    #[serde(rename = "openAI")]
    OpenAI,
    GoogleGemini,
    DeepSeek,
}

impl ProviderType {
    pub const ALL: [ProviderType; 3] = [
        ProviderType::OpenAI,
        ProviderType::GoogleGemini,
        ProviderType::DeepSeek,
    ];

    /// Human-readable provider name.
    pub fn name(&self) -> &'static str {
        match self {
            ProviderType::OpenAI => "OpenAI",
            ProviderType::GoogleGemini => "Google Gemini",
            ProviderType::DeepSeek => "DeepSeek",
        }
    }

    /// Base URL used when the configuration does not override it.
    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderType::OpenAI => OpenAIProvider::DEFAULT_BASE_URL,
            ProviderType::GoogleGemini => GeminiProvider::DEFAULT_BASE_URL,
            ProviderType::DeepSeek => DeepSeekProvider::DEFAULT_BASE_URL,
        }
    }

    fn env_prefix(&self) -> &'static str {
        match self {
            ProviderType::OpenAI => "OPENAI",
            ProviderType::GoogleGemini => "GEMINI",
            ProviderType::DeepSeek => "DEEPSEEK",
        }
    }
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A model selector: which provider, and which of its models.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AIModel {
    OpenAI(String),
    DeepSeek(String),
    GoogleGemini(String),
}

impl AIModel {
    pub fn new(provider_type: ProviderType, model: impl Into<String>) -> Self {
        let model = model.into();
        match provider_type {
            ProviderType::OpenAI => AIModel::OpenAI(model),
            ProviderType::DeepSeek => AIModel::DeepSeek(model),
            ProviderType::GoogleGemini => AIModel::GoogleGemini(model),
        }
    }

    pub fn provider_type(&self) -> ProviderType {
        match self {
            AIModel::OpenAI(_) => ProviderType::OpenAI,
            AIModel::DeepSeek(_) => ProviderType::DeepSeek,
            AIModel::GoogleGemini(_) => ProviderType::GoogleGemini,
        }
    }

    pub fn model_name(&self) -> &str {
        match self {
            AIModel::OpenAI(model) | AIModel::DeepSeek(model) | AIModel::GoogleGemini(model) => {
                model
            }
        }
    }

    pub fn gpt_4o() -> Self {
        AIModel::OpenAI("gpt-4o".to_string())
    }

    pub fn gpt_4o_mini() -> Self {
        AIModel::OpenAI("gpt-4o-mini".to_string())
    }

    pub fn deepseek_chat() -> Self {
        AIModel::DeepSeek("deepseek-chat".to_string())
    }

    pub fn deepseek_coder() -> Self {
        AIModel::DeepSeek("deepseek-coder".to_string())
    }

    pub fn gemini_flash() -> Self {
        AIModel::GoogleGemini("gemini-2.0-flash".to_string())
    }
}

impl std::fmt::Display for AIModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.provider_type(), self.model_name())
    }
}

/// Credentials and defaults for every provider a client may talk to.
///
/// Built once and handed to [`crate::AIClient`]; it is never mutated after.
#[derive(Debug, Clone, Default)]
pub struct Configuration {
    api_keys: HashMap<ProviderType, String>,
    default_models: HashMap<ProviderType, String>,
    base_urls: HashMap<ProviderType, String>,
    default_options: Option<RequestOptions>,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_key(mut self, provider_type: ProviderType, api_key: impl Into<String>) -> Self {
        self.api_keys.insert(provider_type, api_key.into());
        self
    }

    pub fn with_default_model(mut self, provider_type: ProviderType, model: impl Into<String>) -> Self {
        self.default_models.insert(provider_type, model.into());
        self
    }

    /// Point a provider at a different OpenAI-compatible endpoint.
    pub fn with_base_url(mut self, provider_type: ProviderType, base_url: impl Into<String>) -> Self {
        self.base_urls.insert(provider_type, base_url.into());
        self
    }

    pub fn with_default_options(mut self, options: RequestOptions) -> Self {
        self.default_options = Some(options);
        self
    }

    pub fn api_key(&self, provider_type: ProviderType) -> Option<&str> {
        self.api_keys.get(&provider_type).map(String::as_str)
    }

    pub fn default_model(&self, provider_type: ProviderType) -> Option<&str> {
        self.default_models.get(&provider_type).map(String::as_str)
    }

    pub fn base_url(&self, provider_type: ProviderType) -> Option<&str> {
        self.base_urls.get(&provider_type).map(String::as_str)
    }

    pub fn default_options(&self) -> Option<&RequestOptions> {
        self.default_options.as_ref()
    }

    /// Providers that have a credential.
    pub fn configured_providers(&self) -> Vec<ProviderType> {
        ProviderType::ALL
            .into_iter()
            .filter(|provider_type| self.api_keys.contains_key(provider_type))
            .collect()
    }

    /// Create configuration from environment variables.
    ///
    /// Reads `OPENAI_API_KEY`, `DEEPSEEK_API_KEY`, `GEMINI_API_KEY` and the
    /// optional `*_BASE_URL` overrides. Empty values are ignored.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let read = |name: String| lookup(&name).filter(|value| !value.trim().is_empty());
        let mut config = Self::new();

        for provider_type in ProviderType::ALL {
            let prefix = provider_type.env_prefix();
            if let Some(api_key) = read(format!("{prefix}_API_KEY")) {
                config = config.with_api_key(provider_type, api_key);
            }
            if let Some(base_url) = read(format!("{prefix}_BASE_URL")) {
                config = config.with_base_url(provider_type, base_url);
            }
        }

        if config.api_keys.is_empty() {
            return Err(Error::config(
                "No provider API keys found in environment. Set OPENAI_API_KEY, DEEPSEEK_API_KEY or GEMINI_API_KEY",
            ));
        }

        Ok(config)
    }
}

/// Factory for creating provider adapters.
pub struct ProviderFactory;

impl ProviderFactory {
    /// Create the adapter for `provider_type` from configuration.
    pub fn create(
        provider_type: ProviderType,
        config: &Configuration,
        client: &reqwest::Client,
    ) -> Result<Provider> {
        let api_key = config
            .api_key(provider_type)
            .ok_or(Error::ProviderNotConfigured(provider_type))?;
        let base_url = config
            .base_url(provider_type)
            .unwrap_or_else(|| provider_type.default_base_url());

        let provider = match provider_type {
            ProviderType::OpenAI => {
                Provider::OpenAI(OpenAIProvider::with_client(api_key, base_url, client.clone())?)
            }
            ProviderType::GoogleGemini => Provider::GoogleGemini(GeminiProvider::with_client(
                api_key,
                base_url,
                client.clone(),
            )?),
            ProviderType::DeepSeek => Provider::DeepSeek(DeepSeekProvider::with_client(
                api_key,
                base_url,
                client.clone(),
            )?),
        };
        Ok(provider)
    }
}
