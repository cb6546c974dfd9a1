//! HTTP client shared by every OpenAI-compatible provider.

use super::types::{ChatCompletionRequest, ChatCompletionResponse, WireMessage};
use crate::factory::ProviderType;
use crate::response::{ChunkStream, CompleteResponse};
use crate::streaming::parse_chunk_stream;
use crate::types::{ChatMessage, RequestOptions};
use crate::{Error, Result};
use futures_util::StreamExt;
use reqwest::{Client, Url};
use std::time::Duration;
use tracing::{debug, warn};

/// Upper bound on how much of an error body is read on the streaming path.
pub const STREAM_ERROR_BODY_LIMIT: usize = 1024;

/// Build the HTTP client used when the caller does not supply one.
///
/// Only the connect phase is bounded; a total request timeout would cut
/// long-running streams.
pub fn default_http_client() -> Result<Client> {
    Ok(Client::builder()
        .connect_timeout(Duration::from_secs(30))
        .build()?)
}

/// Client for any provider that speaks the OpenAI chat completions API.
///
/// Holds no per-call state, so a single instance can serve concurrent calls.
#[derive(Clone)]
pub struct CompatibleClient {
    provider: ProviderType,
    client: Client,
    api_key: String,
    endpoint: Url,
}

impl CompatibleClient {
    /// Validate the credential and base URL and build the client.
    pub fn new(
        provider: ProviderType,
        api_key: impl Into<String>,
        base_url: &str,
        client: Client,
    ) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(Error::config(format!("{provider} API key is missing")));
        }

        let endpoint = Self::endpoint_url(base_url)?;

        Ok(Self {
            provider,
            client,
            api_key,
            endpoint,
        })
    }

    fn endpoint_url(base_url: &str) -> Result<Url> {
        let url = Url::parse(&format!(
            "{}/chat/completions",
            base_url.trim().trim_end_matches('/')
        ))
        .map_err(|e| Error::config(format!("Invalid base URL '{base_url}': {e}")))?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(Error::config(format!(
                "Invalid base URL '{base_url}': unsupported scheme '{scheme}'"
            ))),
        }
    }

    pub fn provider(&self) -> ProviderType {
        self.provider
    }

    /// The full `/chat/completions` URL requests are sent to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Build the request body.
    pub fn build_request<'a>(
        model: &'a str,
        messages: &'a [ChatMessage],
        options: Option<&RequestOptions>,
        stream: bool,
    ) -> ChatCompletionRequest<'a> {
        let options = options.copied().unwrap_or_default();

        ChatCompletionRequest {
            model,
            messages: messages
                .iter()
                .map(|message| WireMessage {
                    role: message.role(),
                    content: message.content(),
                })
                .collect(),
            stream,
            temperature: options.temperature,
            max_tokens: options.max_tokens,
            top_p: options.top_p,
        }
    }

    async fn send(&self, body: &ChatCompletionRequest<'_>) -> Result<reqwest::Response> {
        debug!(
            provider = %self.provider,
            model = body.model,
            stream = body.stream,
            messages = body.messages.len(),
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await?;

        Ok(response)
    }

    /// Run a non-streaming completion and decode the first choice.
    pub async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
        options: Option<RequestOptions>,
    ) -> Result<CompleteResponse> {
        let body = Self::build_request(model, messages, options.as_ref(), false);
        let response = self.send(&body).await?;

        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let message = String::from_utf8_lossy(&bytes).into_owned();
            warn!(provider = %self.provider, status = status.as_u16(), "API error");
            return Err(Error::api(status.as_u16(), message));
        }

        Self::parse_response(&bytes)
    }

    /// Decode a non-streaming response body.
    pub fn parse_response(body: &[u8]) -> Result<CompleteResponse> {
        let response: ChatCompletionResponse = serde_json::from_slice(body)?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::parsing("No choices found in response"))?;
        let content = choice
            .message
            .content
            .ok_or_else(|| Error::parsing("No content found in first choice"))?;

        Ok(CompleteResponse {
            id: response
                .id
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            model: response.model,
            content,
            finish_reason: choice.finish_reason,
            usage: response.usage,
        })
    }

    /// Start a streaming completion.
    ///
    /// A non-2xx status fails here, before any chunk is produced. Failures
    /// after that arrive through the returned stream.
    pub async fn stream(
        &self,
        model: &str,
        messages: &[ChatMessage],
        options: Option<RequestOptions>,
    ) -> Result<ChunkStream> {
        let body = Self::build_request(model, messages, options.as_ref(), true);
        let response = self.send(&body).await?;

        let status = response.status();
        if !status.is_success() {
            let message = read_error_prefix(response).await;
            warn!(provider = %self.provider, status = status.as_u16(), "API error on stream start");
            return Err(Error::api(status.as_u16(), message));
        }

        Ok(parse_chunk_stream(Box::pin(response.bytes_stream())).with_model(model))
    }
}

impl std::fmt::Debug for CompatibleClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompatibleClient")
            .field("provider", &self.provider)
            .field("endpoint", &self.endpoint.as_str())
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Read at most [`STREAM_ERROR_BODY_LIMIT`] bytes of an error body.
async fn read_error_prefix(response: reqwest::Response) -> String {
    let mut body = Vec::with_capacity(STREAM_ERROR_BODY_LIMIT);
    let mut stream = Box::pin(response.bytes_stream());

    while body.len() < STREAM_ERROR_BODY_LIMIT {
        match stream.next().await {
            Some(Ok(chunk)) => body.extend_from_slice(&chunk),
            _ => break,
        }
    }
    body.truncate(STREAM_ERROR_BODY_LIMIT);

    if body.is_empty() {
        "Unknown API error during streaming".to_string()
    } else {
        String::from_utf8_lossy(&body).into_owned()
    }
}
