//! Types for streaming responses.

use crate::types::Usage;
use bytes::Bytes;

/// One incremental piece of a streamed completion.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamChunk {
    /// Provider-assigned event id, or a generated one when the provider omits it.
    pub id: String,
    /// Text fragment; empty on a bare terminal chunk.
    pub text_delta: String,
    /// Set on the chunk that carried a finish reason.
    pub is_final: bool,
    /// Provider finish reason (`stop`, `length`, ...) on the final chunk.
    pub finish_reason: Option<String>,
    pub usage: Option<Usage>,
    /// The decoded `data:` payload this chunk came from.
    pub raw_provider_response: Option<Bytes>,
}

impl StreamChunk {
    pub fn new(id: impl Into<String>, text_delta: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text_delta: text_delta.into(),
            is_final: false,
            finish_reason: None,
            usage: None,
            raw_provider_response: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text_delta.is_empty()
    }
}
