//! Delta accumulation logic for streaming responses.

use crate::response::CompleteResponse;
use crate::types::{StreamChunk, Usage};

/// Accumulates streamed chunks into a complete response.
#[derive(Debug, Default)]
pub struct StreamAccumulator {
    id: Option<String>,
    model: String,
    content: String,
    finish_reason: Option<String>,
    usage: Option<Usage>,
    chunks: usize,
}

impl StreamAccumulator {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }

    /// Fold one chunk into the accumulated response.
    pub fn push(&mut self, chunk: StreamChunk) {
        self.chunks += 1;

        if self.id.is_none() {
            self.id = Some(chunk.id);
        }
        self.content.push_str(&chunk.text_delta);

        if chunk.finish_reason.is_some() {
            self.finish_reason = chunk.finish_reason;
        }
        // Providers report usage once, on the last event; keep the latest.
        if chunk.usage.is_some() {
            self.usage = chunk.usage;
        }
    }

    /// Number of chunks seen so far.
    pub fn len(&self) -> usize {
        self.chunks
    }

    pub fn is_empty(&self) -> bool {
        self.chunks == 0
    }

    /// Text accumulated so far.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Finalize and return the complete response.
    pub fn finalize(self) -> CompleteResponse {
        CompleteResponse {
            id: self.id.unwrap_or_default(),
            model: self.model,
            content: self.content,
            finish_reason: self.finish_reason,
            usage: self.usage,
        }
    }
}
