//! Response handling for chat completions.

use crate::accumulator::StreamAccumulator;
use crate::types::{StreamChunk, Usage};
use crate::Result;
use futures::stream::BoxStream;
use futures_util::{Stream, StreamExt};
use std::pin::Pin;
use std::task::{Context, Poll};

/// A complete (non-streamed or fully buffered) chat completion.
#[derive(Debug, Clone, PartialEq)]
pub struct CompleteResponse {
    pub id: String,
    pub model: String,
    /// Text of the first choice.
    pub content: String,
    pub finish_reason: Option<String>,
    pub usage: Option<Usage>,
}

/// The lazily produced chunks of a streamed completion.
///
/// Errors after the stream has started arrive as the last item. Dropping the
/// stream early releases the underlying HTTP response.
pub struct ChunkStream {
    model: String,
    stream: BoxStream<'static, Result<StreamChunk>>,
}

impl ChunkStream {
    /// Create a new chunk stream from any stream of chunk results.
    pub fn from_stream<S>(stream: S) -> Self
    where
        S: Stream<Item = Result<StreamChunk>> + Send + 'static,
    {
        Self {
            model: String::new(),
            stream: stream.boxed(),
        }
    }

    /// Record the model the stream was requested for.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Consume the whole stream into a [`CompleteResponse`].
    pub async fn buffer(mut self) -> Result<CompleteResponse> {
        let mut accumulator = StreamAccumulator::new(std::mem::take(&mut self.model));

        while let Some(chunk) = self.stream.next().await {
            accumulator.push(chunk?);
        }

        Ok(accumulator.finalize())
    }

    /// Get just the concatenated text.
    pub async fn text(self) -> Result<String> {
        Ok(self.buffer().await?.content)
    }
}

impl Stream for ChunkStream {
    type Item = Result<StreamChunk>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.stream.poll_next_unpin(cx)
    }
}

impl std::fmt::Debug for ChunkStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkStream")
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}
