//! Decoding of OpenAI-compatible `chat.completion.chunk` event streams.
//!
//! [`ChunkDecoder`] is the per-line state machine. [`parse_chunk_stream`]
//! runs it in a producer task that feeds a capacity-1 channel, so the
//! producer never runs more than one chunk ahead of the consumer.

use crate::providers::compatible::types::ChatCompletionChunk;
use crate::response::ChunkStream;
use crate::sse_stream::SseLinesExt;
use crate::types::StreamChunk;
use crate::Result;
use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, trace, warn, Instrument};

/// Prefix of every event line we act on.
pub const DATA_PREFIX: &[u8] = b"data: ";

/// Payload that ends the stream.
pub const DONE_SENTINEL: &str = "[DONE]";

/// What a single line means for the stream.
#[derive(Debug, Clone, PartialEq)]
pub enum LineEvent {
    /// Nothing to emit; keep reading.
    Continue,
    /// Emit this chunk and keep reading.
    Chunk(StreamChunk),
    /// Emit this chunk, then end the stream.
    Final(StreamChunk),
    /// The `[DONE]` sentinel; end the stream.
    Done,
}

/// Turns `data: {json}` lines into [`StreamChunk`]s.
#[derive(Debug, Default)]
pub struct ChunkDecoder {
    skipped: usize,
}

impl ChunkDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of payloads dropped because they did not decode.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Decode one line (without its terminator).
    pub fn decode_line(&mut self, line: &[u8]) -> LineEvent {
        let Some(rest) = line.strip_prefix(DATA_PREFIX) else {
            return LineEvent::Continue;
        };

        let payload = match std::str::from_utf8(rest) {
            Ok(text) => text.trim(),
            Err(e) => {
                self.skipped += 1;
                warn!(error = %e, "Skipping stream event that is not valid UTF-8");
                return LineEvent::Continue;
            }
        };

        if payload == DONE_SENTINEL {
            return LineEvent::Done;
        }

        let event: ChatCompletionChunk = match serde_json::from_str(payload) {
            Ok(event) => event,
            Err(e) => {
                self.skipped += 1;
                warn!(error = %e, payload, "Skipping stream event that failed to decode");
                return LineEvent::Continue;
            }
        };

        Self::convert_event(event, Bytes::copy_from_slice(payload.as_bytes()))
    }

    fn convert_event(event: ChatCompletionChunk, raw: Bytes) -> LineEvent {
        let ChatCompletionChunk {
            id, choices, usage, ..
        } = event;

        let Some(choice) = choices.into_iter().next() else {
            if let Some(usage) = usage {
                debug!(?usage, "Dropping usage from an event without choices");
            }
            return LineEvent::Continue;
        };

        let text_delta = choice.delta.content.unwrap_or_default();
        let finish_reason = choice.finish_reason;

        if text_delta.is_empty() && finish_reason.is_none() {
            return LineEvent::Continue;
        }

        let is_final = finish_reason.is_some();
        let chunk = StreamChunk {
            id: id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            text_delta,
            is_final,
            finish_reason,
            usage,
            raw_provider_response: Some(raw),
        };

        if is_final {
            LineEvent::Final(chunk)
        } else {
            LineEvent::Chunk(chunk)
        }
    }
}

/// Parse a raw SSE byte stream into a [`ChunkStream`].
///
/// Decoding runs in a spawned task, so this must be called inside a Tokio
/// runtime. Dropping the returned stream stops the task and drops
/// `byte_stream`.
pub fn parse_chunk_stream<S, E>(byte_stream: S) -> ChunkStream
where
    S: Stream<Item = std::result::Result<Bytes, E>> + Send + Unpin + 'static,
    E: Into<Box<dyn std::error::Error + Send + Sync>> + Send + 'static,
{
    let (tx, rx) = mpsc::channel(1);
    tokio::spawn(produce_chunks(byte_stream, tx).instrument(tracing::debug_span!("chunk_stream")));
    ChunkStream::from_stream(ReceiverStream::new(rx))
}

async fn produce_chunks<S, E>(byte_stream: S, tx: mpsc::Sender<Result<StreamChunk>>)
where
    S: Stream<Item = std::result::Result<Bytes, E>> + Send + Unpin + 'static,
    E: Into<Box<dyn std::error::Error + Send + Sync>> + Send + 'static,
{
    let mut lines = byte_stream.sse_lines();
    let mut decoder = ChunkDecoder::new();

    loop {
        let next = tokio::select! {
            biased;
            _ = tx.closed() => {
                debug!("Chunk stream dropped by consumer");
                return;
            }
            next = lines.next() => next,
        };

        let line = match next {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                warn!(error = %e, "Chunk stream failed");
                let _ = tx.send(Err(e)).await;
                return;
            }
            None => {
                debug!(skipped = decoder.skipped(), "Byte stream ended without a termination signal");
                return;
            }
        };

        match decoder.decode_line(&line) {
            LineEvent::Continue => {}
            LineEvent::Chunk(chunk) => {
                trace!(id = %chunk.id, delta = %chunk.text_delta, "Emitting chunk");
                if tx.send(Ok(chunk)).await.is_err() {
                    debug!("Chunk stream dropped by consumer");
                    return;
                }
            }
            LineEvent::Final(chunk) => {
                debug!(
                    finish_reason = chunk.finish_reason.as_deref().unwrap_or_default(),
                    skipped = decoder.skipped(),
                    "Stream finished"
                );
                let _ = tx.send(Ok(chunk)).await;
                return;
            }
            LineEvent::Done => {
                debug!(skipped = decoder.skipped(), "Received [DONE]");
                return;
            }
        }
    }
}
