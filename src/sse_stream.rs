//! Stream adapter that splits a server-sent-event byte stream into lines.

use crate::Error;
use bytes::{Bytes, BytesMut};
use futures_util::{Stream, StreamExt};
use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{ready, Context, Poll};

/// Longest line (1 MiB) we are willing to buffer before giving up on the stream.
pub const MAX_LINE_LENGTH: usize = 1024 * 1024;

/// A stream adapter that yields complete lines from a byte stream.
///
/// Lines are yielded without their `\n` / `\r\n` terminator and as raw bytes,
/// so a multi-byte character split across network chunks is reassembled
/// before anyone looks at it. A trailing line without a terminator is yielded
/// when the inner stream ends.
pub struct SseLineStream<S> {
    /// The underlying byte stream
    inner: S,
    /// Bytes of the line currently being received
    buffer: BytesMut,
    /// Complete lines ready to be yielded
    lines: VecDeque<Bytes>,
    /// Yielded once `lines` has drained
    pending_error: Option<Error>,
    finished: bool,
}

impl<S> SseLineStream<S> {
    pub fn new(stream: S) -> Self {
        Self {
            inner: stream,
            buffer: BytesMut::new(),
            lines: VecDeque::new(),
            pending_error: None,
            finished: false,
        }
    }

    /// Move every complete line out of the buffer.
    fn split_lines(&mut self) {
        while let Some(pos) = memchr::memchr(b'\n', &self.buffer) {
            let mut line = self.buffer.split_to(pos + 1);
            line.truncate(pos);
            self.lines.push_back(strip_carriage_return(line.freeze()));
        }
    }

    /// Flush whatever is left once the inner stream has ended.
    fn flush_remainder(&mut self) {
        if !self.buffer.is_empty() {
            let rest = self.buffer.split().freeze();
            self.lines.push_back(strip_carriage_return(rest));
        }
    }
}

fn strip_carriage_return(line: Bytes) -> Bytes {
    match line.last() {
        Some(b'\r') => line.slice(..line.len() - 1),
        _ => line,
    }
}

impl<S, E> Stream for SseLineStream<S>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    type Item = Result<Bytes, Error>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            if let Some(line) = self.lines.pop_front() {
                return Poll::Ready(Some(Ok(line)));
            }

            if let Some(err) = self.pending_error.take() {
                return Poll::Ready(Some(Err(err)));
            }

            if self.finished {
                return Poll::Ready(None);
            }

            match ready!(self.inner.poll_next_unpin(cx)) {
                Some(Ok(chunk)) => {
                    self.buffer.extend_from_slice(&chunk);
                    self.split_lines();

                    // Lines completed before the oversized one are still delivered.
                    if self.buffer.len() > MAX_LINE_LENGTH {
                        self.buffer.clear();
                        self.finished = true;
                        self.pending_error =
                            Some(Error::streaming("SSE line exceeded maximum length"));
                    }
                }
                Some(Err(e)) => {
                    self.finished = true;
                    return Poll::Ready(Some(Err(Error::streaming(format!(
                        "Error reading response stream: {}",
                        e.into()
                    )))));
                }
                None => {
                    self.finished = true;
                    self.flush_remainder();
                }
            }
        }
    }
}

/// Extension trait to split byte streams into lines.
pub trait SseLinesExt: Stream {
    fn sse_lines(self) -> SseLineStream<Self>
    where
        Self: Sized,
    {
        SseLineStream::new(self)
    }
}

impl<S: Stream> SseLinesExt for S {}
