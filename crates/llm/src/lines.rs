//! Line framing for streamed HTTP bodies.
//!
//! Providers stream newline-delimited payloads (SSE for OpenAI, NDJSON for
//! Ollama). Network chunks do not respect line or UTF-8 boundaries, so bytes
//! are buffered until a full line is available.

use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};
use uxsearch_core::{AppError, AppResult};

type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, reqwest::Error>> + Send>>;

/// Stream adapter yielding complete, trimmed, non-empty lines.
pub struct LineStream {
    inner: ByteStream,
    buffer: Vec<u8>,
    finished: bool,
}

impl LineStream {
    pub fn new(
        byte_stream: impl Stream<Item = Result<Bytes, reqwest::Error>> + Send + 'static,
    ) -> Self {
        Self {
            inner: Box::pin(byte_stream),
            buffer: Vec::new(),
            finished: false,
        }
    }

    /// Pop the next complete line from the buffer.
    fn next_line(&mut self) -> Option<AppResult<String>> {
        while let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
            let raw: Vec<u8> = self.buffer.drain(..=pos).collect();
            if let Some(line) = decode_line(&raw[..raw.len() - 1]) {
                return Some(line);
            }
        }
        None
    }

    /// Flush a trailing line that had no newline.
    fn take_remainder(&mut self) -> Option<AppResult<String>> {
        let raw = std::mem::take(&mut self.buffer);
        decode_line(&raw)
    }
}

fn decode_line(raw: &[u8]) -> Option<AppResult<String>> {
    match std::str::from_utf8(raw) {
        Ok(text) => {
            let text = text.trim();
            (!text.is_empty()).then(|| Ok(text.to_string()))
        }
        Err(e) => Some(Err(AppError::Llm(format!(
            "Invalid UTF-8 in stream: {}",
            e
        )))),
    }
}

impl Stream for LineStream {
    type Item = AppResult<String>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            if let Some(line) = this.next_line() {
                return Poll::Ready(Some(line));
            }

            if this.finished {
                return Poll::Ready(None);
            }

            match this.inner.as_mut().poll_next(cx) {
                Poll::Ready(Some(Ok(bytes))) => this.buffer.extend_from_slice(&bytes),
                Poll::Ready(Some(Err(e))) => {
                    this.finished = true;
                    this.buffer.clear();
                    return Poll::Ready(Some(Err(AppError::Llm(format!("Stream error: {}", e)))));
                }
                Poll::Ready(None) => {
                    this.finished = true;
                    return Poll::Ready(this.take_remainder());
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    fn byte_stream(parts: &[&[u8]]) -> LineStream {
        let items: Vec<Result<Bytes, reqwest::Error>> = parts
            .iter()
            .map(|p| Ok(Bytes::copy_from_slice(p)))
            .collect();
        LineStream::new(futures::stream::iter(items))
    }

    #[tokio::test]
    async fn test_lines_split_across_chunks() {
        let stream = byte_stream(&[b"data: hel", b"lo\n\ndata: wor", b"ld\n"]);
        let lines: Vec<String> = stream.map(|l| l.unwrap()).collect().await;
        assert_eq!(lines, vec!["data: hello", "data: world"]);
    }

    #[tokio::test]
    async fn test_multibyte_char_split_across_chunks() {
        // "→" is three bytes: e2 86 92
        let stream = byte_stream(&[b"a \xe2\x86", b"\x92 b\n"]);
        let lines: Vec<String> = stream.map(|l| l.unwrap()).collect().await;
        assert_eq!(lines, vec!["a → b"]);
    }

    #[tokio::test]
    async fn test_trailing_line_without_newline() {
        let stream = byte_stream(&[b"first\nsecond"]);
        let lines: Vec<String> = stream.map(|l| l.unwrap()).collect().await;
        assert_eq!(lines, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_llm_error() {
        let mut stream = byte_stream(&[b"\xff\xfe\n"]);
        let first = stream.next().await.unwrap();
        assert!(matches!(first, Err(AppError::Llm(_))));
    }
}
