//! Scripted in-memory provider for tests and offline development.

use crate::client::{LlmClient, LlmRequest, LlmResponse, LlmStream, LlmStreamChunk, LlmUsage};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use uxsearch_core::{AppError, AppResult};

/// Provider that replays a fixed completion.
///
/// `complete` returns the fragments joined; `stream` yields them one by one,
/// interleaved with empty control chunks the way hosted providers send them.
/// Every request is recorded for inspection.
#[derive(Debug, Default)]
pub struct ScriptedClient {
    fragments: Vec<String>,
    failure: Option<String>,
    stream_failure: Option<String>,
    calls: AtomicUsize,
    requests: Mutex<Vec<LlmRequest>>,
}

impl ScriptedClient {
    /// Replay `text` as a single fragment.
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_fragments(vec![text.into()])
    }

    /// Replay the given fragments.
    pub fn with_fragments<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fragments: fragments.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Fail every call with the given provider message.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    /// End the stream with the given error instead of the done marker.
    pub fn with_stream_error(mut self, message: impl Into<String>) -> Self {
        self.stream_failure = Some(message.into());
        self
    }

    /// Number of provider calls made.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<LlmRequest> {
        self.requests
            .lock()
            .expect("scripted request log poisoned")
            .clone()
    }

    fn record(&self, request: &LlmRequest) -> AppResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .expect("scripted request log poisoned")
            .push(request.clone());

        match self.failure {
            Some(ref message) => Err(AppError::Llm(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl LlmClient for ScriptedClient {
    fn provider_name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
        self.record(request)?;

        let content = self.fragments.concat();
        Ok(LlmResponse {
            usage: LlmUsage::new(0, self.fragments.len() as u32),
            content,
            model: request.model.clone(),
        })
    }

    async fn stream(&self, request: &LlmRequest) -> AppResult<LlmStream> {
        self.record(request)?;

        let mut chunks: Vec<AppResult<LlmStreamChunk>> = vec![Ok(LlmStreamChunk::text(""))];
        for fragment in &self.fragments {
            chunks.push(Ok(LlmStreamChunk::text(fragment.clone())));
        }
        chunks.push(match self.stream_failure {
            Some(ref message) => Err(AppError::Llm(message.clone())),
            None => Ok(LlmStreamChunk::done()),
        });

        Ok(Box::pin(futures::stream::iter(chunks)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[tokio::test]
    async fn test_complete_joins_fragments() {
        let client = ScriptedClient::with_fragments(["Answer: ", "hi"]);
        let response = client
            .complete(&LlmRequest::new("q", "model"))
            .await
            .unwrap();

        assert_eq!(response.content, "Answer: hi");
        assert_eq!(client.calls(), 1);
        assert_eq!(client.requests()[0].prompt, "q");
    }

    #[tokio::test]
    async fn test_stream_interleaves_control_chunks() {
        let client = ScriptedClient::with_fragments(["a", "b"]);
        let chunks: Vec<LlmStreamChunk> = client
            .stream(&LlmRequest::new("q", "model"))
            .await
            .unwrap()
            .map(|c| c.unwrap())
            .collect()
            .await;

        assert_eq!(chunks.len(), 4);
        assert!(chunks[0].content.is_empty());
        assert!(chunks[3].done);
    }

    #[tokio::test]
    async fn test_stream_error_replaces_done_marker() {
        let client = ScriptedClient::with_fragments(["a"]).with_stream_error("connection reset");
        let chunks: Vec<AppResult<LlmStreamChunk>> = client
            .stream(&LlmRequest::new("q", "model"))
            .await
            .unwrap()
            .collect()
            .await;

        assert_eq!(chunks.len(), 3);
        assert!(matches!(chunks[2], Err(AppError::Llm(ref m)) if m == "connection reset"));
    }

    #[tokio::test]
    async fn test_failing_client() {
        let client = ScriptedClient::failing("quota exceeded");
        let result = client.complete(&LlmRequest::new("q", "model")).await;

        assert!(matches!(result, Err(AppError::Llm(ref m)) if m == "quota exceeded"));
        assert_eq!(client.calls(), 1);
    }
}
