//! Text completion facade over an [`LlmClient`].
//!
//! Request handlers only deal in prompt text in and generated text out,
//! either as one block or as an incremental stream of fragments.

use crate::client::{LlmClient, LlmRequest, LlmStream};
use futures::{Stream, StreamExt};
use std::pin::Pin;
use std::sync::Arc;
use uxsearch_core::AppResult;

/// Lazy, finite stream of generated text fragments.
///
/// Fragments are never empty. The stream ends at the provider's done marker,
/// or right after the first error.
pub type TextStream = Pin<Box<dyn Stream<Item = AppResult<String>> + Send>>;

/// Completion client bound to one model and output bound.
pub struct Completer {
    client: Arc<dyn LlmClient>,
    model: String,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
}

impl Completer {
    pub fn new(client: Arc<dyn LlmClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
            max_tokens: None,
            temperature: None,
        }
    }

    /// Bound the generated output length.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn provider_name(&self) -> &str {
        self.client.provider_name()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn request(&self, prompt: &str) -> LlmRequest {
        let mut request = LlmRequest::new(prompt, &self.model);
        if let Some(max_tokens) = self.max_tokens {
            request = request.with_max_tokens(max_tokens);
        }
        if let Some(temperature) = self.temperature {
            request = request.with_temperature(temperature);
        }
        request
    }

    /// Generate the full completion for a prompt in one call.
    pub async fn complete(&self, prompt: &str) -> AppResult<String> {
        let response = self.client.complete(&self.request(prompt)).await?;

        tracing::debug!(
            "Completion from {} ({} bytes, {} tokens)",
            response.model,
            response.content.len(),
            response.usage.total_tokens
        );

        Ok(response.content)
    }

    /// Start a streaming completion for a prompt.
    ///
    /// Connection failures surface here; failures mid-stream surface as the
    /// final item of the returned stream.
    pub async fn complete_stream(&self, prompt: &str) -> AppResult<TextStream> {
        let request = self.request(prompt).with_streaming();
        let chunks = self.client.stream(&request).await?;
        Ok(text_fragments(chunks))
    }
}

/// Reduce provider chunks to non-empty text fragments.
fn text_fragments(chunks: LlmStream) -> TextStream {
    let stream = futures::stream::unfold(Some(chunks), |state| async move {
        let mut chunks = match state {
            Some(chunks) => chunks,
            None => return None,
        };
        loop {
            match chunks.next().await {
                None => {
                    tracing::debug!("Completion stream closed by provider");
                    return None;
                }
                Some(Err(e)) => {
                    tracing::warn!("Completion stream failed: {}", e);
                    return Some((Err(e), None));
                }
                Some(Ok(chunk)) if chunk.done => {
                    tracing::debug!("Completion stream finished");
                    if chunk.content.is_empty() {
                        return None;
                    }
                    return Some((Ok(chunk.content), None));
                }
                Some(Ok(chunk)) if chunk.content.is_empty() => continue,
                Some(Ok(chunk)) => return Some((Ok(chunk.content), Some(chunks))),
            }
        }
    });

    Box::pin(stream)
}
