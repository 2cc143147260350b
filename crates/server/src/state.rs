//! Shared, read-only request state.

use std::sync::Arc;

use uxsearch_core::config::MAX_PREVIEW_LIMIT;
use uxsearch_core::AppResult;
use uxsearch_llm::Completer;
use uxsearch_prompt::{compose_prompt, PromptTemplate};
use uxsearch_resources::{
    RelevanceFilter, ResourcePreview, ResourceStore, DEFAULT_MAX_MATCHES,
};

/// State cloned into every request handler.
///
/// Everything behind the `Arc`s is built once at startup and never mutated.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ResourceStore>,
    pub completer: Arc<Completer>,
    pub template: Arc<PromptTemplate>,
    pub max_matches: usize,
    pub preview_limit: usize,
}

impl AppState {
    pub fn new(store: ResourceStore, completer: Completer, template: PromptTemplate) -> Self {
        Self {
            store: Arc::new(store),
            completer: Arc::new(completer),
            template: Arc::new(template),
            max_matches: DEFAULT_MAX_MATCHES,
            preview_limit: MAX_PREVIEW_LIMIT,
        }
    }

    /// Set the per-question resource caps. The preview cap never exceeds 5.
    pub fn with_limits(mut self, max_matches: usize, preview_limit: usize) -> Self {
        self.max_matches = max_matches;
        self.preview_limit = preview_limit.min(MAX_PREVIEW_LIMIT);
        self
    }

    /// Select resources for a question and render the completion prompt.
    pub fn build_prompt(&self, question: &str) -> AppResult<String> {
        let matches = RelevanceFilter::new(self.max_matches).filter(question, &self.store);

        tracing::info!(
            resources = matches.len(),
            fallback = matches.fallback,
            "Selected resources for question"
        );

        compose_prompt(&self.template, question, &matches.records)
    }

    /// Resources relevant to a question, projected for preview.
    pub fn preview(&self, question: &str) -> Vec<ResourcePreview> {
        let matches = RelevanceFilter::new(self.preview_limit).filter(question, &self.store);

        tracing::info!(
            resources = matches.len(),
            fallback = matches.fallback,
            "Selected resources for preview"
        );

        matches.records.iter().map(|r| r.to_preview()).collect()
    }
}
