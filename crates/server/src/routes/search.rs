//! Question answering endpoints.

use axum::{
    body::Body,
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use uxsearch_core::AppError;
use uxsearch_prompt::parse_response;
use uxsearch_resources::ResourcePreview;

use crate::error::ApiError;
use crate::state::AppState;

/// Body of both search endpoints.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub question: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    /// Stream the raw completion as plain text instead of parsed JSON.
    #[serde(default)]
    pub stream: bool,
}

#[derive(Debug, Serialize)]
pub struct ResourcesResponse {
    pub resources: Vec<ResourcePreview>,
}

/// Extract a non-blank question from the request body.
fn require_question(
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<String, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        AppError::InvalidInput(format!("Invalid request body: {}", rejection.body_text()))
    })?;

    match request.question {
        Some(question) if !question.trim().is_empty() => Ok(question),
        _ => Err(AppError::InvalidInput("Question is required".to_string()).into()),
    }
}

/// POST /ai-search
///
/// Answers with `{"answer": ..., "resources": [...]}`, or with the raw
/// completion streamed as `text/plain` when `?stream=true` is given.
///
/// Once streaming has started the status is already sent, so a provider
/// failure mid-stream can only cut the body short. It is logged as a warning.
pub async fn ai_search(
    State(state): State<AppState>,
    query: Result<Query<SearchParams>, QueryRejection>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = query.map_err(|rejection| {
        AppError::InvalidInput(format!("Invalid query string: {}", rejection.body_text()))
    })?;
    let question = require_question(payload)?;
    tracing::info!(stream = params.stream, "Received question");
    tracing::debug!("Question: {}", question);

    let prompt = state.build_prompt(&question)?;

    if params.stream {
        let fragments = state.completer.complete_stream(&prompt).await?;
        let fragments = fragments.inspect(|fragment| {
            if let Err(e) = fragment {
                tracing::warn!(error = %e, "Streamed answer truncated by provider error");
            }
        });

        // Dropping the body on client disconnect drops the provider stream with it
        return Ok((
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            Body::from_stream(fragments),
        )
            .into_response());
    }

    let completion = state.completer.complete(&prompt).await?;
    let parsed = parse_response(&completion);

    tracing::info!(resources = parsed.resources.len(), "Answered question");

    Ok(Json(parsed).into_response())
}

/// POST /ai-search-resources
///
/// Preview of the resources relevant to a question, without a completion.
pub async fn ai_search_resources(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<ResourcesResponse>, ApiError> {
    let question = require_question(payload)?;

    Ok(Json(ResourcesResponse {
        resources: state.preview(&question),
    }))
}
