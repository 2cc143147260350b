//! Router construction.

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::routes::{ai_search, ai_search_resources, health};
use crate::state::AppState;

/// Build the HTTP application around shared state.
pub fn build_app(state: AppState) -> Router {
    // Browser clients call the API from any origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/ai-search", post(ai_search))
        .route("/ai-search-resources", post(ai_search_resources))
        .route("/health", get(health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
