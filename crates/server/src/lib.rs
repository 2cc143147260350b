//! UXsearch HTTP service.
//!
//! Answers UX questions by selecting relevant entries from the curated
//! resource sheet, asking a language model with them as context and
//! returning the parsed answer (or the raw completion as a text stream).

pub mod app;
pub mod error;
pub mod routes;
pub mod state;

pub use app::build_app;
pub use error::ApiError;
pub use state::AppState;
