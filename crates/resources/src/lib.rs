//! Resource catalogue for the UXsearch service.
//!
//! This crate owns the curated resource list:
//! - Loading the worksheet CSV export into an immutable [`ResourceStore`]
//! - Deriving lowercase match tags from the tag columns
//! - Selecting resources relevant to a question ([`RelevanceFilter`])

pub mod filter;
pub mod store;
pub mod tags;
pub mod types;

// Re-export main types
pub use filter::{MatchResult, RelevanceFilter, DEFAULT_MAX_MATCHES};
pub use store::ResourceStore;
pub use tags::derive_tags;
pub use types::{ResourceLink, ResourcePreview, ResourceRecord};
