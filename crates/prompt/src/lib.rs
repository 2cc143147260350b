//! Prompt system for the UXsearch service.
//!
//! This crate owns both ends of the model contract:
//! - Handlebars prompt templates (built in or loaded from YAML)
//! - Composing the question and resource list into a prompt
//! - Parsing the completion back into an answer and recommended links
//!
//! Composer and parser share the section headers in [`contract`].

pub mod builder;
pub mod contract;
pub mod loader;
pub mod response;
pub mod types;

// Re-export main types
pub use builder::{compose_prompt, format_resource_list};
pub use contract::{ANSWER_HEADER, RESOURCES_HEADER};
pub use loader::{load_template, load_template_or_default};
pub use response::parse_response;
pub use types::{ParsedResponse, PromptTemplate, DEFAULT_TEMPLATE_ID};
