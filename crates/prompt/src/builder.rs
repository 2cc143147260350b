//! Prompt composer: renders the question and selected resources into a template.

use crate::types::PromptTemplate;
use handlebars::Handlebars;
use std::collections::HashMap;
use uxsearch_core::{AppError, AppResult};
use uxsearch_resources::ResourceRecord;

/// Render one resource as a prompt line.
fn format_resource_line(record: &ResourceRecord) -> String {
    format!("- {} → {}", record.title, record.link)
}

/// Render the resource list, one line per resource.
pub fn format_resource_list(resources: &[&ResourceRecord]) -> String {
    resources
        .iter()
        .map(|record| format_resource_line(record))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Compose the completion prompt for a question.
///
/// # Example
/// ```
/// use uxsearch_prompt::{compose_prompt, PromptTemplate};
/// use uxsearch_resources::ResourceRecord;
///
/// let record = ResourceRecord::new("Personas", "https://example.com", "", "", "research", "", "");
/// let prompt = compose_prompt(&PromptTemplate::default(), "What is a persona?", &[&record]).unwrap();
/// assert!(prompt.contains("- Personas → https://example.com"));
/// ```
pub fn compose_prompt(
    template: &PromptTemplate,
    question: &str,
    resources: &[&ResourceRecord],
) -> AppResult<String> {
    tracing::debug!(
        "Composing prompt {} with {} resources",
        template.id,
        resources.len()
    );

    let mut variables = HashMap::new();
    variables.insert("question", question.to_string());
    variables.insert("resources", format_resource_list(resources));

    render_template(&template.template, &variables)
}

/// Render a Handlebars template with variables.
fn render_template(template: &str, variables: &HashMap<&str, String>) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // Plain text prompt, never HTML
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string("prompt", template)
        .map_err(|e| AppError::Prompt(format!("Failed to register template: {}", e)))?;

    handlebars
        .render("prompt", variables)
        .map_err(|e| AppError::Prompt(format!("Failed to render template: {}", e)))
}
