//! Loading prompt templates from YAML files.

use crate::contract::{template_honours_contract, ANSWER_HEADER, RESOURCES_HEADER};
use crate::types::PromptTemplate;
use std::path::Path;
use uxsearch_core::{AppError, AppResult};

/// Load a prompt template from a YAML file.
///
/// The file carries `id`, `title`, `apiVersion` and `template`. The template
/// must emit both response section headers so that completions stay parseable.
///
/// # Example
/// ```no_run
/// use uxsearch_prompt::load_template;
/// use std::path::Path;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let template = load_template(Path::new("prompts/answer.yml"))?;
/// println!("Loaded template: {}", template.title);
/// # Ok(())
/// # }
/// ```
pub fn load_template(path: &Path) -> AppResult<PromptTemplate> {
    tracing::debug!("Loading prompt template from: {:?}", path);

    if !path.exists() {
        return Err(AppError::Prompt(format!(
            "Prompt file not found: {:?}",
            path
        )));
    }

    let contents = std::fs::read_to_string(path).map_err(|e| {
        AppError::Prompt(format!("Failed to read prompt file {:?}: {}", path, e))
    })?;

    let template: PromptTemplate = serde_yaml::from_str(&contents).map_err(|e| {
        AppError::Prompt(format!("Failed to parse prompt YAML {:?}: {}", path, e))
    })?;

    validate_template(&template)?;

    tracing::info!("Loaded prompt template: {} ({})", template.id, template.title);

    Ok(template)
}

/// Load the template at `path`, or the built-in one when no path is given.
pub fn load_template_or_default(path: Option<&Path>) -> AppResult<PromptTemplate> {
    match path {
        Some(path) => load_template(path),
        None => Ok(PromptTemplate::default()),
    }
}

/// Validate a prompt template.
fn validate_template(template: &PromptTemplate) -> AppResult<()> {
    if template.id.is_empty() {
        return Err(AppError::Prompt("Prompt ID cannot be empty".to_string()));
    }

    if template.title.is_empty() {
        return Err(AppError::Prompt("Prompt title cannot be empty".to_string()));
    }

    if template.template.is_empty() {
        return Err(AppError::Prompt(
            "Prompt template cannot be empty".to_string(),
        ));
    }

    if !template.api_version.contains('.') {
        return Err(AppError::Prompt(format!(
            "Invalid apiVersion format: {}. Expected format: 'x.y'",
            template.api_version
        )));
    }

    if !template_honours_contract(&template.template) {
        return Err(AppError::Prompt(format!(
            "Prompt template {} must contain '{}' followed by '{}'",
            template.id, ANSWER_HEADER, RESOURCES_HEADER
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_template(dir: &Path, name: &str, template: &str) -> PathBuf {
        let content = format!(
            r#"
id: test.answer
title: "Test Template"
apiVersion: "1.0"
template: "{}"
"#,
            template
        );

        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_valid_template() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_template(
            temp_dir.path(),
            "answer.yml",
            r"{{question}}\nAnswer:\nRecommended Resources:\n{{resources}}",
        );

        let template = load_template(&path).unwrap();
        assert_eq!(template.id, "test.answer");
        assert_eq!(template.title, "Test Template");
    }

    #[test]
    fn test_load_nonexistent_template() {
        let result = load_template(Path::new("/nonexistent/answer.yml"));
        assert!(matches!(result, Err(AppError::Prompt(_))));
    }

    #[test]
    fn test_load_invalid_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("invalid.yml");
        fs::write(&path, "invalid: yaml: content:").unwrap();

        assert!(load_template(&path).is_err());
    }

    #[test]
    fn test_template_without_headers_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_template(temp_dir.path(), "bare.yml", "Just answer: {{question}}");

        let err = load_template(&path).unwrap_err();
        assert!(err.to_string().contains("Recommended Resources:"));
    }

    #[test]
    fn test_bad_api_version_rejected() {
        let template = PromptTemplate {
            api_version: "1".to_string(),
            ..PromptTemplate::default()
        };
        assert!(validate_template(&template).is_err());
    }

    #[test]
    fn test_default_when_no_path() {
        let template = load_template_or_default(None).unwrap();
        assert_eq!(template.id, crate::types::DEFAULT_TEMPLATE_ID);
    }
}
