//! Prompt types for the UXsearch service.

use serde::{Deserialize, Serialize};
use uxsearch_resources::ResourceLink;

use crate::contract::{ANSWER_HEADER, LINK_SEPARATOR, RESOURCES_HEADER};

/// Identifier of the built-in template.
pub const DEFAULT_TEMPLATE_ID: &str = "uxsearch.answer.default";

/// A prompt template, built in or loaded from YAML.
///
/// `template` is a Handlebars string rendered with two variables:
/// `question` and `resources` (one `- title → link` line per resource).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptTemplate {
    /// Unique template identifier
    pub id: String,

    /// Human-readable title
    pub title: String,

    /// API version for schema evolution
    #[serde(rename = "apiVersion")]
    pub api_version: String,

    /// Template string with Handlebars syntax
    pub template: String,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        let template = format!(
            r#"You are a UX assistant. A user has asked the following question:

"{{{{question}}}}"

Please do the following:
1. Provide a thoughtful, useful answer to the question (3-5 sentences).
2. Recommend the most relevant UX/Product resources from the following list:

Resources:
{{{{resources}}}}

Format output like this:
{answer}
[Your answer here]

{resources}
1. [Title]{sep}[Link]
2. [Title]{sep}[Link]
...
"#,
            answer = ANSWER_HEADER,
            resources = RESOURCES_HEADER,
            sep = LINK_SEPARATOR,
        );

        Self {
            id: DEFAULT_TEMPLATE_ID.to_string(),
            title: "Answer with recommended resources".to_string(),
            api_version: "1.0".to_string(),
            template,
        }
    }
}

/// Structured answer extracted from a completion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedResponse {
    pub answer: String,
    pub resources: Vec<ResourceLink>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::template_honours_contract;

    #[test]
    fn test_default_template_honours_contract() {
        let template = PromptTemplate::default();
        assert!(template_honours_contract(&template.template));
        assert!(template.template.contains("{{question}}"));
        assert!(template.template.contains("{{resources}}"));
        assert!(template.template.contains("1. [Title] - [Link]"));
    }

    #[test]
    fn test_template_deserialization() {
        let yaml = r#"
id: custom.answer
title: Custom
apiVersion: "1.1"
template: "Q: {{question}}\nAnswer:\nRecommended Resources:\n{{resources}}"
"#;

        let template: PromptTemplate = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(template.id, "custom.answer");
        assert_eq!(template.api_version, "1.1");
    }

    #[test]
    fn test_parsed_response_serialization() {
        let parsed = ParsedResponse {
            answer: "X".to_string(),
            resources: vec![ResourceLink::new("Foo", "http://a")],
        };

        let json = serde_json::to_value(&parsed).unwrap();
        assert_eq!(json["answer"], "X");
        assert_eq!(json["resources"][0]["title"], "Foo");
        assert_eq!(json["resources"][0]["link"], "http://a");
    }
}
