//! Resource types.

use serde::{Deserialize, Serialize};

use crate::tags::derive_tags;

/// A single recommendable item from the resource worksheet.
///
/// Records are immutable once loaded; `tags` is derived from `main_tag`
/// and `sub_tag` at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRecord {
    pub title: String,
    pub link: String,
    pub category: String,
    pub author: String,
    pub main_tag: String,
    pub sub_tag: String,
    pub summary: String,

    /// Lowercase, trimmed, non-empty match tags
    pub tags: Vec<String>,
}

impl ResourceRecord {
    /// Create a record, deriving its tags.
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        category: impl Into<String>,
        author: impl Into<String>,
        main_tag: impl Into<String>,
        sub_tag: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        let main_tag = main_tag.into();
        let sub_tag = sub_tag.into();
        let tags = derive_tags(&main_tag, &sub_tag);

        Self {
            title: title.into(),
            link: link.into(),
            category: category.into(),
            author: author.into(),
            main_tag,
            sub_tag,
            summary: summary.into(),
            tags,
        }
    }

    /// Whether any tag occurs as a substring of the (already lowercased) question.
    pub fn matches(&self, question_lower: &str) -> bool {
        self.tags
            .iter()
            .any(|tag| question_lower.contains(tag.as_str()))
    }

    /// Project to the preview shape served without a model call.
    pub fn to_preview(&self) -> ResourcePreview {
        ResourcePreview {
            title: self.title.clone(),
            link: self.link.clone(),
            category: self.category.clone(),
            author: self.author.clone(),
        }
    }
}

/// A recommended resource as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLink {
    pub title: String,
    pub link: String,
}

impl ResourceLink {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
        }
    }
}

/// Resource projection with catalogue metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourcePreview {
    pub title: String,
    pub link: String,
    pub category: String,
    pub author: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(main_tag: &str, sub_tag: &str) -> ResourceRecord {
        ResourceRecord::new(
            "Guide",
            "https://example.com/guide",
            "Articles",
            "Jane",
            main_tag,
            sub_tag,
            "",
        )
    }

    #[test]
    fn test_new_derives_tags() {
        let r = record("Research", "Interviews, Personas");
        assert_eq!(r.tags, vec!["research", "interviews", "personas"]);
    }

    #[test]
    fn test_matches_is_substring_based() {
        let r = record("UI", "");
        // "ui" occurs inside "build"
        assert!(r.matches("how do i build a form?"));
        assert!(!r.matches("what is a persona?"));
    }

    #[test]
    fn test_untagged_record_never_matches() {
        let r = record("", "");
        assert!(!r.matches("anything at all"));
    }

    #[test]
    fn test_preview_projection() {
        let r = record("ux", "");
        let preview = r.to_preview();
        assert_eq!(preview.category, "Articles");
        assert_eq!(preview.author, "Jane");

        let json = serde_json::to_value(&preview).unwrap();
        assert_eq!(json["title"], "Guide");
        assert!(json.get("summary").is_none());
    }
}
