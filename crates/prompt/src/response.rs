//! Response parser: extracts the answer and recommended links from a completion.

use crate::contract::{ANSWER_HEADER, LINK_SEPARATOR, RESOURCES_HEADER};
use crate::types::ParsedResponse;
use uxsearch_resources::ResourceLink;

/// Parse a completion into an answer and a list of recommended resources.
///
/// The text between the answer header and the resources header becomes the
/// answer. Every following line containing `" - "` becomes a title/link pair;
/// numbering like `"1. "` is stripped from the title. Other lines are dropped.
///
/// If either header is missing (or they appear out of order) the whole
/// completion is discarded and an empty response is returned.
///
/// # Example
/// ```
/// use uxsearch_prompt::parse_response;
///
/// let parsed = parse_response("Answer: X\nRecommended Resources:\n1. Foo - http://a");
/// assert_eq!(parsed.answer, "X");
/// assert_eq!(parsed.resources[0].link, "http://a");
/// ```
pub fn parse_response(raw: &str) -> ParsedResponse {
    let Some((answer, resources)) = split_sections(raw) else {
        tracing::warn!(
            "Completion is missing '{}' or '{}'; discarding {} bytes",
            ANSWER_HEADER,
            RESOURCES_HEADER,
            raw.len()
        );
        return ParsedResponse::default();
    };

    ParsedResponse {
        answer: answer.trim().to_string(),
        resources: resources.trim().lines().filter_map(parse_link_line).collect(),
    }
}

/// Split into (answer section, resources section).
fn split_sections(raw: &str) -> Option<(&str, &str)> {
    let answer_start = raw.find(ANSWER_HEADER)? + ANSWER_HEADER.len();
    let rest = &raw[answer_start..];

    let resources_at = rest.find(RESOURCES_HEADER)?;
    let answer = &rest[..resources_at];
    let resources = &rest[resources_at + RESOURCES_HEADER.len()..];

    Some((answer, resources))
}

/// Parse `"1. Title - link"` into a title/link pair.
fn parse_link_line(line: &str) -> Option<ResourceLink> {
    let (title, link) = line.split_once(LINK_SEPARATOR)?;

    let title = title
        .trim_start_matches(|c: char| c.is_ascii_digit() || c == '.' || c == ' ')
        .trim();

    Some(ResourceLink::new(title, link.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed_response() {
        let parsed = parse_response(
            "Answer: X\nRecommended Resources:\n1. Foo - http://a\n2. Bar - http://b",
        );

        assert_eq!(parsed.answer, "X");
        assert_eq!(
            parsed.resources,
            vec![
                ResourceLink::new("Foo", "http://a"),
                ResourceLink::new("Bar", "http://b"),
            ]
        );
    }

    #[test]
    fn test_parse_without_markers() {
        assert_eq!(parse_response("no markers here"), ParsedResponse::default());
    }

    #[test]
    fn test_parse_with_only_answer_marker() {
        let parsed = parse_response("Answer: something useful");
        assert_eq!(parsed.answer, "");
        assert!(parsed.resources.is_empty());
    }

    #[test]
    fn test_parse_markers_out_of_order() {
        let parsed = parse_response("Recommended Resources:\n1. Foo - http://a\nAnswer: late");
        assert_eq!(parsed, ParsedResponse::default());
    }

    #[test]
    fn test_malformed_lines_dropped() {
        let parsed = parse_response(
            "Answer:\nMulti-line\nanswer text.\n\nRecommended Resources:\n\
             1. Foo - http://a\n\
             Some commentary without a separator\n\
             2. Bar-http://b\n\
             3. Baz - http://c",
        );

        assert_eq!(parsed.answer, "Multi-line\nanswer text.");
        assert_eq!(
            parsed.resources,
            vec![
                ResourceLink::new("Foo", "http://a"),
                ResourceLink::new("Baz", "http://c"),
            ]
        );
    }

    #[test]
    fn test_split_on_first_separator_only() {
        let parsed = parse_response(
            "Answer: ok\nRecommended Resources:\n1. UX - The Basics - https://x.io/a-b",
        );

        assert_eq!(
            parsed.resources,
            vec![ResourceLink::new("UX", "The Basics - https://x.io/a-b")]
        );
    }

    #[test]
    fn test_numbering_stripped_from_title() {
        let parsed = parse_response(
            "Answer: ok\nRecommended Resources:\n10. Heuristics - http://h\n- Dash - http://d",
        );

        assert_eq!(parsed.resources[0].title, "Heuristics");
        // Leading dash is not numbering and is kept
        assert_eq!(parsed.resources[1].title, "- Dash");
    }

    #[test]
    fn test_empty_resources_section() {
        let parsed = parse_response("Answer: just this\nRecommended Resources:");
        assert_eq!(parsed.answer, "just this");
        assert!(parsed.resources.is_empty());
    }
}
