//! Tag derivation from the worksheet tag columns.

/// Derive match tags from the main-tag and sub-tag cells.
///
/// Both cells are joined with a comma and split on commas; every piece is
/// trimmed and lowercased. Empty pieces are dropped, so blank cells yield
/// an empty tag list.
pub fn derive_tags(main_tag: &str, sub_tag: &str) -> Vec<String> {
    main_tag
        .split(',')
        .chain(sub_tag.split(','))
        .map(|piece| piece.trim().to_lowercase())
        .filter(|tag| !tag.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_tags_splits_and_lowercases() {
        let tags = derive_tags("Research, Usability Testing", "Interviews,Surveys");
        assert_eq!(
            tags,
            vec!["research", "usability testing", "interviews", "surveys"]
        );
    }

    #[test]
    fn test_derive_tags_empty_fields() {
        assert!(derive_tags("", "").is_empty());
        assert!(derive_tags("  ", " , ").is_empty());
    }

    #[test]
    fn test_derive_tags_one_field_only() {
        assert_eq!(derive_tags("", "Accessibility"), vec!["accessibility"]);
        assert_eq!(derive_tags("UI,", ""), vec!["ui"]);
    }

    #[test]
    fn test_derive_tags_keeps_order() {
        let tags = derive_tags("b, a", "c");
        assert_eq!(tags, vec!["b", "a", "c"]);
    }
}
