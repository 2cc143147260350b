//! Tag-based relevance filtering.
//!
//! A record is relevant when any of its tags occurs as a substring of the
//! lowercased question. Matches keep sheet order and are truncated to the
//! configured maximum. When nothing matches, a random sample of the store is
//! returned instead so the model is never shown zero resources.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::store::ResourceStore;
use crate::types::ResourceRecord;

/// Default cap on resources handed to the model.
pub const DEFAULT_MAX_MATCHES: usize = 50;

/// Resources selected for one question.
#[derive(Debug, Clone)]
pub struct MatchResult<'a> {
    /// Selected records, at most `max_matches` long
    pub records: Vec<&'a ResourceRecord>,

    /// True when no tag matched and `records` is a random sample
    pub fallback: bool,
}

impl<'a> MatchResult<'a> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Selects a bounded subset of the store for a question.
#[derive(Debug, Clone, Copy)]
pub struct RelevanceFilter {
    max_matches: usize,
}

impl Default for RelevanceFilter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_MATCHES)
    }
}

impl RelevanceFilter {
    pub fn new(max_matches: usize) -> Self {
        Self { max_matches }
    }

    pub fn max_matches(&self) -> usize {
        self.max_matches
    }

    /// Filter using the thread-local RNG for the fallback sample.
    pub fn filter<'a>(&self, question: &str, store: &'a ResourceStore) -> MatchResult<'a> {
        self.filter_with_rng(question, store, &mut rand::thread_rng())
    }

    /// Filter with an explicit randomness source for the fallback sample.
    pub fn filter_with_rng<'a, R: Rng + ?Sized>(
        &self,
        question: &str,
        store: &'a ResourceStore,
        rng: &mut R,
    ) -> MatchResult<'a> {
        let question_lower = question.to_lowercase();

        let matched: Vec<&ResourceRecord> = store
            .iter()
            .filter(|record| record.matches(&question_lower))
            .take(self.max_matches)
            .collect();

        if !matched.is_empty() {
            tracing::debug!("Matched {} resources by tag", matched.len());
            return MatchResult {
                records: matched,
                fallback: false,
            };
        }

        let sample_size = self.max_matches.min(store.len());
        let records: Vec<&ResourceRecord> = store
            .records()
            .choose_multiple(rng, sample_size)
            .collect();

        tracing::debug!(
            "No tag matched; falling back to {} random resources",
            records.len()
        );

        MatchResult {
            records,
            fallback: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn record(title: &str, main_tag: &str, sub_tag: &str) -> ResourceRecord {
        ResourceRecord::new(
            title,
            format!("https://example.com/{}", title.to_lowercase()),
            "",
            "",
            main_tag,
            sub_tag,
            "",
        )
    }

    fn store() -> ResourceStore {
        ResourceStore::from_records(vec![
            record("Personas", "Research", "Personas"),
            record("Forms", "UI", "Forms"),
            record("Interviews", "Research", "Interviews"),
            record("Untagged", "", ""),
            record("Color", "Visual Design", "Color"),
        ])
    }

    fn titles(result: &MatchResult<'_>) -> Vec<String> {
        result.records.iter().map(|r| r.title.clone()).collect()
    }

    #[test]
    fn test_matches_preserve_store_order() {
        let store = store();
        let mut rng = StdRng::seed_from_u64(7);
        let result = RelevanceFilter::default().filter_with_rng(
            "How do I run RESEARCH interviews?",
            &store,
            &mut rng,
        );

        assert!(!result.fallback);
        assert_eq!(titles(&result), vec!["Personas", "Interviews"]);
    }

    #[test]
    fn test_substring_match_inside_words() {
        let store = store();
        let mut rng = StdRng::seed_from_u64(7);
        // "ui" occurs inside "build"
        let result =
            RelevanceFilter::default().filter_with_rng("build a checkout", &store, &mut rng);

        assert!(!result.fallback);
        assert_eq!(titles(&result), vec!["Forms"]);
    }

    #[test]
    fn test_matches_truncated_to_max() {
        let records = (0..10)
            .map(|i| record(&format!("R{}", i), "ux", ""))
            .collect();
        let store = ResourceStore::from_records(records);
        let mut rng = StdRng::seed_from_u64(7);

        let result = RelevanceFilter::new(3).filter_with_rng("ux question", &store, &mut rng);
        assert!(!result.fallback);
        assert_eq!(titles(&result), vec!["R0", "R1", "R2"]);
    }

    #[test]
    fn test_fallback_samples_subset_of_store() {
        let store = store();
        let mut rng = StdRng::seed_from_u64(42);
        let result = RelevanceFilter::new(3).filter_with_rng("zzz", &store, &mut rng);

        assert!(result.fallback);
        assert_eq!(result.len(), 3);
        for record in &result.records {
            assert!(store.records().contains(record));
        }

        let mut unique = titles(&result);
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 3);
    }

    #[test]
    fn test_fallback_size_capped_by_store() {
        let store = store();
        let mut rng = StdRng::seed_from_u64(1);
        let result = RelevanceFilter::new(50).filter_with_rng("zzz", &store, &mut rng);

        assert!(result.fallback);
        assert_eq!(result.len(), store.len());
    }

    #[test]
    fn test_fallback_deterministic_with_seed() {
        let store = store();
        let filter = RelevanceFilter::new(2);

        let a = filter.filter_with_rng("zzz", &store, &mut StdRng::seed_from_u64(9));
        let b = filter.filter_with_rng("zzz", &store, &mut StdRng::seed_from_u64(9));
        assert_eq!(titles(&a), titles(&b));
    }

    #[test]
    fn test_empty_store() {
        let store = ResourceStore::default();
        let filter = RelevanceFilter::default();

        let result = filter.filter("research", &store);
        assert!(result.is_empty());
        assert!(result.fallback);
    }

    #[test]
    fn test_zero_max_matches() {
        let store = store();
        let result = RelevanceFilter::new(0).filter("research", &store);
        assert!(result.is_empty());
    }
}
