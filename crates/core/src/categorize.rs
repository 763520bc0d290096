//! Keyword-based multi-label categorization of collected notes.
//!
//! [`categorize`] is pure and deterministic: the same notes and keyword map
//! always produce the same buckets in the same order. Downstream stages rely
//! on that for reproducible reports.

use indexmap::IndexMap;

use crate::keywords::{KeywordConfig, UNCATEGORIZED};
use crate::note::{NoteRecord, dedup_by_title};

/// Category label -> ordered notes, insertion order = collection order.
pub type Buckets = IndexMap<String, Vec<NoteRecord>>;

/// Assigns every note to the buckets whose keywords match its title.
///
/// A category matches when any of its keywords occurs as a substring of the
/// case-normalized title. Notes may land in several buckets; notes matching
/// nothing land in the reserved [`UNCATEGORIZED`] bucket. Every configured
/// category is present in the result even when empty, so an empty input yields
/// a full map of empty buckets.
///
/// Duplicate titles are removed per bucket afterwards, first occurrence wins.
pub fn categorize(notes: &[NoteRecord], config: &KeywordConfig) -> Buckets {
    let mut buckets: Buckets =
        config.categories.keys().map(|label| (label.clone(), Vec::new())).collect();
    buckets.insert(UNCATEGORIZED.to_string(), Vec::new());

    for note in notes {
        let title = note.title.to_lowercase();
        let mut matched = false;

        for (label, keywords) in &config.categories {
            if keywords.iter().any(|k| title.contains(&k.to_lowercase())) {
                buckets[label].push(note.clone());
                matched = true;
            }
        }

        if !matched {
            buckets[UNCATEGORIZED].push(note.clone());
        }
    }

    for notes in buckets.values_mut() {
        *notes = dedup_by_title(notes);
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(title: &str) -> NoteRecord {
        NoteRecord::with_title(title)
    }

    fn two_category_config() -> KeywordConfig {
        let mut categories = IndexMap::new();
        categories.insert("交通".to_string(), vec!["交通".to_string()]);
        categories.insert("住宿".to_string(), vec!["酒店".to_string()]);
        KeywordConfig { categories, search_templates: Vec::new() }
    }

    #[test]
    fn test_end_to_end_scenario() {
        let config = two_category_config();
        let notes = vec![note("黄山交通攻略"), note("黄山酒店推荐"), note("黄山美食")];

        let buckets = categorize(&notes, &config);

        assert_eq!(buckets["交通"], vec![note("黄山交通攻略")]);
        assert_eq!(buckets["住宿"], vec![note("黄山酒店推荐")]);
        assert_eq!(buckets[UNCATEGORIZED], vec![note("黄山美食")]);
    }

    #[test]
    fn test_empty_input_initializes_all_buckets() {
        let config = two_category_config();
        let buckets = categorize(&[], &config);

        assert_eq!(buckets.len(), 3);
        assert!(buckets["交通"].is_empty());
        assert!(buckets["住宿"].is_empty());
        assert!(buckets[UNCATEGORIZED].is_empty());
    }

    #[test]
    fn test_multi_label_note_appears_in_both_and_nowhere_else() {
        let config = two_category_config();
        let notes = vec![note("黄山交通加酒店一日游")];

        let buckets = categorize(&notes, &config);

        assert_eq!(buckets["交通"].len(), 1);
        assert_eq!(buckets["住宿"].len(), 1);
        assert!(buckets[UNCATEGORIZED].is_empty());
    }

    #[test]
    fn test_unmatched_note_lands_only_in_uncategorized() {
        let config = two_category_config();
        let buckets = categorize(&[note("黄山日出照片")], &config);

        assert!(buckets["交通"].is_empty());
        assert!(buckets["住宿"].is_empty());
        assert_eq!(buckets[UNCATEGORIZED].len(), 1);
    }

    #[test]
    fn test_matching_is_case_normalized() {
        let mut categories = IndexMap::new();
        categories.insert("住宿".to_string(), vec!["Hotel".to_string()]);
        let config = KeywordConfig { categories, search_templates: Vec::new() };

        let buckets = categorize(&[note("HOTEL deals in 黄山")], &config);
        assert_eq!(buckets["住宿"].len(), 1);
    }

    #[test]
    fn test_deterministic() {
        let config = KeywordConfig::default();
        let notes =
            vec![note("黄山交通攻略"), note("黄山酒店推荐"), note("黄山美食"), note("黄山交通攻略")];

        let first = categorize(&notes, &config);
        let second = categorize(&notes, &config);

        assert_eq!(first, second);
        let first_labels: Vec<&String> = first.keys().collect();
        let second_labels: Vec<&String> = second.keys().collect();
        assert_eq!(first_labels, second_labels);
    }

    #[test]
    fn test_per_bucket_dedup_keeps_first() {
        let config = two_category_config();
        let mut dup = note("黄山交通攻略");
        dup.author = "second".to_string();
        let notes = vec![note("黄山交通攻略"), dup, note("另一条交通线路")];

        let buckets = categorize(&notes, &config);
        assert_eq!(buckets["交通"].len(), 2);
        assert!(buckets["交通"][0].author.is_empty());
    }

    #[test]
    fn test_categorize_is_idempotent_over_dedup() {
        let config = two_category_config();
        let notes = vec![note("黄山交通攻略"), note("黄山交通攻略")];

        let buckets = categorize(&notes, &config);
        let again = categorize(&buckets["交通"], &config);
        assert_eq!(buckets["交通"], again["交通"]);
    }
}
