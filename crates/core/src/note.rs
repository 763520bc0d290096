//! The note record type shared by every pipeline stage.
//!
//! A [`NoteRecord`] is one scraped post summary. The field set is the wire
//! shape of the intermediate JSON artifacts, so renames here are breaking.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One collected note.
///
/// `title` doubles as the identity key: collection and per-bucket
/// deduplication both treat two records with the same title as the same note.
/// Every other field may be empty when the source markup did not yield it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRecord {
    /// Note title. Non-empty for any record the collector emits.
    pub title: String,

    /// Author display name, possibly empty.
    #[serde(default)]
    pub author: String,

    /// Absolute link to the note, or empty if unresolved.
    #[serde(default)]
    pub link: String,

    /// Raw engagement text ("1.2万" and the like), not guaranteed numeric.
    #[serde(default)]
    pub likes: String,

    /// The search phrase that produced this record.
    #[serde(default)]
    pub query: String,
}

impl NoteRecord {
    /// Creates a record with only a title, all other fields empty.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: String::new(),
            link: String::new(),
            likes: String::new(),
            query: String::new(),
        }
    }
}

/// Keep only the first occurrence of each distinct title, preserving order.
///
/// Idempotent: deduplicating an already-deduplicated sequence returns an
/// identical sequence.
pub fn dedup_by_title(notes: &[NoteRecord]) -> Vec<NoteRecord> {
    let mut seen: HashSet<&str> = HashSet::new();
    notes.iter().filter(|n| seen.insert(n.title.as_str())).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(title: &str) -> NoteRecord {
        NoteRecord::with_title(title)
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let mut second = note("黄山交通攻略");
        second.author = "later author".to_string();
        let notes = vec![note("黄山交通攻略"), note("黄山酒店推荐"), second];

        let deduped = dedup_by_title(&notes);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].title, "黄山交通攻略");
        assert!(deduped[0].author.is_empty());
        assert_eq!(deduped[1].title, "黄山酒店推荐");
    }

    #[test]
    fn test_dedup_is_idempotent() {
        let notes = vec![note("a"), note("b"), note("a"), note("c")];
        let once = dedup_by_title(&notes);
        let twice = dedup_by_title(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_dedup_preserves_order() {
        let notes = vec![note("c"), note("a"), note("b"), note("a")];
        let deduped = dedup_by_title(&notes);
        let titles: Vec<&str> = deduped.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_serde_round_trip_preserves_non_ascii() {
        let mut n = note("黄山美食");
        n.likes = "1.2万".to_string();
        let json = serde_json::to_string(&n).unwrap();
        assert!(json.contains("黄山美食"));
        assert!(json.contains("1.2万"));

        let back: NoteRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, n);
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let back: NoteRecord = serde_json::from_str(r#"{"title":"只有标题"}"#).unwrap();
        assert_eq!(back.title, "只有标题");
        assert!(back.author.is_empty());
        assert!(back.link.is_empty());
    }
}
