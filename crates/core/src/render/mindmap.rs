//! Mermaid mindmap outline generation.
//!
//! The outline has a root node, one child per non-empty category, and up to
//! [`MAX_LEAVES`] note titles per category. Leaf text is sanitized so titles
//! cannot break the mindmap syntax: quotes, brackets, and parentheses become
//! full-width equivalents, newlines collapse to spaces, and long titles are
//! truncated.

use crate::categorize::Buckets;
use crate::render::category_icon;

/// Leaf entries rendered per category.
pub const MAX_LEAVES: usize = 5;

/// Maximum rendered label length in characters, ellipsis included.
pub const MAX_LABEL_CHARS: usize = 40;

const ELLIPSIS: &str = "...";

/// Replaces syntax-breaking characters and truncates overlong text.
///
/// Counts characters, not bytes, so CJK titles truncate correctly. The result
/// is at most [`MAX_LABEL_CHARS`] characters including the ellipsis.
pub fn sanitize_label(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .map(|c| match c {
            '"' => '\'',
            '(' => '（',
            ')' => '）',
            '[' => '【',
            ']' => '】',
            '\n' | '\r' => ' ',
            other => other,
        })
        .collect();

    if cleaned.chars().count() > MAX_LABEL_CHARS {
        let kept: String = cleaned.chars().take(MAX_LABEL_CHARS - ELLIPSIS.len()).collect();
        format!("{kept}{ELLIPSIS}")
    } else {
        cleaned
    }
}

/// Builds the Mermaid mindmap for the given buckets.
///
/// Empty categories are omitted entirely; category order follows the bucket
/// map's order.
pub fn build_mindmap(buckets: &Buckets, root_label: &str) -> String {
    let mut lines = vec!["mindmap".to_string()];
    lines.push(format!("  root(({}))", sanitize_label(root_label)));

    for (label, notes) in buckets {
        if notes.is_empty() {
            continue;
        }

        lines.push(format!("    {} {}", category_icon(label), label));
        for note in notes.iter().take(MAX_LEAVES) {
            lines.push(format!("      {}", sanitize_label(&note.title)));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keywords::UNCATEGORIZED;
    use crate::note::NoteRecord;
    use indexmap::IndexMap;
    use rstest::rstest;

    fn buckets_with(label: &str, titles: &[&str]) -> Buckets {
        let mut buckets = IndexMap::new();
        buckets.insert(
            label.to_string(),
            titles.iter().map(|t| NoteRecord::with_title(*t)).collect(),
        );
        buckets
    }

    #[rstest]
    #[case('"')]
    #[case('(')]
    #[case(')')]
    #[case('[')]
    #[case(']')]
    fn test_sanitize_removes_raw_character(#[case] c: char) {
        let sanitized = sanitize_label(&format!("标题{c}结尾"));
        assert!(!sanitized.contains(c), "raw {c:?} survived: {sanitized}");
    }

    #[test]
    fn test_sanitize_collapses_newlines() {
        assert_eq!(sanitize_label("第一行\n第二行"), "第一行 第二行");
    }

    #[test]
    fn test_sanitize_truncates_to_forty_chars_total() {
        let long: String = "字".repeat(50);
        let sanitized = sanitize_label(&long);
        assert_eq!(sanitized.chars().count(), 40);
        assert!(sanitized.ends_with("..."));
    }

    #[test]
    fn test_sanitize_leaves_short_text_alone() {
        assert_eq!(sanitize_label("黄山交通攻略"), "黄山交通攻略");
    }

    #[test]
    fn test_mindmap_structure() {
        let buckets = buckets_with("交通", &["黄山交通攻略", "高铁换乘"]);
        let mindmap = build_mindmap(&buckets, "黄山攻略");

        let lines: Vec<&str> = mindmap.lines().collect();
        assert_eq!(lines[0], "mindmap");
        assert_eq!(lines[1], "  root((黄山攻略))");
        assert_eq!(lines[2], "    🚗 交通");
        assert_eq!(lines[3], "      黄山交通攻略");
        assert_eq!(lines[4], "      高铁换乘");
    }

    #[test]
    fn test_mindmap_omits_empty_categories() {
        let mut buckets = buckets_with("交通", &["黄山交通攻略"]);
        buckets.insert("住宿".to_string(), Vec::new());
        buckets.insert(UNCATEGORIZED.to_string(), Vec::new());

        let mindmap = build_mindmap(&buckets, "黄山攻略");
        assert!(mindmap.contains("交通"));
        assert!(!mindmap.contains("住宿"));
        assert!(!mindmap.contains(UNCATEGORIZED));
    }

    #[test]
    fn test_mindmap_caps_leaves_per_category() {
        let titles: Vec<String> = (0..8).map(|i| format!("笔记{i}")).collect();
        let title_refs: Vec<&str> = titles.iter().map(String::as_str).collect();
        let buckets = buckets_with("攻略", &title_refs);

        let mindmap = build_mindmap(&buckets, "黄山攻略");
        let leaves = mindmap.lines().filter(|l| l.starts_with("      ")).count();
        assert_eq!(leaves, MAX_LEAVES);
    }
}
