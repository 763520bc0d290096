//! Markdown trip report generation.
//!
//! The report embeds the mindmap as a fenced diagram block, then lists up to
//! [`MAX_ENTRIES`] notes per non-empty category with links and engagement
//! details. Titles pass through the same sanitization as mindmap leaves.

use crate::categorize::Buckets;
use crate::render::category_icon;
use crate::render::mindmap::sanitize_label;

/// Entries rendered per category section.
pub const MAX_ENTRIES: usize = 10;

/// Builds the full Markdown report for a destination.
pub fn build_report(buckets: &Buckets, destination: &str, mindmap: &str) -> String {
    let mut out = String::new();

    out.push_str(&format!("# {destination}旅行攻略\n\n"));
    out.push_str("*数据来源: 小红书 | 由 tripnotes 自动生成*\n\n");

    out.push_str("## 思维导图\n\n");
    out.push_str("```mermaid\n");
    out.push_str(mindmap);
    out.push_str("\n```\n\n");

    out.push_str("## 详细内容\n\n");

    for (label, notes) in buckets {
        if notes.is_empty() {
            continue;
        }

        out.push_str(&format!("### {} {}\n\n", category_icon(label), label));

        for (i, note) in notes.iter().take(MAX_ENTRIES).enumerate() {
            let title = sanitize_label(&note.title);
            if note.link.is_empty() {
                out.push_str(&format!("{}. {}\n", i + 1, title));
            } else {
                out.push_str(&format!("{}. [{}]({})\n", i + 1, title, note.link));
            }

            if !note.author.is_empty() || !note.likes.is_empty() {
                out.push_str(&format!("   - 作者: {} | 点赞: {}\n", note.author, note.likes));
            }
        }

        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::NoteRecord;
    use indexmap::IndexMap;

    fn note(title: &str, author: &str, link: &str, likes: &str) -> NoteRecord {
        NoteRecord {
            title: title.to_string(),
            author: author.to_string(),
            link: link.to_string(),
            likes: likes.to_string(),
            query: String::new(),
        }
    }

    fn sample_buckets() -> Buckets {
        let mut buckets = IndexMap::new();
        buckets.insert(
            "交通".to_string(),
            vec![
                note("黄山交通攻略", "小明", "https://www.xiaohongshu.com/explore/1", "1.2万"),
                note("高铁换乘指南", "", "", ""),
            ],
        );
        buckets.insert("住宿".to_string(), Vec::new());
        buckets
    }

    #[test]
    fn test_report_has_title_and_mindmap_block() {
        let report = build_report(&sample_buckets(), "黄山", "mindmap\n  root((黄山攻略))");

        assert!(report.starts_with("# 黄山旅行攻略"));
        assert!(report.contains("```mermaid\nmindmap\n  root((黄山攻略))\n```"));
    }

    #[test]
    fn test_report_links_when_present() {
        let report = build_report(&sample_buckets(), "黄山", "");
        assert!(report.contains("1. [黄山交通攻略](https://www.xiaohongshu.com/explore/1)"));
        assert!(report.contains("2. 高铁换乘指南"));
    }

    #[test]
    fn test_report_secondary_line_only_when_nonempty() {
        let report = build_report(&sample_buckets(), "黄山", "");
        assert!(report.contains("   - 作者: 小明 | 点赞: 1.2万"));
        // The bare entry carries no secondary line.
        assert!(!report.contains("作者:  | 点赞: \n"));
    }

    #[test]
    fn test_report_omits_empty_categories() {
        let report = build_report(&sample_buckets(), "黄山", "");
        assert!(report.contains("### 🚗 交通"));
        assert!(!report.contains("住宿"));
    }

    #[test]
    fn test_report_caps_entries_per_category() {
        let mut buckets = IndexMap::new();
        buckets.insert(
            "攻略".to_string(),
            (0..15).map(|i| note(&format!("笔记{i}"), "", "", "")).collect::<Vec<_>>(),
        );

        let report = build_report(&buckets, "黄山", "");
        assert!(report.contains("10. 笔记9"));
        assert!(!report.contains("11. 笔记10"));
    }

    #[test]
    fn test_report_titles_are_sanitized() {
        let mut buckets = IndexMap::new();
        buckets
            .insert("其他".to_string(), vec![note("标题[含](括号)\"引号\"", "", "", "")]);

        let report = build_report(&buckets, "黄山", "");
        assert!(!report.contains("标题["));
        assert!(report.contains("标题【含】（括号）'引号'"));
    }
}
