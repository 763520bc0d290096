//! Rendering of categorized buckets into human-readable artifacts.

pub mod mindmap;
pub mod report;

pub use mindmap::{build_mindmap, sanitize_label};
pub use report::build_report;

const CATEGORY_ICONS: &[(&str, &str)] = &[
    ("交通", "🚗"),
    ("住宿", "🏨"),
    ("饮食", "🍜"),
    ("优惠", "💰"),
    ("学生", "🎓"),
    ("攻略", "📋"),
    ("其他", "📌"),
];

const FALLBACK_ICON: &str = "📌";

/// Icon/marker for a category label, with a generic fallback for labels not
/// in the built-in scheme.
pub fn category_icon(label: &str) -> &'static str {
    CATEGORY_ICONS
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, icon)| *icon)
        .unwrap_or(FALLBACK_ICON)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_icons() {
        assert_eq!(category_icon("交通"), "🚗");
        assert_eq!(category_icon("住宿"), "🏨");
        assert_eq!(category_icon("其他"), "📌");
    }

    #[test]
    fn test_unknown_label_gets_fallback() {
        assert_eq!(category_icon("露营"), FALLBACK_ICON);
    }
}
