//! Category keyword map and search phrase templates.
//!
//! Both are loaded from an optional JSON config file with two recognized keys:
//!
//! ```json
//! {
//!     "categories": { "交通": ["交通", "高铁", "自驾"] },
//!     "search_templates": ["{destination} 攻略"]
//! }
//! ```
//!
//! A missing or unreadable file falls back to the built-in defaults, so the
//! pipeline always has a usable map. The map is immutable during a run.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

use crate::Result;

/// Reserved bucket label for notes matching no configured category.
pub const UNCATEGORIZED: &str = "其他";

/// Placeholder expanded by [`KeywordConfig::expand_queries`].
pub const DESTINATION_PLACEHOLDER: &str = "{destination}";

/// Keyword map plus query templates, as loaded from configuration.
///
/// Category order is preserved from the config file (or the built-in default)
/// and carries through bucket initialization and rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordConfig {
    /// Category label -> trigger keywords.
    #[serde(default)]
    pub categories: IndexMap<String, Vec<String>>,

    /// Query phrase templates containing a `{destination}` placeholder.
    #[serde(default)]
    pub search_templates: Vec<String>,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        let mut categories = IndexMap::new();
        categories.insert("交通".to_string(), strings(&["交通", "高铁", "自驾"]));
        categories.insert("住宿".to_string(), strings(&["酒店", "民宿", "住宿"]));
        categories.insert("饮食".to_string(), strings(&["美食", "必吃", "餐厅"]));
        categories.insert("优惠".to_string(), strings(&["优惠", "免费", "白嫖"]));
        categories.insert("学生".to_string(), strings(&["学生", "大学生", "学生票"]));
        categories.insert("攻略".to_string(), strings(&["攻略", "行程", "路线"]));

        Self { categories, search_templates: vec![format!("{DESTINATION_PLACEHOLDER} 攻略")] }
    }
}

impl KeywordConfig {
    /// Loads configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Loads configuration, falling back to the built-in defaults when the
    /// file is absent or fails to parse.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to load keyword config, using defaults");
                Self::default()
            }
        }
    }

    /// Expands a destination name through every configured template.
    ///
    /// Falls back to the default template list when the config carries none.
    pub fn expand_queries(&self, destination: &str) -> Vec<String> {
        let templates = if self.search_templates.is_empty() {
            Self::default().search_templates
        } else {
            self.search_templates.clone()
        };

        templates.iter().map(|t| t.replace(DESTINATION_PLACEHOLDER, destination)).collect()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
