use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::category::Category;

/// Configuration from config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Title used when a note is saved with neither title nor body text
    #[serde(default = "default_untitled")]
    pub untitled: String,
    /// Number of body characters an auto-generated title is cut to
    #[serde(default = "default_title_chars")]
    pub title_chars: usize,
    /// Category of a freshly inserted note
    #[serde(default)]
    pub default_category: Category,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            untitled: default_untitled(),
            title_chars: default_title_chars(),
            default_category: Category::default(),
        }
    }
}

fn default_untitled() -> String {
    "Untitled".to_string()
}

fn default_title_chars() -> usize {
    30
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Color overrides keyed by theme slot (e.g. `rule = "#3D1438"`)
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_key_hints: true,
            colors: HashMap::new(),
        }
    }
}
