use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Category tag attached to a note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    Personal,
    Work,
    Study,
    Life,
    #[default]
    Other,
}

impl Category {
    /// All categories in picker order
    pub const ALL: [Category; 5] = [
        Category::Personal,
        Category::Work,
        Category::Study,
        Category::Life,
        Category::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Personal => "Personal",
            Category::Work => "Work",
            Category::Study => "Study",
            Category::Life => "Life",
            Category::Other => "Other",
        }
    }

    /// Parse a label, ignoring case and surrounding whitespace
    pub fn parse_label(s: &str) -> Option<Self> {
        let s = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s))
    }

    /// Position of this category in [`Category::ALL`]
    pub fn index(self) -> usize {
        Category::ALL
            .iter()
            .position(|c| *c == self)
            .unwrap_or(Category::ALL.len() - 1)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

// Unknown labels load as Other rather than failing the whole document.
impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Category::parse_label(&s).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Category::parse_label("work"), Some(Category::Work));
        assert_eq!(Category::parse_label("  STUDY "), Some(Category::Study));
        assert_eq!(Category::parse_label("groceries"), None);
    }

    #[test]
    fn default_is_other() {
        assert_eq!(Category::default(), Category::Other);
    }

    #[test]
    fn picker_order() {
        let labels: Vec<&str> = Category::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(labels, vec!["Personal", "Work", "Study", "Life", "Other"]);
        assert_eq!(Category::Life.index(), 3);
    }

    #[test]
    fn unknown_label_deserializes_as_other() {
        let c: Category = serde_json::from_str("\"Hobby\"").unwrap();
        assert_eq!(c, Category::Other);
        let c: Category = serde_json::from_str("\"life\"").unwrap();
        assert_eq!(c, Category::Life);
    }
}
