use std::io::{IsTerminal, Read};

use crate::model::reference::SCHEME;

/// The primary clipboard item handed to a paste launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipItem {
    /// Something that looks like a content reference. It may or may not
    /// point at a note this application can read. Holds the clipboard text
    /// as given, surrounding whitespace included.
    Reference(String),
    /// Anything else, already coerced to text
    Text(String),
}

impl ClipItem {
    /// Classify raw clipboard text. A single line starting with the content
    /// scheme is treated as a reference.
    pub fn from_text(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.starts_with(SCHEME) && !trimmed.contains(char::is_whitespace) {
            ClipItem::Reference(text.to_string())
        } else {
            ClipItem::Text(text.to_string())
        }
    }

    /// Plain-text view of the item.
    pub fn coerce_to_text(&self) -> &str {
        match self {
            ClipItem::Reference(s) | ClipItem::Text(s) => s,
        }
    }
}

/// Read the clipboard for `np paste`: the explicit text when given, otherwise
/// piped stdin. An interactive stdin or empty input means no clip.
pub fn read_clipboard(explicit: Option<String>) -> std::io::Result<Option<ClipItem>> {
    let text = match explicit {
        Some(t) => t,
        None => {
            let mut stdin = std::io::stdin();
            if stdin.is_terminal() {
                return Ok(None);
            }
            let mut buf = String::new();
            stdin.read_to_string(&mut buf)?;
            buf
        }
    };
    if text.is_empty() {
        return Ok(None);
    }
    Ok(Some(ClipItem::from_text(&text)))
}
