use serde::Serialize;

use crate::io::clipboard::ClipItem;
use crate::model::reference::NoteRef;

/// What the editor screen was opened to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchAction {
    /// View or edit an existing note
    Edit,
    /// Start a new note
    Insert,
    /// Start a new note from the clipboard
    Paste,
    /// Any other action tag. The editor refuses to open.
    Unknown(String),
}

impl LaunchAction {
    /// Map a host action tag to an action. `view` is an alias for `edit`.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "edit" | "view" => LaunchAction::Edit,
            "insert" | "new" => LaunchAction::Insert,
            "paste" => LaunchAction::Paste,
            _ => LaunchAction::Unknown(tag.to_string()),
        }
    }
}

/// Everything the host hands the editor when opening it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Launch {
    pub action: LaunchAction,
    /// Raw reference for [`LaunchAction::Edit`], unvalidated
    pub reference: Option<String>,
    /// Clipboard content for [`LaunchAction::Paste`]
    pub clip: Option<ClipItem>,
}

impl Launch {
    pub fn edit(reference: impl Into<String>) -> Self {
        Launch {
            action: LaunchAction::Edit,
            reference: Some(reference.into()),
            clip: None,
        }
    }

    pub fn insert() -> Self {
        Launch {
            action: LaunchAction::Insert,
            reference: None,
            clip: None,
        }
    }

    pub fn paste(clip: Option<ClipItem>) -> Self {
        Launch {
            action: LaunchAction::Paste,
            reference: None,
            clip,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultCode {
    Ok,
    Cancelled,
}

/// What the editor reports back to the host when it closes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExitResult {
    pub code: ResultCode,
    /// Reference of a note created by this session
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<NoteRef>,
}

impl ExitResult {
    pub fn cancelled() -> Self {
        ExitResult {
            code: ResultCode::Cancelled,
            created: None,
        }
    }
}
