use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;

use crate::editor::{ExitResult, ResultCode};
use crate::io::recovery::RecoveryEntry;
use crate::model::{Category, Note};
use crate::util::unicode;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct NoteJson {
    pub reference: String,
    pub id: i64,
    pub title: String,
    pub body: String,
    pub category: Category,
    pub created_at: i64,
    pub modified_at: i64,
}

impl From<&Note> for NoteJson {
    fn from(note: &Note) -> Self {
        NoteJson {
            reference: note.reference().to_string(),
            id: note.id,
            title: note.title.clone(),
            body: note.body.clone(),
            category: note.category,
            created_at: note.created_at,
            modified_at: note.modified_at,
        }
    }
}

#[derive(Serialize)]
pub struct NoteSummaryJson {
    pub reference: String,
    pub id: i64,
    pub title: String,
    pub category: Category,
    pub modified_at: i64,
}

impl From<&Note> for NoteSummaryJson {
    fn from(note: &Note) -> Self {
        NoteSummaryJson {
            reference: note.reference().to_string(),
            id: note.id,
            title: note.title.clone(),
            category: note.category,
            modified_at: note.modified_at,
        }
    }
}

#[derive(Serialize)]
pub struct RecoveryEntryJson {
    pub timestamp: String,
    pub category: String,
    pub description: String,
    pub fields: Vec<(String, String)>,
    pub body: String,
}

impl From<&RecoveryEntry> for RecoveryEntryJson {
    fn from(entry: &RecoveryEntry) -> Self {
        RecoveryEntryJson {
            timestamp: entry.timestamp.to_rfc3339(),
            category: entry.category.to_string(),
            description: entry.description.clone(),
            fields: entry.fields.clone(),
            body: entry.body.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

const TITLE_WIDTH: usize = 40;

/// Local time for a millisecond timestamp, `-` when out of range.
pub fn format_millis(millis: i64) -> String {
    match Local.timestamp_millis_opt(millis).single() {
        Some(t) => format_time(&t),
        None => "-".to_string(),
    }
}

fn format_time(t: &DateTime<Local>) -> String {
    t.format("%Y-%m-%d %H:%M").to_string()
}

/// One line per note: id, category, modified time, title.
pub fn format_note_line(note: &Note) -> String {
    format!(
        "{:>4}  {:<8}  {}  {}",
        note.id,
        note.category.label(),
        format_millis(note.modified_at),
        unicode::truncate_to_width(&note.title, TITLE_WIDTH)
    )
}

/// Header lines followed by the body.
pub fn format_note(note: &Note) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", note.title));
    out.push_str(&format!(
        "{} | {} | modified {}\n",
        note.reference(),
        note.category,
        format_millis(note.modified_at)
    ));
    out.push('\n');
    out.push_str(&note.body);
    if !note.body.ends_with('\n') {
        out.push('\n');
    }
    out
}

/// The exit contract as printed by the binary: the new reference on stdout
/// when the session created a note, nothing otherwise.
pub fn format_exit(result: &ExitResult) -> Option<String> {
    match (result.code, &result.created) {
        (ResultCode::Ok, Some(reference)) => Some(reference.to_string()),
        _ => None,
    }
}

pub fn format_recovery_entry(entry: &RecoveryEntry) -> String {
    let mut out = format!(
        "## {} [{}] {}\n",
        entry.timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S"),
        entry.category,
        entry.description
    );
    for (key, value) in &entry.fields {
        out.push_str(&format!("{}: {}\n", key, value));
    }
    if !entry.body.is_empty() {
        out.push('\n');
        out.push_str(&entry.body);
        if !entry.body.ends_with('\n') {
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NoteRef;
    use pretty_assertions::assert_eq;

    fn note() -> Note {
        Note {
            id: 3,
            title: "Groceries".into(),
            body: "milk".into(),
            category: Category::Life,
            created_at: 0,
            modified_at: 0,
        }
    }

    #[test]
    fn note_line_columns() {
        let line = format_note_line(&note());
        assert!(line.starts_with("   3  Life    "));
        assert!(line.ends_with("  Groceries"));
    }

    #[test]
    fn note_text_layout() {
        let text = format_note(&note());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Groceries");
        assert!(lines[1].starts_with("content://notepad/notes/3 | Life | modified "));
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "milk");
    }

    #[test]
    fn exit_prints_only_created_reference() {
        let created = ExitResult {
            code: ResultCode::Ok,
            created: Some(NoteRef::for_id(9)),
        };
        assert_eq!(
            format_exit(&created).as_deref(),
            Some("content://notepad/notes/9")
        );
        let edited = ExitResult {
            code: ResultCode::Ok,
            created: None,
        };
        assert_eq!(format_exit(&edited), None);
        assert_eq!(format_exit(&ExitResult::cancelled()), None);
    }

    #[test]
    fn note_json_shape() {
        let json = serde_json::to_value(NoteJson::from(&note())).unwrap();
        assert_eq!(json["reference"], "content://notepad/notes/3");
        assert_eq!(json["category"], "Life");
    }
}
