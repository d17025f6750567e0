use serde::{Deserialize, Serialize};

use super::category::Category;
use super::reference::NoteRef;

/// A persisted note record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Store-assigned id, never reused
    pub id: i64,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub category: Category,
    /// Creation time, milliseconds since the Unix epoch
    pub created_at: i64,
    /// Last modification time, milliseconds since the Unix epoch
    pub modified_at: i64,
}

impl Note {
    pub fn reference(&self) -> NoteRef {
        NoteRef::for_id(self.id)
    }

    /// Build a fresh record from an insert request. Missing text fields become
    /// empty strings and missing timestamps fall back to `now`.
    pub fn from_insert(id: i64, fields: &NoteUpdate, now: i64) -> Self {
        let created_at = fields.created_at.unwrap_or(now);
        Note {
            id,
            title: fields.title.clone().unwrap_or_default(),
            body: fields.body.clone().unwrap_or_default(),
            category: fields.category.unwrap_or_default(),
            created_at,
            modified_at: fields.modified_at.unwrap_or(created_at),
        }
    }
}

/// The fields a store write may touch. Only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteUpdate {
    pub title: Option<String>,
    pub body: Option<String>,
    pub category: Option<Category>,
    pub created_at: Option<i64>,
    pub modified_at: Option<i64>,
}

impl NoteUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.body.is_none()
            && self.category.is_none()
            && self.created_at.is_none()
            && self.modified_at.is_none()
    }

    /// Write the present fields into `note`.
    pub fn apply_to(&self, note: &mut Note) {
        if let Some(title) = &self.title {
            note.title = title.clone();
        }
        if let Some(body) = &self.body {
            note.body = body.clone();
        }
        if let Some(category) = self.category {
            note.category = category;
        }
        if let Some(ts) = self.created_at {
            note.created_at = ts;
        }
        if let Some(ts) = self.modified_at {
            note.modified_at = ts;
        }
    }
}
