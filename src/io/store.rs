use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::io::lock::LockError;
use crate::model::note::{Note, NoteUpdate};
use crate::model::reference::{NOTES_COLLECTION, NoteRef};

/// Error type for record store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("note not found: {0}")]
    NotFound(NoteRef),
    #[error("cannot insert under {0}: not the notes collection")]
    InvalidParent(String),
    #[error("could not access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not encode note store: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Lock(#[from] LockError),
    #[error("note store unavailable: {0}")]
    Unavailable(String),
}

/// CRUD access to persisted notes.
///
/// The editor only ever talks to the store through these four calls.
pub trait NoteStore {
    /// Fetch a single note. `Ok(None)` when no note has that reference.
    fn get(&mut self, reference: &NoteRef) -> Result<Option<Note>, StoreError>;

    /// Create a note under `parent` (the notes collection) and return its
    /// newly assigned reference.
    fn insert(&mut self, parent: &str, fields: NoteUpdate) -> Result<NoteRef, StoreError>;

    /// Write the present fields of `fields` to an existing note.
    fn update(&mut self, reference: &NoteRef, fields: NoteUpdate) -> Result<(), StoreError>;

    fn delete(&mut self, reference: &NoteRef) -> Result<(), StoreError>;
}

impl<T: NoteStore + ?Sized> NoteStore for &mut T {
    fn get(&mut self, reference: &NoteRef) -> Result<Option<Note>, StoreError> {
        (**self).get(reference)
    }

    fn insert(&mut self, parent: &str, fields: NoteUpdate) -> Result<NoteRef, StoreError> {
        (**self).insert(parent, fields)
    }

    fn update(&mut self, reference: &NoteRef, fields: NoteUpdate) -> Result<(), StoreError> {
        (**self).update(reference, fields)
    }

    fn delete(&mut self, reference: &NoteRef) -> Result<(), StoreError> {
        (**self).delete(reference)
    }
}

/// Check an insert parent against the notes collection.
pub(crate) fn check_parent(parent: &str) -> Result<(), StoreError> {
    if parent == NOTES_COLLECTION {
        Ok(())
    } else {
        Err(StoreError::InvalidParent(parent.to_string()))
    }
}

pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// A call made against a [`MemoryStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Get(NoteRef),
    Insert(NoteUpdate),
    Update(NoteRef, NoteUpdate),
    Delete(NoteRef),
}

/// In-process store that records every call it receives.
#[derive(Debug)]
pub struct MemoryStore {
    notes: BTreeMap<i64, Note>,
    next_id: i64,
    calls: Vec<StoreCall>,
    /// When set, reads fail with [`StoreError::Unavailable`]
    pub fail_reads: bool,
    /// When set, inserts, updates and deletes fail with [`StoreError::Unavailable`]
    pub fail_writes: bool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        MemoryStore {
            notes: BTreeMap::new(),
            next_id: 1,
            calls: Vec::new(),
            fail_reads: false,
            fail_writes: false,
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a note directly, bypassing the call log. Returns its reference.
    pub fn seed(&mut self, title: &str, body: &str) -> NoteRef {
        let id = self.next_id;
        self.next_id += 1;
        let fields = NoteUpdate {
            title: Some(title.to_string()),
            body: Some(body.to_string()),
            created_at: Some(0),
            modified_at: Some(0),
            ..Default::default()
        };
        self.notes.insert(id, Note::from_insert(id, &fields, 0));
        NoteRef::for_id(id)
    }

    /// Every call received so far, oldest first
    pub fn calls(&self) -> &[StoreCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Number of inserts, updates and deletes received
    pub fn write_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| !matches!(c, StoreCall::Get(_)))
            .count()
    }

    /// Peek at a stored note without recording a call.
    pub fn note(&self, reference: &NoteRef) -> Option<&Note> {
        self.notes.get(&reference.id())
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

impl NoteStore for MemoryStore {
    fn get(&mut self, reference: &NoteRef) -> Result<Option<Note>, StoreError> {
        self.calls.push(StoreCall::Get(reference.clone()));
        if self.fail_reads {
            return Err(StoreError::Unavailable("reads disabled".into()));
        }
        Ok(self.notes.get(&reference.id()).cloned())
    }

    fn insert(&mut self, parent: &str, fields: NoteUpdate) -> Result<NoteRef, StoreError> {
        self.calls.push(StoreCall::Insert(fields.clone()));
        if self.fail_writes {
            return Err(StoreError::Unavailable("writes disabled".into()));
        }
        check_parent(parent)?;
        let id = self.next_id;
        self.next_id += 1;
        self.notes
            .insert(id, Note::from_insert(id, &fields, now_millis()));
        Ok(NoteRef::for_id(id))
    }

    fn update(&mut self, reference: &NoteRef, fields: NoteUpdate) -> Result<(), StoreError> {
        self.calls
            .push(StoreCall::Update(reference.clone(), fields.clone()));
        if self.fail_writes {
            return Err(StoreError::Unavailable("writes disabled".into()));
        }
        let note = self
            .notes
            .get_mut(&reference.id())
            .ok_or_else(|| StoreError::NotFound(reference.clone()))?;
        fields.apply_to(note);
        Ok(())
    }

    fn delete(&mut self, reference: &NoteRef) -> Result<(), StoreError> {
        self.calls.push(StoreCall::Delete(reference.clone()));
        if self.fail_writes {
            return Err(StoreError::Unavailable("writes disabled".into()));
        }
        self.notes
            .remove(&reference.id())
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(reference.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;

    #[test]
    fn insert_assigns_increasing_ids() {
        let mut store = MemoryStore::new();
        let a = store.insert(NOTES_COLLECTION, NoteUpdate::default()).unwrap();
        let b = store.insert(NOTES_COLLECTION, NoteUpdate::default()).unwrap();
        assert_eq!(a.id(), 1);
        assert_eq!(b.id(), 2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn insert_rejects_foreign_parent() {
        let mut store = MemoryStore::new();
        let err = store
            .insert("content://notepad/other", NoteUpdate::default())
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidParent(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn update_and_delete_missing_note() {
        let mut store = MemoryStore::new();
        let missing = NoteRef::for_id(99);
        assert!(matches!(
            store.update(&missing, NoteUpdate::default()),
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(store.delete(&missing), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn calls_are_recorded() {
        let mut store = MemoryStore::new();
        let r = store.seed("t", "b");
        assert!(store.calls().is_empty());

        store.get(&r).unwrap();
        let update = NoteUpdate {
            category: Some(Category::Work),
            ..Default::default()
        };
        store.update(&r, update.clone()).unwrap();
        store.delete(&r).unwrap();

        assert_eq!(
            store.calls(),
            &[
                StoreCall::Get(r.clone()),
                StoreCall::Update(r.clone(), update),
                StoreCall::Delete(r),
            ]
        );
        assert_eq!(store.write_count(), 2);
    }

    #[test]
    fn failure_switches() {
        let mut store = MemoryStore::new();
        let r = store.seed("t", "b");
        store.fail_reads = true;
        assert!(store.get(&r).is_err());
        store.fail_writes = true;
        assert!(store.delete(&r).is_err());
        assert_eq!(store.len(), 1);
    }
}
