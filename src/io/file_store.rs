use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::io::lock::StoreLock;
use crate::io::recovery::atomic_write;
use crate::io::store::{NoteStore, StoreError, check_parent, now_millis};
use crate::model::note::{Note, NoteUpdate};
use crate::model::reference::NoteRef;

/// On-disk shape of `notes.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
struct NotesDocument {
    #[serde(default = "default_next_id")]
    next_id: i64,
    #[serde(default)]
    notes: Vec<Note>,
}

impl Default for NotesDocument {
    fn default() -> Self {
        NotesDocument {
            next_id: default_next_id(),
            notes: Vec::new(),
        }
    }
}

fn default_next_id() -> i64 {
    1
}

/// Note store backed by a single JSON document in the data directory.
///
/// Every write is a locked read-modify-write followed by an atomic rename,
/// so concurrent `np` processes never interleave partial documents.
#[derive(Debug, Clone)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    pub fn open(data_dir: &Path) -> Self {
        FileStore {
            data_dir: data_dir.to_path_buf(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn notes_path(&self) -> PathBuf {
        self.data_dir.join("notes.json")
    }

    /// All notes, most recently modified first.
    pub fn list(&self) -> Result<Vec<Note>, StoreError> {
        let mut notes = self.read_document()?.notes;
        notes.sort_by(|a, b| b.modified_at.cmp(&a.modified_at).then(b.id.cmp(&a.id)));
        Ok(notes)
    }

    fn read_document(&self) -> Result<NotesDocument, StoreError> {
        let path = self.notes_path();
        let text = match fs::read_to_string(&path) {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(NotesDocument::default());
            }
            Err(e) => return Err(StoreError::Io { path, source: e }),
        };
        serde_json::from_str(&text).map_err(|e| StoreError::Parse { path, source: e })
    }

    fn write_document(&self, doc: &NotesDocument) -> Result<(), StoreError> {
        let path = self.notes_path();
        let content = serde_json::to_string_pretty(doc)?;
        atomic_write(&path, content.as_bytes()).map_err(|e| StoreError::Io { path, source: e })
    }

    /// Run `f` against the document under the store lock and persist the result.
    fn modify<T>(
        &self,
        f: impl FnOnce(&mut NotesDocument) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        fs::create_dir_all(&self.data_dir).map_err(|e| StoreError::Io {
            path: self.data_dir.clone(),
            source: e,
        })?;
        let _lock = StoreLock::acquire_default(&self.data_dir)?;
        let mut doc = self.read_document()?;
        let value = f(&mut doc)?;
        self.write_document(&doc)?;
        Ok(value)
    }
}

impl NoteStore for FileStore {
    fn get(&mut self, reference: &NoteRef) -> Result<Option<Note>, StoreError> {
        let doc = self.read_document()?;
        Ok(doc.notes.into_iter().find(|n| n.id == reference.id()))
    }

    fn insert(&mut self, parent: &str, fields: NoteUpdate) -> Result<NoteRef, StoreError> {
        check_parent(parent)?;
        self.modify(|doc| {
            let id = doc.next_id;
            doc.next_id += 1;
            doc.notes.push(Note::from_insert(id, &fields, now_millis()));
            Ok(NoteRef::for_id(id))
        })
    }

    fn update(&mut self, reference: &NoteRef, fields: NoteUpdate) -> Result<(), StoreError> {
        self.modify(|doc| {
            let note = doc
                .notes
                .iter_mut()
                .find(|n| n.id == reference.id())
                .ok_or_else(|| StoreError::NotFound(reference.clone()))?;
            fields.apply_to(note);
            Ok(())
        })
    }

    fn delete(&mut self, reference: &NoteRef) -> Result<(), StoreError> {
        self.modify(|doc| {
            let before = doc.notes.len();
            doc.notes.retain(|n| n.id != reference.id());
            if doc.notes.len() == before {
                return Err(StoreError::NotFound(reference.clone()));
            }
            Ok(())
        })
    }
}
