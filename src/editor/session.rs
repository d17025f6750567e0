use crate::editor::launch::ExitResult;
use crate::model::category::Category;
use crate::model::note::Note;
use crate::model::reference::NoteRef;

/// Whether the session edits a persisted note or a note not yet created
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    Edit,
    Insert,
}

/// Title and body as first loaded, used by revert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub title: String,
    pub body: String,
}

/// In-memory state of one open editor screen.
#[derive(Debug, Clone)]
pub struct Session {
    pub mode: EditMode,
    /// Set once the note exists in the store, never changed afterwards
    pub reference: Option<NoteRef>,
    /// Captured on the first successful load, never overwritten
    pub original: Option<Snapshot>,
    pub category: Category,
    pub title: String,
    pub body: String,
    /// What the host gets back when the screen closes
    pub result: ExitResult,
    /// Set after delete; a discarded session never writes again
    pub discarded: bool,
    /// Set once the screen has closed
    pub finished: bool,
}

impl Session {
    pub fn insert(category: Category) -> Self {
        Session {
            mode: EditMode::Insert,
            reference: None,
            original: None,
            category,
            title: String::new(),
            body: String::new(),
            result: ExitResult::cancelled(),
            discarded: false,
            finished: false,
        }
    }

    pub fn edit(reference: NoteRef) -> Self {
        Session {
            mode: EditMode::Edit,
            reference: Some(reference),
            ..Session::insert(Category::default())
        }
    }

    /// Fill the buffers from a loaded note and capture the snapshot if this
    /// is the first successful load.
    pub fn load(&mut self, note: &Note) {
        self.title = note.title.clone();
        self.body = note.body.clone();
        self.category = note.category;
        self.capture_original(&note.title, &note.body);
    }

    /// Capture the revert snapshot unless one already exists.
    pub fn capture_original(&mut self, title: &str, body: &str) {
        if self.original.is_none() {
            self.original = Some(Snapshot {
                title: title.to_string(),
                body: body.to_string(),
            });
        }
    }

    pub fn original_body(&self) -> &str {
        self.original.as_ref().map_or("", |s| s.body.as_str())
    }

    /// Revert is offered only while the body differs from the snapshot.
    pub fn body_changed(&self) -> bool {
        self.body != self.original_body()
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.body.is_empty()
    }
}
