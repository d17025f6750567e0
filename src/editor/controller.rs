use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::editor::launch::{ExitResult, Launch, LaunchAction, ResultCode};
use crate::editor::session::{EditMode, Session};
use crate::editor::title::{is_blank_title, resolve_title};
use crate::io::clipboard::ClipItem;
use crate::io::recovery::{self, RecoveryCategory};
use crate::io::store::{NoteStore, StoreError, now_millis};
use crate::model::category::Category;
use crate::model::config::EditorConfig;
use crate::model::note::NoteUpdate;
use crate::model::reference::{NOTES_COLLECTION, NoteRef, is_invalid_reference};

/// Reasons the editor refuses to open. The `Display` text is shown to the user.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("invalid note reference: {}", .0.as_deref().unwrap_or("(none)"))]
    InvalidReference(Option<String>),
    #[error("could not load the note: {0}")]
    StoreUnavailable(#[source] StoreError),
    #[error("note not found: {0}")]
    NotFound(NoteRef),
    #[error("unknown action: {0}")]
    UnknownAction(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A short user-facing message, shown by the host like a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Drives one editing session against a note store.
///
/// The host calls [`resume`](Self::resume) when the screen comes to the
/// foreground and [`pause`](Self::pause) when it loses it; pause is the
/// commit point for in-memory edits. Menu actions map to
/// [`save`](Self::save), [`delete`](Self::delete), [`revert`](Self::revert)
/// and [`set_category`](Self::set_category).
pub struct NoteEditor<S: NoteStore> {
    store: S,
    session: Session,
    config: EditorConfig,
    clock: fn() -> i64,
    recovery_dir: Option<PathBuf>,
    /// Last pause could not write; keep the buffers over the stored copy
    flush_failed: bool,
    notices: Vec<Notice>,
}

impl<S: NoteStore> NoteEditor<S> {
    /// Open the editor for a launch request.
    ///
    /// Edit launches validate the reference before any store access and load
    /// the note once. Insert and paste launches never touch the store except
    /// to resolve a clipboard reference.
    pub fn launch(store: S, launch: Launch, config: EditorConfig) -> Result<Self, EditorError> {
        let is_paste = launch.action == LaunchAction::Paste;
        let session = match launch.action {
            LaunchAction::Edit => {
                let raw = launch.reference.as_deref();
                if is_invalid_reference(raw) {
                    error!(
                        reference = raw.unwrap_or("(none)"),
                        "refusing to open invalid note reference"
                    );
                    return Err(EditorError::InvalidReference(launch.reference));
                }
                let reference = NoteRef::parse(raw.unwrap_or_default())
                    .map_err(|_| EditorError::InvalidReference(launch.reference.clone()))?;
                Session::edit(reference)
            }
            LaunchAction::Insert | LaunchAction::Paste => Session::insert(config.default_category),
            LaunchAction::Unknown(tag) => {
                error!(action = %tag, "unknown launch action");
                return Err(EditorError::UnknownAction(tag));
            }
        };

        let mut editor = NoteEditor {
            store,
            session,
            config,
            clock: now_millis,
            recovery_dir: None,
            flush_failed: false,
            notices: Vec::new(),
        };

        match editor.session.mode {
            EditMode::Edit => editor.load_initial()?,
            EditMode::Insert if is_paste => editor.prefill_from_clip(launch.clip),
            EditMode::Insert => {}
        }
        Ok(editor)
    }

    /// Replace the timestamp source (milliseconds since the epoch).
    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    /// Log the content of failed writes to the recovery log in `dir`.
    pub fn with_recovery_dir(mut self, dir: &Path) -> Self {
        self.recovery_dir = Some(dir.to_path_buf());
        self
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn title(&self) -> &str {
        &self.session.title
    }

    pub fn body(&self) -> &str {
        &self.session.body
    }

    pub fn title_mut(&mut self) -> &mut String {
        &mut self.session.title
    }

    pub fn body_mut(&mut self) -> &mut String {
        &mut self.session.body
    }

    pub fn category(&self) -> Category {
        self.session.category
    }

    pub fn mode(&self) -> EditMode {
        self.session.mode
    }

    pub fn reference(&self) -> Option<&NoteRef> {
        self.session.reference.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.session.finished
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Drain the notices raised since the last call.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Whether the revert action should be offered.
    pub fn can_revert(&self) -> bool {
        self.session.body_changed()
    }

    /// Heading for the screen: the stored title in Edit mode.
    pub fn screen_title(&self) -> String {
        match (self.session.mode, &self.session.original) {
            (EditMode::Edit, Some(snapshot)) => format!("Edit: {}", snapshot.title),
            (EditMode::Edit, None) => "Edit note".to_string(),
            (EditMode::Insert, _) => "New note".to_string(),
        }
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// The screen came (back) to the foreground. Edit sessions refresh their
    /// buffers from the store; the revert snapshot is left alone.
    pub fn resume(&mut self) {
        if self.session.discarded || self.session.finished || self.session.mode != EditMode::Edit {
            return;
        }
        if self.flush_failed {
            debug!("skipping reload, buffers hold unsaved edits");
            return;
        }
        let Some(reference) = self.live_reference() else {
            return;
        };
        match self.store.get(&reference) {
            Ok(Some(note)) => {
                debug!(reference = %reference, "note reloaded");
                let auto_title = is_blank_title(&self.session.title)
                    && note.title == resolve_title("", &note.body, &self.config);
                self.session.load(&note);
                if auto_title {
                    // keep following the body on later writes
                    self.session.title.clear();
                }
            }
            Ok(None) => {
                warn!(reference = %reference, "note disappeared from the store");
                self.notify_error("This note no longer exists");
            }
            Err(e) => {
                error!(reference = %reference, error = %e, "failed to reload note");
                self.notify_error("Could not reload the note");
            }
        }
    }

    /// The screen lost the foreground. Flush the buffers to the store.
    ///
    /// With `finishing` set and both fields empty the note is abandoned:
    /// nothing is written or deleted and the result is Cancelled.
    pub fn pause(&mut self, finishing: bool) {
        if self.session.discarded || self.session.finished {
            return;
        }
        if finishing && self.session.is_empty() {
            info!("empty note abandoned");
            self.session.result = ExitResult::cancelled();
            return;
        }
        match self.session.mode {
            EditMode::Edit => {
                self.write_existing();
            }
            EditMode::Insert => {
                if !self.session.is_empty() {
                    self.create_record();
                }
            }
        }
    }

    /// Close the screen, flushing through [`pause`](Self::pause) first.
    pub fn finish(&mut self) -> ExitResult {
        if !self.session.finished {
            self.pause(true);
            self.session.finished = true;
        }
        self.session.result.clone()
    }

    // -----------------------------------------------------------------------
    // Menu actions
    // -----------------------------------------------------------------------

    /// Write the buffers now, creating the note if needed, and close.
    pub fn save(&mut self) -> ExitResult {
        if !self.session.discarded && !self.session.finished {
            match self.session.mode {
                EditMode::Edit => self.write_existing(),
                EditMode::Insert => self.create_record(),
            };
            self.session.finished = true;
        }
        self.session.result.clone()
    }

    /// Delete the note and close. The session never writes again.
    pub fn delete(&mut self) -> ExitResult {
        if self.session.finished {
            return self.session.result.clone();
        }
        if let Some(reference) = self.live_reference() {
            match self.store.delete(&reference) {
                Ok(()) => info!(reference = %reference, "note deleted"),
                Err(e) => {
                    error!(reference = %reference, error = %e, "failed to delete note");
                    self.record_unsaved(RecoveryCategory::Delete, Some(&reference), &e);
                    self.notify_error("Could not delete the note");
                }
            }
        }
        self.session.discarded = true;
        self.session.body.clear();
        self.session.result = ExitResult::cancelled();
        self.session.finished = true;
        self.session.result.clone()
    }

    /// Restore the loaded title and body, or clear a note never saved.
    pub fn revert(&mut self) {
        match self.session.mode {
            EditMode::Edit => {
                if let Some(snapshot) = &self.session.original {
                    self.session.title = snapshot.title.clone();
                    self.session.body = snapshot.body.clone();
                }
            }
            EditMode::Insert => {
                self.session.title.clear();
                self.session.body.clear();
            }
        }
    }

    /// Apply a category picked by the user. Persisted right away when the
    /// note exists, otherwise kept for the next save.
    pub fn set_category(&mut self, category: Category) {
        self.session.category = category;
        let Some(reference) = self.live_reference() else {
            self.notify_info("Save the note first; the category will be applied when it is saved");
            return;
        };
        let update = NoteUpdate {
            category: Some(category),
            modified_at: Some((self.clock)()),
            ..Default::default()
        };
        match self.store.update(&reference, update) {
            Ok(()) => {
                info!(reference = %reference, category = %category, "category updated");
                self.notify_info(format!("Category set to {}", category));
            }
            Err(e) => {
                error!(reference = %reference, error = %e, "failed to update category");
                self.record_unsaved(RecoveryCategory::Category, Some(&reference), &e);
                self.notify_error("Could not set the category");
            }
        }
    }

    // -----------------------------------------------------------------------
    // Store access
    // -----------------------------------------------------------------------

    fn load_initial(&mut self) -> Result<(), EditorError> {
        let Some(reference) = self.live_reference() else {
            return Err(EditorError::InvalidReference(
                self.session.reference.as_ref().map(|r| r.to_string()),
            ));
        };
        match self.store.get(&reference) {
            Ok(Some(note)) => {
                debug!(reference = %reference, "note loaded");
                self.session.load(&note);
                Ok(())
            }
            Ok(None) => {
                error!(reference = %reference, "note not found");
                Err(EditorError::NotFound(reference))
            }
            Err(e) => {
                error!(reference = %reference, error = %e, "failed to load note");
                Err(EditorError::StoreUnavailable(e))
            }
        }
    }

    /// Copy the clipboard into the buffers: a readable note reference copies
    /// that note, anything else becomes the body text.
    fn prefill_from_clip(&mut self, clip: Option<ClipItem>) {
        let Some(clip) = clip else {
            return;
        };
        if let ClipItem::Reference(raw) = &clip
            && let Ok(reference) = NoteRef::parse(raw.trim())
        {
            match self.store.get(&reference) {
                Ok(Some(note)) => {
                    debug!(reference = %reference, "pasting copy of note");
                    self.session.title = note.title;
                    self.session.body = note.body;
                    return;
                }
                Ok(None) => debug!(reference = %reference, "clipboard note not found"),
                Err(e) => warn!(reference = %reference, error = %e, "could not read clipboard note"),
            }
        }
        self.session.body = clip.coerce_to_text().to_string();
    }

    /// The session reference, re-validated before it is dereferenced.
    fn live_reference(&self) -> Option<NoteRef> {
        let reference = self.session.reference.as_ref()?;
        if reference.is_valid() {
            Some(reference.clone())
        } else {
            warn!(reference = %reference, "session holds an invalid reference");
            None
        }
    }

    fn write_existing(&mut self) -> bool {
        let Some(reference) = self.live_reference() else {
            self.notify_error("Cannot save: invalid note reference");
            return false;
        };
        let update = NoteUpdate {
            title: Some(resolve_title(
                &self.session.title,
                &self.session.body,
                &self.config,
            )),
            body: Some(self.session.body.clone()),
            category: Some(self.session.category),
            created_at: None,
            modified_at: Some((self.clock)()),
        };
        match self.store.update(&reference, update) {
            Ok(()) => {
                info!(reference = %reference, "note saved");
                self.session.result.code = ResultCode::Ok;
                self.flush_failed = false;
                true
            }
            Err(e) => {
                error!(reference = %reference, error = %e, "failed to save note");
                self.record_unsaved(RecoveryCategory::Save, Some(&reference), &e);
                self.notify_error("Could not save the note");
                self.flush_failed = true;
                false
            }
        }
    }

    fn create_record(&mut self) -> bool {
        let title = resolve_title(&self.session.title, &self.session.body, &self.config);
        let body = self.session.body.clone();
        let category = self.session.category;
        let now = (self.clock)();
        let fields = NoteUpdate {
            title: Some(title.clone()),
            body: Some(body.clone()),
            category: Some(category),
            created_at: Some(now),
            modified_at: Some(now),
        };
        match self.store.insert(NOTES_COLLECTION, fields) {
            Ok(reference) => {
                info!(reference = %reference, category = %category, "note created");
                self.session.capture_original(&title, &body);
                self.session.reference = Some(reference.clone());
                self.session.mode = EditMode::Edit;
                self.session.result = ExitResult {
                    code: ResultCode::Ok,
                    created: Some(reference),
                };
                self.flush_failed = false;
                self.notify_info(format!("Note saved in {}", category));
                true
            }
            Err(e) => {
                error!(error = %e, "failed to create note");
                self.record_unsaved(RecoveryCategory::Save, None, &e);
                self.notify_error("Could not save the note");
                self.flush_failed = true;
                false
            }
        }
    }

    fn record_unsaved(
        &self,
        category: RecoveryCategory,
        reference: Option<&NoteRef>,
        error: &StoreError,
    ) {
        if let Some(dir) = &self.recovery_dir {
            recovery::log_unsaved_note(
                dir,
                category,
                reference.map(|r| r.as_str()),
                &self.session.title,
                &self.session.body,
                &error.to_string(),
            );
        }
    }

    fn notify_info(&mut self, message: impl Into<String>) {
        self.notices.push(Notice {
            level: NoticeLevel::Info,
            message: message.into(),
        });
    }

    fn notify_error(&mut self, message: impl Into<String>) {
        self.notices.push(Notice {
            level: NoticeLevel::Error,
            message: message.into(),
        });
    }
}
