mod edit;
mod picker;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::io::store::NoteStore;

use super::app::App;

/// Handle a key event: picker keys while it is open, then the editor
/// shortcuts, then text editing in the focused field.
pub fn handle_key<S: NoteStore>(app: &mut App<S>, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    app.status = None;

    if let Some(state) = &mut app.picker {
        if let Some(outcome) = picker::handle_picker_key(state, key) {
            app.close_picker(outcome);
        }
        return;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('s') if ctrl => app.save(),
        KeyCode::Char('d') if ctrl => app.delete(),
        KeyCode::Char('r') if ctrl => app.revert(),
        KeyCode::Char('t') if ctrl => app.open_picker(),
        KeyCode::Char('q') | KeyCode::Char('c') if ctrl => app.close(),
        KeyCode::Esc => app.close(),
        KeyCode::Tab | KeyCode::BackTab => app.toggle_focus(),
        _ => edit::handle_edit_key(app, key),
    }
}

/// Handle a bracketed paste event: the text goes into the focused field.
pub fn handle_paste<S: NoteStore>(app: &mut App<S>, text: &str) {
    if app.picker.is_some() || text.is_empty() {
        return;
    }
    edit::insert_text(app, text);
}
