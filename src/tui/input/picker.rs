use crossterm::event::{KeyCode, KeyEvent};

use crate::model::Category;
use crate::tui::app::{CategoryPickerState, PickerOutcome};

/// Returns the outcome once the picker closes, `None` while it stays open.
pub(super) fn handle_picker_key(
    state: &mut CategoryPickerState,
    key: KeyEvent,
) -> Option<PickerOutcome> {
    match key.code {
        KeyCode::Esc => Some(PickerOutcome::Dismissed),
        KeyCode::Enter => Some(PickerOutcome::Selected(state.selected())),
        KeyCode::Char('j') | KeyCode::Down => {
            state.cursor = (state.cursor + 1).min(Category::ALL.len() - 1);
            None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.cursor = state.cursor.saturating_sub(1);
            None
        }
        KeyCode::Char('g') | KeyCode::Home => {
            state.cursor = 0;
            None
        }
        KeyCode::Char('G') | KeyCode::End => {
            state.cursor = Category::ALL.len() - 1;
            None
        }
        _ => None,
    }
}
