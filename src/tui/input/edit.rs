use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::io::store::NoteStore;
use crate::tui::app::{App, Focus};
use crate::tui::wrap;
use crate::util::unicode;

pub(super) fn handle_edit_key<S: NoteStore>(app: &mut App<S>, key: KeyEvent) {
    let word = key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);

    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            insert_text(app, c.encode_utf8(&mut [0; 4]));
        }
        KeyCode::Enter => match app.focus {
            Focus::Title => app.focus = Focus::Body,
            Focus::Body => insert_text(app, "\n"),
        },
        KeyCode::Backspace => {
            let (buf, cursor) = app.focused_mut();
            if word {
                delete_word_left(buf, cursor);
            } else {
                backspace(buf, cursor);
            }
        }
        KeyCode::Delete => {
            let (buf, cursor) = app.focused_mut();
            delete_forward(buf, cursor);
        }
        KeyCode::Left => {
            let (buf, cursor) = app.focused_mut();
            *cursor = if word {
                unicode::word_boundary_left(buf, *cursor)
            } else {
                unicode::prev_grapheme_boundary(buf, *cursor).unwrap_or(0)
            };
        }
        KeyCode::Right => {
            let (buf, cursor) = app.focused_mut();
            *cursor = if word {
                unicode::word_boundary_right(buf, *cursor)
            } else {
                unicode::next_grapheme_boundary(buf, *cursor).unwrap_or(buf.len())
            };
        }
        KeyCode::Home => {
            let (buf, cursor) = app.focused_mut();
            *cursor = line_start(buf, *cursor);
        }
        KeyCode::End => {
            let (buf, cursor) = app.focused_mut();
            *cursor = line_end(buf, *cursor);
        }
        KeyCode::Up => move_vertical(app, -1),
        KeyCode::Down => move_vertical(app, 1),
        _ => {}
    }
}

/// Insert text at the cursor of the focused field. The title is a single
/// line, so newlines become spaces there.
pub(super) fn insert_text<S: NoteStore>(app: &mut App<S>, text: &str) {
    let clean = text.replace('\r', "");
    let clean = match app.focus {
        Focus::Title => clean.replace('\n', " "),
        Focus::Body => clean,
    };
    let (buf, cursor) = app.focused_mut();
    buf.insert_str(*cursor, &clean);
    *cursor += clean.len();
}

/// Up/down by screen row in the body. Moving up from the first row lands in
/// the title; moving down from the title lands in the body.
fn move_vertical<S: NoteStore>(app: &mut App<S>, direction: i32) {
    if app.focus == Focus::Title {
        if direction > 0 {
            app.focus = Focus::Body;
        }
        return;
    }

    let body = app.editor.body();
    let rows = wrap::wrap_text(body, app.body_view.width);
    let row = wrap::cursor_row(&rows, app.body_cursor);
    let col = wrap::cursor_col(body, &rows, app.body_cursor);

    if direction < 0 {
        if row == 0 {
            app.focus = Focus::Title;
        } else {
            app.body_cursor = wrap::offset_at(body, &rows, row - 1, col);
        }
    } else if row + 1 >= rows.len() {
        app.body_cursor = body.len();
    } else {
        app.body_cursor = wrap::offset_at(body, &rows, row + 1, col);
    }
}

fn backspace(buf: &mut String, cursor: &mut usize) {
    if let Some(prev) = unicode::prev_grapheme_boundary(buf, *cursor) {
        buf.replace_range(prev..*cursor, "");
        *cursor = prev;
    }
}

fn delete_forward(buf: &mut String, cursor: &mut usize) {
    if let Some(next) = unicode::next_grapheme_boundary(buf, *cursor) {
        buf.replace_range(*cursor..next, "");
    }
}

fn delete_word_left(buf: &mut String, cursor: &mut usize) {
    let start = unicode::word_boundary_left(buf, *cursor);
    buf.replace_range(start..*cursor, "");
    *cursor = start;
}

fn line_start(buf: &str, cursor: usize) -> usize {
    buf[..cursor].rfind('\n').map_or(0, |i| i + 1)
}

fn line_end(buf: &str, cursor: usize) -> usize {
    buf[cursor..].find('\n').map_or(buf.len(), |i| cursor + i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn backspace_removes_whole_grapheme() {
        let mut buf = String::from("cafe\u{0301}");
        let mut cursor = buf.len();
        backspace(&mut buf, &mut cursor);
        assert_eq!(buf, "caf");
        assert_eq!(cursor, 3);

        let mut cursor = 0;
        backspace(&mut buf, &mut cursor);
        assert_eq!(buf, "caf");
    }

    #[test]
    fn delete_forward_at_end_is_noop() {
        let mut buf = String::from("ab");
        let mut cursor = 2;
        delete_forward(&mut buf, &mut cursor);
        assert_eq!(buf, "ab");
        cursor = 0;
        delete_forward(&mut buf, &mut cursor);
        assert_eq!(buf, "b");
    }

    #[test]
    fn word_delete() {
        let mut buf = String::from("hello big world");
        let mut cursor = buf.len();
        delete_word_left(&mut buf, &mut cursor);
        assert_eq!(buf, "hello big ");
        assert_eq!(cursor, 10);
    }

    #[test]
    fn home_and_end_stay_on_logical_line() {
        let buf = "one\ntwo\nthree";
        assert_eq!(line_start(buf, 6), 4);
        assert_eq!(line_end(buf, 6), 7);
        assert_eq!(line_start(buf, 0), 0);
        assert_eq!(line_end(buf, 9), buf.len());
    }

    #[test]
    fn enter_in_title_moves_to_body() {
        let mut app = app_inserting();
        app.focus = Focus::Title;
        handle_edit_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.focus, Focus::Body);
        assert_eq!(app.editor.title(), "");
        handle_edit_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.editor.body(), "\n");
    }

    #[test]
    fn arrows_move_between_rows_and_fields() {
        let mut app = app_editing("t", "abc\nde");
        app.body_view.width = 20;
        // cursor starts at end of "de"
        handle_edit_key(&mut app, key(KeyCode::Up));
        assert_eq!(app.body_cursor, 2);
        handle_edit_key(&mut app, key(KeyCode::Up));
        assert_eq!(app.focus, Focus::Title);
        handle_edit_key(&mut app, key(KeyCode::Down));
        assert_eq!(app.focus, Focus::Body);
        handle_edit_key(&mut app, key(KeyCode::Down));
        assert_eq!(app.body_cursor, 6);
        handle_edit_key(&mut app, key(KeyCode::Down));
        assert_eq!(app.body_cursor, 6);
    }

    #[test]
    fn typing_multibyte_characters() {
        let mut app = app_inserting();
        for c in "日本".chars() {
            handle_edit_key(&mut app, key(KeyCode::Char(c)));
        }
        handle_edit_key(&mut app, key(KeyCode::Left));
        handle_edit_key(&mut app, key(KeyCode::Char('x')));
        assert_eq!(app.editor.body(), "日x本");
    }
}
