use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::editor::{Launch, NoteEditor};
use crate::io::store::MemoryStore;
use crate::model::{EditorConfig, UiConfig};
use crate::tui::app::App;

pub const TERM_W: u16 = 60;
pub const TERM_H: u16 = 16;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// App editing a single stored note (reference `content://notepad/notes/1`).
pub fn app_editing(title: &str, body: &str) -> App<MemoryStore> {
    let mut store = MemoryStore::new();
    let reference = store.seed(title, body);
    let editor = NoteEditor::launch(store, Launch::edit(reference.as_str()), EditorConfig::default())
        .unwrap();
    App::new(editor, &UiConfig::default())
}

/// App for a new note that has not been stored yet.
pub fn app_inserting() -> App<MemoryStore> {
    let editor =
        NoteEditor::launch(MemoryStore::new(), Launch::insert(), EditorConfig::default()).unwrap();
    App::new(editor, &UiConfig::default())
}
