use std::io;
use std::time::Duration;

use crossterm::event::{
    self, DisableBracketedPaste, DisableFocusChange, EnableBracketedPaste, EnableFocusChange,
    Event, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;

use crate::editor::{ExitResult, NoteEditor, Notice, NoticeLevel};
use crate::io::store::NoteStore;
use crate::model::{Category, UiConfig};

use super::input;
use super::render;
use super::render::category_picker;
use super::render::lined_text::LinedTextState;
use super::theme::Theme;

/// Which text field receives typed input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Title,
    Body,
}

/// State for the category picker popup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryPickerState {
    /// Index into [`Category::ALL`]
    pub cursor: usize,
}

impl CategoryPickerState {
    pub fn new(current: Category) -> Self {
        CategoryPickerState {
            cursor: current.index(),
        }
    }

    pub fn selected(&self) -> Category {
        Category::ALL[self.cursor.min(Category::ALL.len() - 1)]
    }
}

/// How the picker was closed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerOutcome {
    Selected(Category),
    Dismissed,
}

/// Main application state
pub struct App<S: NoteStore> {
    pub editor: NoteEditor<S>,
    pub focus: Focus,
    /// Byte offsets into the title and body buffers
    pub title_cursor: usize,
    pub body_cursor: usize,
    pub title_view: LinedTextState,
    pub body_view: LinedTextState,
    pub picker: Option<CategoryPickerState>,
    /// Last notice, shown in the status row until the next key
    pub status: Option<Notice>,
    pub theme: Theme,
    pub show_key_hints: bool,
    /// Terminal area of the last frame
    pub screen: Rect,
    /// Set once the editor has closed
    pub exit: Option<ExitResult>,
}

impl<S: NoteStore> App<S> {
    pub fn new(editor: NoteEditor<S>, ui: &UiConfig) -> Self {
        let title_cursor = editor.title().len();
        let body_cursor = editor.body().len();
        let mut app = App {
            editor,
            focus: Focus::Body,
            title_cursor,
            body_cursor,
            title_view: LinedTextState::default(),
            body_view: LinedTextState::default(),
            picker: None,
            status: None,
            theme: Theme::from_config(ui),
            show_key_hints: ui.show_key_hints,
            screen: Rect::default(),
            exit: None,
        };
        app.absorb_notices();
        app
    }

    pub fn should_quit(&self) -> bool {
        self.exit.is_some()
    }

    /// Move pending editor notices into the status row. The latest wins.
    pub fn absorb_notices(&mut self) {
        if let Some(last) = self.editor.take_notices().pop() {
            self.status = Some(last);
        }
    }

    /// Keep both cursors on char boundaries after the buffers were replaced.
    pub fn clamp_cursors(&mut self) {
        self.title_cursor = clamp_to_boundary(self.editor.title(), self.title_cursor);
        self.body_cursor = clamp_to_boundary(self.editor.body(), self.body_cursor);
    }

    /// The focused buffer and its cursor.
    pub fn focused_mut(&mut self) -> (&mut String, &mut usize) {
        match self.focus {
            Focus::Title => (self.editor.title_mut(), &mut self.title_cursor),
            Focus::Body => (self.editor.body_mut(), &mut self.body_cursor),
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Title => Focus::Body,
            Focus::Body => Focus::Title,
        };
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    pub fn save(&mut self) {
        let result = self.editor.save();
        self.absorb_notices();
        self.exit = Some(result);
    }

    pub fn delete(&mut self) {
        let result = self.editor.delete();
        self.absorb_notices();
        self.exit = Some(result);
    }

    pub fn close(&mut self) {
        let result = self.editor.finish();
        self.absorb_notices();
        self.exit = Some(result);
    }

    pub fn revert(&mut self) {
        if !self.editor.can_revert() {
            return;
        }
        self.editor.revert();
        self.title_cursor = self.editor.title().len();
        self.body_cursor = self.editor.body().len();
    }

    /// Open the category picker, or explain the CLI route when the screen is
    /// too small to show it.
    pub fn open_picker(&mut self) {
        if !category_picker::fits(self.screen) {
            let target = self
                .editor
                .reference()
                .map_or_else(|| "<REF>".to_string(), |r| r.id().to_string());
            self.status = Some(Notice {
                level: NoticeLevel::Info,
                message: format!(
                    "Screen too small for the category picker; use `np category {} <LABEL>`",
                    target
                ),
            });
            return;
        }
        self.picker = Some(CategoryPickerState::new(self.editor.category()));
    }

    pub fn close_picker(&mut self, outcome: PickerOutcome) {
        self.picker = None;
        if let PickerOutcome::Selected(category) = outcome {
            self.editor.set_category(category);
            self.absorb_notices();
        }
    }

    pub fn focus_lost(&mut self) {
        self.editor.pause(false);
        self.absorb_notices();
    }

    pub fn focus_gained(&mut self) {
        self.editor.resume();
        self.clamp_cursors();
        self.absorb_notices();
    }
}

fn clamp_to_boundary(s: &str, cursor: usize) -> usize {
    let mut c = cursor.min(s.len());
    while !s.is_char_boundary(c) {
        c -= 1;
    }
    c
}

/// Run the editor screen until it closes and return its result.
pub fn run<S: NoteStore>(
    editor: NoteEditor<S>,
    ui: &UiConfig,
) -> Result<ExitResult, Box<dyn std::error::Error>> {
    let mut app = App::new(editor, ui);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableFocusChange,
        EnableBracketedPaste
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            DisableBracketedPaste,
            DisableFocusChange,
            LeaveAlternateScreen
        );
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // A broken terminal still gets the pause flush
    if app.exit.is_none() {
        app.close();
    }

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        DisableFocusChange,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result?;
    app.exit
        .take()
        .ok_or_else(|| "editor closed without a result".into())
}

fn run_event_loop<S: NoteStore>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<S>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => input::handle_key(app, key),
                Event::Paste(text) => input::handle_paste(app, &text),
                Event::FocusLost => app.focus_lost(),
                Event::FocusGained => app.focus_gained(),
                _ => {}
            }
        }

        if app.should_quit() {
            break;
        }
    }
    Ok(())
}
