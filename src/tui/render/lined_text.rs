use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;
use ratatui::widgets::StatefulWidget;

use crate::tui::wrap::{self, VisualRow};

const RULE: &str = "\u{2500}";

/// Scroll position of a [`LinedTextField`], kept by the app between frames.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinedTextState {
    /// First visual row shown
    pub scroll: usize,
    /// Text width used by the last render, for cursor movement
    pub width: usize,
    /// Where the terminal cursor belongs after the last render
    pub cursor_position: Option<Position>,
}

/// Notepad-style text area: every row of text sits on a ruled line.
///
/// Soft-wraps the text to the area width and draws a rule one cell below
/// each visible row. Holds no note data; the text is borrowed per frame.
pub struct LinedTextField<'a> {
    text: &'a str,
    cursor: Option<usize>,
    placeholder: &'a str,
    style: Style,
    placeholder_style: Style,
    rule_style: Style,
}

impl<'a> LinedTextField<'a> {
    pub fn new(text: &'a str) -> Self {
        LinedTextField {
            text,
            cursor: None,
            placeholder: "",
            style: Style::default(),
            placeholder_style: Style::default(),
            rule_style: Style::default(),
        }
    }

    /// Track the cursor at byte offset `cursor`, scrolling it into view.
    pub fn cursor(mut self, cursor: usize) -> Self {
        self.cursor = Some(cursor);
        self
    }

    pub fn placeholder(mut self, text: &'a str, style: Style) -> Self {
        self.placeholder = text;
        self.placeholder_style = style;
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn rule_style(mut self, style: Style) -> Self {
        self.rule_style = style;
        self
    }
}

/// Text rows that fit in `height` screen rows. The last text row may go
/// without its rule when the height is odd.
pub fn visible_rows(height: u16) -> usize {
    (height as usize).div_ceil(2)
}

/// Adjust `scroll` so that `row` lies inside a window of `visible` rows.
pub fn scroll_to_row(scroll: usize, row: usize, visible: usize) -> usize {
    if visible == 0 {
        return row;
    }
    if row < scroll {
        row
    } else if row >= scroll + visible {
        row + 1 - visible
    } else {
        scroll
    }
}

impl StatefulWidget for LinedTextField<'_> {
    type State = LinedTextState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut LinedTextState) {
        state.width = area.width as usize;
        state.cursor_position = None;
        if area.width == 0 || area.height == 0 {
            return;
        }
        buf.set_style(area, self.style);

        let width = area.width as usize;
        let rows: Vec<VisualRow> = wrap::wrap_text(self.text, width);
        let visible = visible_rows(area.height);

        let cursor_row = self.cursor.map(|c| wrap::cursor_row(&rows, c));
        if let Some(row) = cursor_row {
            state.scroll = scroll_to_row(state.scroll, row, visible);
        }
        state.scroll = state.scroll.min(rows.len().saturating_sub(1));

        let rule_line = RULE.repeat(width);
        for (i, row) in rows.iter().skip(state.scroll).take(visible).enumerate() {
            let y = area.y + (i as u16) * 2;
            buf.set_stringn(area.x, y, &self.text[row.start..row.end], width, self.style);
            if y + 1 < area.bottom() {
                buf.set_stringn(area.x, y + 1, &rule_line, width, self.rule_style);
            }
        }

        if self.text.is_empty() && !self.placeholder.is_empty() {
            buf.set_stringn(area.x, area.y, self.placeholder, width, self.placeholder_style);
        }

        if let (Some(cursor), Some(row)) = (self.cursor, cursor_row) {
            let col = wrap::cursor_col(self.text, &rows, cursor).min(width.saturating_sub(1));
            let y = area.y + ((row - state.scroll) as u16) * 2;
            state.cursor_position = Some(Position::new(area.x + col as u16, y));
        }
    }
}
