use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::editor::NoticeLevel;
use crate::io::store::NoteStore;
use crate::tui::app::App;
use crate::util::unicode;

/// Render the status row (bottom of screen): the latest notice, otherwise
/// the key hints.
pub fn render_status_row<S: NoteStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let line = if let Some(notice) = &app.status {
        let fg = match notice.level {
            NoticeLevel::Info => app.theme.text_bright,
            NoticeLevel::Error => app.theme.red,
        };
        Line::from(Span::styled(
            unicode::truncate_to_width(&format!(" {}", notice.message), width),
            Style::default().fg(fg).bg(bg),
        ))
    } else if app.show_key_hints && app.picker.is_none() {
        let mut hint = String::from(" ^S save  ");
        if app.editor.can_revert() {
            hint.push_str("^R revert  ");
        }
        hint.push_str("^D delete  ^T category  Esc close");
        Line::from(Span::styled(
            unicode::truncate_to_width(&hint, width),
            Style::default().fg(app.theme.dim).bg(bg),
        ))
    } else {
        Line::from(Span::styled(" ".repeat(width), Style::default().bg(bg)))
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::Notice;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn notice_replaces_hints() {
        let mut app = app_inserting();
        app.status = Some(Notice {
            level: NoticeLevel::Error,
            message: "Could not save the note".into(),
        });
        let output = render_to_string(40, 1, |frame, area| {
            render_status_row(frame, &app, area);
        });
        assert_eq!(output, " Could not save the note");
    }

    #[test]
    fn hints_can_be_turned_off() {
        let mut app = app_inserting();
        app.show_key_hints = false;
        let output = render_to_string(40, 1, |frame, area| {
            render_status_row(frame, &app, area);
        });
        assert_eq!(output, "");
    }

    #[test]
    fn hints_truncate_to_width() {
        let app = app_inserting();
        let output = render_to_string(12, 1, |frame, area| {
            render_status_row(frame, &app, area);
        });
        assert_eq!(output, " ^S save  ^\u{2026}");
    }
}
