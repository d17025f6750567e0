pub mod category_picker;
pub mod lined_text;
pub mod status_row;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::io::store::NoteStore;
use crate::util::unicode;

use self::lined_text::LinedTextField;
use super::app::{App, Focus};

/// Main render function: header, title field, body field, status row
pub fn render<S: NoteStore>(frame: &mut Frame, app: &mut App<S>) {
    let area = frame.area();
    app.screen = area;

    let bg = app.theme.background;
    frame.render_widget(Block::default().style(Style::default().bg(bg)), area);

    let chunks = Layout::vertical([
        Constraint::Length(1), // header
        Constraint::Length(1),
        Constraint::Length(2), // title + rule
        Constraint::Length(1),
        Constraint::Min(1), // body
        Constraint::Length(1), // status row
    ])
    .split(area);

    render_header(frame, app, chunks[0]);

    let text_style = Style::default().fg(app.theme.text_bright).bg(bg);
    let placeholder_style = Style::default().fg(app.theme.dim).bg(bg);
    let rule_style = Style::default().fg(app.theme.rule).bg(bg);

    let mut title = LinedTextField::new(app.editor.title())
        .style(text_style.add_modifier(Modifier::BOLD))
        .rule_style(rule_style)
        .placeholder("Title", placeholder_style);
    if app.focus == Focus::Title {
        title = title.cursor(app.title_cursor);
    }
    frame.render_stateful_widget(title, inset(chunks[2]), &mut app.title_view);

    let mut body = LinedTextField::new(app.editor.body())
        .style(text_style)
        .rule_style(rule_style)
        .placeholder("Note", placeholder_style);
    if app.focus == Focus::Body {
        body = body.cursor(app.body_cursor);
    }
    frame.render_stateful_widget(body, inset(chunks[4]), &mut app.body_view);

    if let Some(picker) = &app.picker {
        category_picker::render_category_picker(
            frame,
            picker,
            app.editor.category(),
            &app.theme,
            area,
        );
    } else {
        let cursor = match app.focus {
            Focus::Title => app.title_view.cursor_position,
            Focus::Body => app.body_view.cursor_position,
        };
        if let Some(position) = cursor {
            frame.set_cursor_position(position);
        }
    }

    status_row::render_status_row(frame, app, chunks[5]);
}

/// One cell of margin on each side.
fn inset(area: Rect) -> Rect {
    Rect {
        x: area.x + 1,
        width: area.width.saturating_sub(2),
        ..area
    }
}

/// Screen title on the left, category badge on the right.
fn render_header<S: NoteStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let category = app.editor.category();
    let badge = format!("[{}] ", category);
    let badge_w = unicode::display_width(&badge);

    let title = unicode::truncate_to_width(
        &format!(" {}", app.editor.screen_title()),
        width.saturating_sub(badge_w + 1),
    );
    let title_w = unicode::display_width(&title);

    let mut spans = vec![Span::styled(
        title,
        Style::default()
            .fg(app.theme.text)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )];
    if title_w + badge_w <= width {
        spans.push(Span::styled(
            " ".repeat(width - title_w - badge_w),
            Style::default().bg(bg),
        ));
        spans.push(Span::styled(
            badge,
            Style::default().fg(app.theme.category_color(category)).bg(bg),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::test_helpers::*;
    use super::*;
    use crate::tui::app::CategoryPickerState;
    use pretty_assertions::assert_eq;
    use ratatui::layout::Position;

    fn rule() -> String {
        format!(" {}", "\u{2500}".repeat(TERM_W as usize - 2))
    }

    #[test]
    fn editing_screen() {
        let mut app = app_editing("Groceries", "milk\neggs");
        let output = render_to_string(TERM_W, TERM_H, |frame, _| render(frame, &mut app));

        let mut expected = vec![
            format!(" Edit: Groceries{}[Other]", " ".repeat(36)),
            String::new(),
            " Groceries".to_string(),
            rule(),
            String::new(),
            " milk".to_string(),
            rule(),
            " eggs".to_string(),
            rule(),
        ];
        expected.extend(std::iter::repeat_n(String::new(), 6));
        expected.push(" ^S save  ^D delete  ^T category  Esc close".to_string());
        assert_eq!(output, expected.join("\n"));

        assert_eq!(app.body_view.cursor_position, Some(Position::new(5, 7)));
        assert_eq!(app.screen, Rect::new(0, 0, TERM_W, TERM_H));
    }

    #[test]
    fn new_note_shows_placeholders() {
        let mut app = app_inserting();
        let output = render_to_string(TERM_W, 8, |frame, _| render(frame, &mut app));
        let expected = [
            format!(" New note{}[Other]", " ".repeat(43)),
            String::new(),
            " Title".to_string(),
            rule(),
            String::new(),
            " Note".to_string(),
            rule(),
            " ^S save  ^D delete  ^T category  Esc close".to_string(),
        ];
        assert_eq!(output, expected.join("\n"));
    }

    #[test]
    fn revert_hint_appears_after_body_changes() {
        let mut app = app_editing("t", "b");
        app.editor.body_mut().push('!');
        let output = render_to_string(TERM_W, 8, |frame, _| render(frame, &mut app));
        assert!(output.ends_with(" ^S save  ^R revert  ^D delete  ^T category  Esc close"));
    }

    #[test]
    fn picker_overlays_the_editor() {
        let mut app = app_editing("t", "b");
        app.picker = Some(CategoryPickerState { cursor: 4 });
        let output = render_to_string(TERM_W, TERM_H, |frame, _| render(frame, &mut app));
        assert!(output.contains("Category"));
        assert!(output.contains("\u{25B6} Other"));
    }
}
