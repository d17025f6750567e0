use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::model::Category;
use crate::tui::app::CategoryPickerState;
use crate::tui::theme::Theme;
use crate::util::unicode;

const INNER_W: usize = 22;
const HINT: &str = " \u{2191}\u{2193}/jk  Enter  Esc";

/// Popup size including borders: blank, five labels, blank, hints.
pub const POPUP_W: u16 = INNER_W as u16 + 2;
pub const POPUP_H: u16 = Category::ALL.len() as u16 + 3 + 2;

/// Whether the picker can be drawn inside `area`.
pub fn fits(area: Rect) -> bool {
    area.width >= POPUP_W && area.height >= POPUP_H
}

/// Render the category picker centered in `area`.
pub fn render_category_picker(
    frame: &mut Frame,
    picker: &CategoryPickerState,
    current: Category,
    theme: &Theme,
    area: Rect,
) {
    if !fits(area) {
        return;
    }
    let bg = theme.background;
    let bg_style = Style::default().bg(bg);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(" ".repeat(INNER_W), bg_style)));

    for (i, category) in Category::ALL.iter().enumerate() {
        let is_selected = i == picker.cursor;
        let row_bg = if is_selected { theme.selection_bg } else { bg };
        let row_pad = Style::default().bg(row_bg);

        let indicator = if is_selected { " \u{25B6} " } else { "   " };
        let mut label_style = Style::default()
            .fg(theme.category_color(*category))
            .bg(row_bg);
        if is_selected {
            label_style = label_style.add_modifier(Modifier::BOLD);
        }
        let mut spans = vec![
            Span::styled(indicator, Style::default().fg(theme.text_bright).bg(row_bg)),
            Span::styled(category.label(), label_style),
        ];
        if *category == current {
            spans.push(Span::styled(" \u{2022}", Style::default().fg(theme.dim).bg(row_bg)));
        }
        pad_to_width(&mut spans, INNER_W, row_pad);
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(Span::styled(" ".repeat(INNER_W), bg_style)));
    let mut hint_spans = vec![Span::styled(HINT, Style::default().fg(theme.dim).bg(bg))];
    pad_to_width(&mut hint_spans, INNER_W, bg_style);
    lines.push(Line::from(hint_spans));

    let x = area.x + area.width.saturating_sub(POPUP_W) / 2;
    let y = area.y + area.height.saturating_sub(POPUP_H) / 2;
    let popup_area = Rect::new(x, y, POPUP_W, POPUP_H);

    frame.render_widget(Clear, popup_area);

    let title_style = Style::default()
        .fg(theme.text)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let block = Block::default()
        .title(Span::styled(" Category ", title_style))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.text).bg(bg))
        .style(bg_style);

    frame.render_widget(Paragraph::new(lines).block(block).style(bg_style), popup_area);
}

/// Pad spans to fill `target_width` with background.
fn pad_to_width(spans: &mut Vec<Span<'_>>, target_width: usize, pad_style: Style) {
    let used: usize = spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum();
    if used < target_width {
        spans.push(Span::styled(" ".repeat(target_width - used), pad_style));
    }
}
