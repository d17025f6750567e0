use unicode_segmentation::UnicodeSegmentation;

use crate::util::unicode;

/// A single screen row produced by soft-wrapping a text buffer.
///
/// Offsets are absolute byte offsets into the whole buffer. `end` is
/// exclusive and never includes the newline that ends a logical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualRow {
    pub start: usize,
    pub end: usize,
    /// True for the first row of a logical line
    pub is_first: bool,
}

fn is_whitespace(g: &str) -> bool {
    g.chars().all(char::is_whitespace)
}

fn grapheme_width(g: &str) -> usize {
    unicode::display_width(g)
}

/// Wrap one logical line that starts at byte `offset` of the buffer.
///
/// Rows break after whitespace when possible and fall back to breaking
/// between graphemes for tokens wider than the field. Whitespace at a break
/// point stays on the row it ends, even if it overhangs the width.
fn wrap_line(line: &str, offset: usize, width: usize, out: &mut Vec<VisualRow>) {
    let first_index = out.len();
    let push = |out: &mut Vec<VisualRow>, start: usize, end: usize| {
        out.push(VisualRow {
            start: offset + start,
            end: offset + end,
            is_first: out.len() == first_index,
        });
    };

    if width == 0 || unicode::display_width(line) <= width {
        push(out, 0, line.len());
        return;
    }

    let mut row_start = 0;
    let mut col = 0;
    // Byte just after the last whitespace on this row, and the column there
    let mut last_break: Option<(usize, usize)> = None;

    for (i, g) in line.grapheme_indices(true) {
        let w = grapheme_width(g);
        let ws = is_whitespace(g);
        while !ws && col > 0 && col + w > width {
            match last_break.take() {
                Some((at, at_col)) if at > row_start => {
                    push(out, row_start, at);
                    row_start = at;
                    col -= at_col;
                }
                _ => {
                    push(out, row_start, i);
                    row_start = i;
                    col = 0;
                }
            }
        }
        col += w;
        if ws {
            last_break = Some((i + g.len(), col));
        }
    }
    push(out, row_start, line.len());
}

/// Wrap a whole buffer into screen rows. An empty buffer yields one empty row.
pub fn wrap_text(text: &str, width: usize) -> Vec<VisualRow> {
    let mut rows = Vec::new();
    let mut offset = 0;
    for line in text.split('\n') {
        wrap_line(line, offset, width, &mut rows);
        offset += line.len() + 1;
    }
    rows
}

/// Index of the row that shows the cursor at byte `cursor`.
///
/// At a soft-wrap point the cursor belongs to the following row.
pub fn cursor_row(rows: &[VisualRow], cursor: usize) -> usize {
    rows.iter()
        .rposition(|r| r.start <= cursor)
        .unwrap_or(0)
}

/// Display column of the cursor within its row.
pub fn cursor_col(text: &str, rows: &[VisualRow], cursor: usize) -> usize {
    match rows.get(cursor_row(rows, cursor)) {
        Some(row) => unicode::display_width(&text[row.start..cursor.clamp(row.start, row.end)]),
        None => 0,
    }
}

/// Byte offset for display column `col` on row `row`, snapped to a grapheme.
pub fn offset_at(text: &str, rows: &[VisualRow], row: usize, col: usize) -> usize {
    let Some(r) = rows.get(row) else {
        return text.len();
    };
    let offset = r.start + unicode::display_col_to_byte_offset(&text[r.start..r.end], col);
    let soft_wrapped = rows.get(row + 1).is_some_and(|next| next.start == r.end);
    if soft_wrapped && offset == r.end && offset > r.start {
        // The row end is the next row's start; stay on this row
        unicode::prev_grapheme_boundary(text, offset).unwrap_or(r.start)
    } else {
        offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_texts<'a>(text: &'a str, rows: &[VisualRow]) -> Vec<&'a str> {
        rows.iter().map(|r| &text[r.start..r.end]).collect()
    }

    #[test]
    fn no_wrap_needed() {
        let rows = wrap_text("hello world", 80);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0], VisualRow { start: 0, end: 11, is_first: true });
    }

    #[test]
    fn empty_buffer_has_one_row() {
        assert_eq!(wrap_text("", 10), vec![VisualRow { start: 0, end: 0, is_first: true }]);
    }

    #[test]
    fn wrap_after_space() {
        let text = "hello world";
        let rows = wrap_text(text, 7);
        assert_eq!(row_texts(text, &rows), vec!["hello ", "world"]);
        assert!(rows[0].is_first);
        assert!(!rows[1].is_first);
    }

    #[test]
    fn space_at_edge_overhangs() {
        let text = "hello world";
        let rows = wrap_text(text, 5);
        assert_eq!(row_texts(text, &rows), vec!["hello ", "world"]);
    }

    #[test]
    fn long_token_breaks_between_graphemes() {
        let text = "abcdefghij";
        let rows = wrap_text(text, 4);
        assert_eq!(row_texts(text, &rows), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn logical_lines_start_new_rows() {
        let text = "one\n\nthree";
        let rows = wrap_text(text, 20);
        assert_eq!(row_texts(text, &rows), vec!["one", "", "three"]);
        assert!(rows.iter().all(|r| r.is_first));
        assert_eq!(rows[2].start, 5);
    }

    #[test]
    fn wide_characters() {
        let text = "你好世界";
        let rows = wrap_text(text, 5);
        assert_eq!(row_texts(text, &rows), vec!["你好", "世界"]);
    }

    #[test]
    fn cursor_at_soft_wrap_moves_to_next_row() {
        let text = "hello world";
        let rows = wrap_text(text, 7);
        assert_eq!(cursor_row(&rows, 5), 0);
        assert_eq!(cursor_row(&rows, 6), 1);
        assert_eq!(cursor_col(text, &rows, 6), 0);
        assert_eq!(cursor_col(text, &rows, 8), 2);
    }

    #[test]
    fn cursor_at_line_end_stays() {
        let text = "ab\ncd";
        let rows = wrap_text(text, 10);
        assert_eq!(cursor_row(&rows, 2), 0);
        assert_eq!(cursor_col(text, &rows, 2), 2);
        assert_eq!(cursor_row(&rows, 3), 1);
    }

    #[test]
    fn offset_at_clamps_within_row() {
        let text = "hello world";
        let rows = wrap_text(text, 7);
        assert_eq!(offset_at(text, &rows, 1, 2), 8);
        assert_eq!(offset_at(text, &rows, 1, 40), 11);
        // end of a soft-wrapped row steps back onto it
        assert_eq!(offset_at(text, &rows, 0, 40), 5);
        assert_eq!(offset_at(text, &rows, 9, 0), 11);
    }
}
