use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

const TAB_CELLS: usize = 4;
const ELLIPSIS: char = '\u{2026}';

fn cells(g: &str) -> usize {
    if g == "\t" {
        TAB_CELLS
    } else {
        UnicodeWidthStr::width(g)
    }
}

fn is_space(g: &str) -> bool {
    g.chars().all(char::is_whitespace)
}

/// Terminal cells taken by `s`. A tab counts as four cells.
pub fn display_width(s: &str) -> usize {
    s.graphemes(true).map(cells).sum()
}

/// Fit `s` into `max_cells`, ending with `…` when something had to go.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    if max_cells == 0 {
        return String::new();
    }
    let mut used = 0;
    let mut out = String::new();
    for g in s.graphemes(true) {
        let w = cells(g);
        if used + w > max_cells - 1 {
            break;
        }
        used += w;
        out.push_str(g);
    }
    out.push(ELLIPSIS);
    out
}

/// Byte offset of the grapheme after the one at `offset`, `None` at the end.
pub fn next_grapheme_boundary(s: &str, offset: usize) -> Option<usize> {
    let g = s.get(offset..)?.graphemes(true).next()?;
    Some(offset + g.len())
}

/// Byte offset of the grapheme before `offset`, `None` at the start.
pub fn prev_grapheme_boundary(s: &str, offset: usize) -> Option<usize> {
    let g = s.get(..offset)?.graphemes(true).next_back()?;
    Some(offset - g.len())
}

/// Byte offset of the grapheme covering display column `col`. Columns past
/// the end map to `s.len()`.
pub fn display_col_to_byte_offset(s: &str, col: usize) -> usize {
    let mut used = 0;
    for (i, g) in s.grapheme_indices(true) {
        used += cells(g);
        if used > col {
            return i;
        }
    }
    s.len()
}

/// Start of the word left of `offset`, skipping whitespace first.
pub fn word_boundary_left(s: &str, offset: usize) -> usize {
    let mut graphemes = s[..offset].grapheme_indices(true).rev().peekable();
    while graphemes.next_if(|(_, g)| is_space(g)).is_some() {}
    let mut start = offset;
    while let Some((i, _)) = graphemes.next_if(|(_, g)| !is_space(g)) {
        start = i;
    }
    if start == offset {
        // only whitespace before the cursor
        return 0;
    }
    start
}

/// Start of the next word right of `offset`.
pub fn word_boundary_right(s: &str, offset: usize) -> usize {
    let mut graphemes = s[offset..].grapheme_indices(true).peekable();
    while graphemes.next_if(|(_, g)| !is_space(g)).is_some() {}
    while graphemes.next_if(|(_, g)| is_space(g)).is_some() {}
    graphemes.peek().map_or(s.len(), |(i, _)| offset + i)
}
