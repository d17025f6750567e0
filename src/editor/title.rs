use crate::model::config::EditorConfig;

/// A title with no visible characters counts as blank.
pub fn is_blank_title(title: &str) -> bool {
    title.trim().is_empty()
}

/// Derive a title from the note body.
///
/// Bodies of at most `max_chars` characters are used whole. Longer bodies are
/// cut to `max_chars` characters and then back to the last whitespace inside
/// the cut, unless that whitespace is the very first character or there is
/// none, in which case the raw cut stands. An empty body yields `untitled`.
pub fn generate_title(body: &str, max_chars: usize, untitled: &str) -> String {
    if body.trim().is_empty() {
        return untitled.to_string();
    }
    if body.chars().count() <= max_chars {
        return body.to_string();
    }

    let prefix: Vec<char> = body.chars().take(max_chars).collect();
    match prefix.iter().rposition(|c| c.is_whitespace()) {
        Some(idx) if idx > 0 => prefix[..idx].iter().collect(),
        _ => prefix.into_iter().collect(),
    }
}

/// The title to store: the user's title verbatim unless it is blank.
pub fn resolve_title(title: &str, body: &str, config: &EditorConfig) -> String {
    if is_blank_title(title) {
        generate_title(body, config.title_chars, &config.untitled)
    } else {
        title.to_string()
    }
}
