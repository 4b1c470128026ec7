use regex::Regex;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

lazy_static::lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("whitespace pattern is valid");
}

/// Shorten to at most `max_len` characters, ending in "..." when cut.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    let keep = max_len.saturating_sub(3);
    let head: String = s.chars().take(keep).collect();
    format!("{}...", head)
}

/// Lowercase, trim and collapse runs of whitespace.
pub fn normalize_answer(s: &str) -> String {
    WHITESPACE
        .replace_all(s.trim(), " ")
        .to_lowercase()
}

/// Break text into the visual lines ratatui draws with `Wrap { trim: true }`.
/// Each entry is (trimmed text, start byte, end byte).
fn simulate_wrapped_lines(text: &str, max_width: usize) -> Vec<(String, usize, usize)> {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut width = 0;
    let mut start = 0;

    for (idx, ch) in text.char_indices() {
        if ch == '\n' {
            lines.push((line.trim_end().to_string(), start, idx));
            line.clear();
            width = 0;
            start = idx + 1;
            continue;
        }
        let ch_width = ch.width().unwrap_or(1);
        if width + ch_width > max_width && width > 0 {
            lines.push((line.trim_end().to_string(), start, idx));
            line = ch.to_string();
            width = ch_width;
            start = idx;
        } else {
            line.push(ch);
            width += ch_width;
        }
    }

    if !line.is_empty() || text.ends_with('\n') {
        lines.push((line.trim_end().to_string(), start, text.len()));
    }
    lines
}

/// (line, column) of the byte offset `cursor_index` once `text` is wrapped at
/// `max_width`. The column is a display width, not a byte count.
pub fn calculate_wrapped_cursor_position(
    text: &str,
    cursor_index: usize,
    max_width: usize,
) -> (usize, usize) {
    if text.is_empty() || cursor_index == 0 {
        return (0, 0);
    }

    let lines = simulate_wrapped_lines(text, max_width);
    if let Some((row, (_, start, _))) = lines
        .iter()
        .enumerate()
        .find(|(_, (_, start, end))| cursor_index >= *start && cursor_index <= *end)
    {
        let column = text.get(*start..cursor_index).map_or(0, |s| s.width());
        return (row, column);
    }

    match lines.last() {
        Some((last, _, _)) => (lines.len() - 1, last.width()),
        None => (0, 0),
    }
}
