//! Unicode-safe text utilities for message listings.

/// Default width of a one-line message summary.
pub const DEFAULT_SUMMARY_WIDTH: usize = 80;

/// Truncate `text` to at most `max_chars` Unicode scalar values,
/// appending `suffix` if truncation occurred.
///
/// Uses `char_indices().nth(max_chars)` — compatible with MSRV 1.85.
pub fn truncate_chars(text: &str, max_chars: usize, suffix: &str) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => {
            let mut result = text[..byte_idx].to_string();
            result.push_str(suffix);
            result
        }
        None => text.to_string(),
    }
}

/// One-line summary of a message body, at most `width` characters.
///
/// Takes the first line with runs of whitespace collapsed (`(empty)` if
/// blank). Over-long lines end in `…`; multi-line bodies get a trailing
/// ` …` when it fits.
pub fn summarize(content: &str, width: usize) -> String {
    let mut lines = content.lines();
    let first_line = lines.next().unwrap_or("");
    let more = lines.next().is_some();

    let mut first = first_line.split_whitespace().collect::<Vec<_>>().join(" ");
    if first.is_empty() {
        first = "(empty)".to_string();
    }

    let len = first.chars().count();
    if len > width || (more && len + 2 > width) {
        return truncate_chars(&first, width.saturating_sub(1), "…");
    }
    if more {
        first.push_str(" …");
    }
    first
}
