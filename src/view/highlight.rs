//! Match highlighting and width-aware text shaping for result rows.

use crate::state::SearchPattern;
use ratatui::style::Style;
use ratatui::text::Span;
use std::borrow::Cow;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: char = '…';

/// Collapse runs of whitespace (including newlines) into single spaces.
pub fn flatten_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cut `text` to at most `max_width` terminal columns, ending in `…` when cut.
pub fn truncate_to_width(text: &str, max_width: usize) -> Cow<'_, str> {
    if text.width() <= max_width {
        return Cow::Borrowed(text);
    }
    if max_width == 0 {
        return Cow::Owned(String::new());
    }

    let budget = max_width - 1;
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push(ELLIPSIS);
    Cow::Owned(out)
}

/// One-line excerpt of `text` starting shortly before the first match.
///
/// Keeps up to `lead_chars` characters of context in front of the match and
/// marks skipped text with a leading `…`. Without a match the excerpt starts
/// at the beginning.
pub fn excerpt(text: &str, pattern: Option<&SearchPattern>, lead_chars: usize) -> String {
    let flat = flatten_whitespace(text);
    let first_match = pattern.and_then(|p| p.match_ranges(&flat).first().map(|r| r.start));

    let Some(start) = first_match else {
        return flat;
    };

    let chars_before = flat[..start].chars().count();
    let skip = chars_before.saturating_sub(lead_chars);
    if skip == 0 {
        return flat;
    }

    let tail: String = flat.chars().skip(skip).collect();
    format!("{ELLIPSIS}{tail}")
}

/// Split `text` into spans, patching `highlight` onto every match.
pub fn highlight_spans(
    text: &str,
    pattern: Option<&SearchPattern>,
    base: Style,
    highlight: Style,
) -> Vec<Span<'static>> {
    let Some(pattern) = pattern else {
        return vec![Span::styled(text.to_string(), base)];
    };

    let mut spans = Vec::new();
    let mut last = 0;
    for range in pattern.match_ranges(text) {
        if range.start > last {
            spans.push(Span::styled(text[last..range.start].to_string(), base));
        }
        spans.push(Span::styled(
            text[range.start..range.end].to_string(),
            base.patch(highlight),
        ));
        last = range.end;
    }
    if last < text.len() {
        spans.push(Span::styled(text[last..].to_string(), base));
    }
    spans
}
