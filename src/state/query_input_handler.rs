//! Query text editing (pure state transitions).
//!
//! The cursor is counted in characters, not bytes, so multi-byte input
//! never splits a code point.

/// Raw query text plus the text-cursor position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryInput {
    text: String,
    cursor: usize,
}

impl QueryInput {
    /// Empty query, cursor at 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Input pre-filled with `text`, cursor at the end.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    /// The query text as typed.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// True when nothing has been typed.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map_or(self.text.len(), |(i, _)| i)
    }
}

/// Insert `ch` at the cursor and advance the cursor.
pub fn handle_char_input(mut input: QueryInput, ch: char) -> QueryInput {
    let at = input.byte_offset(input.cursor);
    input.text.insert(at, ch);
    input.cursor += 1;
    input
}

/// Delete the character before the cursor. No-op at position 0.
pub fn handle_backspace(mut input: QueryInput) -> QueryInput {
    if input.cursor > 0 {
        let at = input.byte_offset(input.cursor - 1);
        input.text.remove(at);
        input.cursor -= 1;
    }
    input
}

/// Delete the character under the cursor. No-op at the end.
pub fn handle_delete(mut input: QueryInput) -> QueryInput {
    if input.cursor < input.char_len() {
        let at = input.byte_offset(input.cursor);
        input.text.remove(at);
    }
    input
}

/// Move cursor left by one, saturating at 0.
pub fn handle_cursor_left(mut input: QueryInput) -> QueryInput {
    input.cursor = input.cursor.saturating_sub(1);
    input
}

/// Move cursor right by one, saturating at the end.
pub fn handle_cursor_right(mut input: QueryInput) -> QueryInput {
    input.cursor = (input.cursor + 1).min(input.char_len());
    input
}

/// Move the cursor to the start.
pub fn handle_cursor_home(mut input: QueryInput) -> QueryInput {
    input.cursor = 0;
    input
}

/// Move the cursor past the last character.
pub fn handle_cursor_end(mut input: QueryInput) -> QueryInput {
    input.cursor = input.char_len();
    input
}

/// Reset the query to empty.
pub fn clear_query(_input: QueryInput) -> QueryInput {
    QueryInput::new()
}

// ===== Tests =====

#[cfg(test)]
#[path = "query_input_handler_tests.rs"]
mod tests;
