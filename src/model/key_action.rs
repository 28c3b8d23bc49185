//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that key bindings map onto.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by `KeyBindings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Open the search modal and focus the input. Default: Ctrl+K / Cmd+K
    OpenSearch,
    /// Close the search modal. Default: Esc
    CloseSearch,
    /// Move selection down one result. Default: ↓
    SelectNext,
    /// Move selection up one result. Default: ↑
    SelectPrev,
    /// Invoke the selected result's primary action. Default: Enter
    Activate,
    /// Reset the query to empty. Default: Ctrl+U
    ClearQuery,
    /// Exit the application. Default: Ctrl+C, q (while closed)
    Quit,
}

impl KeyAction {
    /// Whether the action moves the selection cursor.
    ///
    /// Selection keys are always swallowed by the binder, even while the
    /// modal is closed, so they never reach the text input.
    pub fn is_selection_move(self) -> bool {
        matches!(self, KeyAction::SelectNext | KeyAction::SelectPrev)
    }
}
