//! Translate raw terminal key events into the widget's vocabulary.
//!
//! The binder decides *what* a key means; state changes happen in
//! `AppState` and the navigation reducer.

use crate::config::KeyBindings;
use crate::model::KeyAction;
use crate::state::query_input_handler::{self as edit, QueryInput};
use crate::state::{NavEvent, NavigationState};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Text-editing command for the query input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditCommand {
    /// Insert a character at the cursor.
    Insert(char),
    /// Delete the character before the cursor.
    Backspace,
    /// Delete the character under the cursor.
    Delete,
    /// Move the cursor left.
    Left,
    /// Move the cursor right.
    Right,
    /// Jump to the start of the query.
    Home,
    /// Jump to the end of the query.
    End,
}

impl EditCommand {
    /// Apply the command to `input`.
    pub fn apply(self, input: QueryInput) -> QueryInput {
        match self {
            EditCommand::Insert(ch) => edit::handle_char_input(input, ch),
            EditCommand::Backspace => edit::handle_backspace(input),
            EditCommand::Delete => edit::handle_delete(input),
            EditCommand::Left => edit::handle_cursor_left(input),
            EditCommand::Right => edit::handle_cursor_right(input),
            EditCommand::Home => edit::handle_cursor_home(input),
            EditCommand::End => edit::handle_cursor_end(input),
        }
    }
}

/// Meaning of a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundInput {
    /// Feed this event to the navigation reducer.
    Nav(NavEvent),
    /// Edit the query text.
    Edit(EditCommand),
    /// Reset the query to empty.
    ClearQuery,
    /// Leave the application.
    Quit,
    /// Not meaningful in the current state.
    Ignored,
}

/// Map `key` to its meaning given the current navigation state.
///
/// Order of precedence:
/// 1. Ctrl+C always quits.
/// 2. Arrow keys are always swallowed as selection moves, open or closed,
///    so they never move the text cursor.
/// 3. While open, plain characters and editing keys edit the query (so
///    typing `q` searches for "q" instead of quitting).
/// 4. Everything else goes through the key bindings.
pub fn bind_key(bindings: &KeyBindings, nav: &NavigationState, key: KeyEvent) -> BoundInput {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return BoundInput::Quit;
    }

    let action = bindings.get(key);
    let selection_move = action.is_some_and(KeyAction::is_selection_move);

    if nav.is_open() && !selection_move {
        if let Some(command) = edit_command_for(key) {
            return BoundInput::Edit(command);
        }
    }

    match action {
        Some(KeyAction::SelectNext) => BoundInput::Nav(NavEvent::ArrowDown),
        Some(KeyAction::SelectPrev) => BoundInput::Nav(NavEvent::ArrowUp),
        Some(KeyAction::OpenSearch) => BoundInput::Nav(NavEvent::Open),
        Some(KeyAction::CloseSearch) => BoundInput::Nav(NavEvent::Close),
        Some(KeyAction::Activate) => BoundInput::Nav(NavEvent::Activate),
        Some(KeyAction::ClearQuery) if nav.is_open() => BoundInput::ClearQuery,
        Some(KeyAction::Quit) if !nav.is_open() => BoundInput::Quit,
        Some(KeyAction::ClearQuery) | Some(KeyAction::Quit) | None => BoundInput::Ignored,
    }
}

fn edit_command_for(key: KeyEvent) -> Option<EditCommand> {
    let chord = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER;
    match key.code {
        KeyCode::Char(ch) if !key.modifiers.intersects(chord) => Some(EditCommand::Insert(ch)),
        KeyCode::Backspace => Some(EditCommand::Backspace),
        KeyCode::Delete => Some(EditCommand::Delete),
        KeyCode::Left => Some(EditCommand::Left),
        KeyCode::Right => Some(EditCommand::Right),
        KeyCode::Home => Some(EditCommand::Home),
        KeyCode::End => Some(EditCommand::End),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    fn open() -> NavigationState {
        NavigationState::from_parts(true, None)
    }

    fn closed() -> NavigationState {
        NavigationState::new()
    }

    #[test]
    fn ctrl_c_quits_in_any_state() {
        let b = KeyBindings::default();

        assert_eq!(bind_key(&b, &open(), ctrl('c')), BoundInput::Quit);
        assert_eq!(bind_key(&b, &closed(), ctrl('c')), BoundInput::Quit);
    }

    #[test]
    fn ctrl_k_opens_in_any_state() {
        let b = KeyBindings::default();

        assert_eq!(bind_key(&b, &closed(), ctrl('k')), BoundInput::Nav(NavEvent::Open));
        assert_eq!(bind_key(&b, &open(), ctrl('k')), BoundInput::Nav(NavEvent::Open));
    }

    #[test]
    fn cmd_k_opens() {
        let b = KeyBindings::default();
        let cmd_k = KeyEvent::new(KeyCode::Char('k'), KeyModifiers::SUPER);

        assert_eq!(bind_key(&b, &closed(), cmd_k), BoundInput::Nav(NavEvent::Open));
    }

    #[test]
    fn escape_closes() {
        let b = KeyBindings::default();

        assert_eq!(bind_key(&b, &open(), key(KeyCode::Esc)), BoundInput::Nav(NavEvent::Close));
        assert_eq!(bind_key(&b, &closed(), key(KeyCode::Esc)), BoundInput::Nav(NavEvent::Close));
    }

    #[test]
    fn arrows_are_intercepted_while_open() {
        let b = KeyBindings::default();

        assert_eq!(bind_key(&b, &open(), key(KeyCode::Down)), BoundInput::Nav(NavEvent::ArrowDown));
        assert_eq!(bind_key(&b, &open(), key(KeyCode::Up)), BoundInput::Nav(NavEvent::ArrowUp));
    }

    #[test]
    fn arrows_are_intercepted_while_closed() {
        let b = KeyBindings::default();

        assert_eq!(bind_key(&b, &closed(), key(KeyCode::Down)), BoundInput::Nav(NavEvent::ArrowDown));
        assert_eq!(bind_key(&b, &closed(), key(KeyCode::Up)), BoundInput::Nav(NavEvent::ArrowUp));
    }

    #[test]
    fn enter_activates() {
        let b = KeyBindings::default();

        assert_eq!(bind_key(&b, &open(), key(KeyCode::Enter)), BoundInput::Nav(NavEvent::Activate));
    }

    #[test]
    fn characters_edit_query_while_open() {
        let b = KeyBindings::default();

        assert_eq!(
            bind_key(&b, &open(), key(KeyCode::Char('q'))),
            BoundInput::Edit(EditCommand::Insert('q'))
        );
        assert_eq!(
            bind_key(&b, &open(), KeyEvent::new(KeyCode::Char('Q'), KeyModifiers::SHIFT)),
            BoundInput::Edit(EditCommand::Insert('Q'))
        );
    }

    #[test]
    fn q_quits_while_closed() {
        let b = KeyBindings::default();

        assert_eq!(bind_key(&b, &closed(), key(KeyCode::Char('q'))), BoundInput::Quit);
    }

    #[test]
    fn characters_are_ignored_while_closed() {
        let b = KeyBindings::default();

        assert_eq!(bind_key(&b, &closed(), key(KeyCode::Char('x'))), BoundInput::Ignored);
        assert_eq!(bind_key(&b, &closed(), key(KeyCode::Backspace)), BoundInput::Ignored);
    }

    #[test]
    fn editing_keys_map_while_open() {
        let b = KeyBindings::default();
        let cases = [
            (KeyCode::Backspace, EditCommand::Backspace),
            (KeyCode::Delete, EditCommand::Delete),
            (KeyCode::Left, EditCommand::Left),
            (KeyCode::Right, EditCommand::Right),
            (KeyCode::Home, EditCommand::Home),
            (KeyCode::End, EditCommand::End),
        ];

        for (code, expected) in cases {
            assert_eq!(bind_key(&b, &open(), key(code)), BoundInput::Edit(expected));
        }
    }

    #[test]
    fn ctrl_u_clears_only_while_open() {
        let b = KeyBindings::default();

        assert_eq!(bind_key(&b, &open(), ctrl('u')), BoundInput::ClearQuery);
        assert_eq!(bind_key(&b, &closed(), ctrl('u')), BoundInput::Ignored);
    }

    #[test]
    fn unbound_control_chord_is_ignored() {
        let b = KeyBindings::default();

        assert_eq!(bind_key(&b, &open(), ctrl('z')), BoundInput::Ignored);
    }

    #[test]
    fn edit_command_apply_inserts() {
        let input = EditCommand::Insert('a').apply(QueryInput::new());

        assert_eq!(input.text(), "a");
    }
}
