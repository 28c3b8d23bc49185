//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Text-editing keys (printable characters, Backspace, Left/Right, ...) are
/// not bindings; the input binder handles them directly while the modal is
/// open.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&key).copied()
    }

    /// Bind (or rebind) `key` to `action`.
    pub fn bind(&mut self, key: KeyEvent, action: KeyAction) {
        self.bindings.insert(key, action);
    }
}

/// Default chords. Cmd+K only arrives on terminals that report SUPER.
const DEFAULT_BINDINGS: [(KeyCode, KeyModifiers, KeyAction); 8] = [
    (KeyCode::Char('k'), KeyModifiers::CONTROL, KeyAction::OpenSearch),
    (KeyCode::Char('k'), KeyModifiers::SUPER, KeyAction::OpenSearch),
    (KeyCode::Esc, KeyModifiers::NONE, KeyAction::CloseSearch),
    (KeyCode::Down, KeyModifiers::NONE, KeyAction::SelectNext),
    (KeyCode::Up, KeyModifiers::NONE, KeyAction::SelectPrev),
    (KeyCode::Enter, KeyModifiers::NONE, KeyAction::Activate),
    (KeyCode::Char('u'), KeyModifiers::CONTROL, KeyAction::ClearQuery),
    (KeyCode::Char('q'), KeyModifiers::NONE, KeyAction::Quit),
];

impl Default for KeyBindings {
    fn default() -> Self {
        let bindings = DEFAULT_BINDINGS
            .iter()
            .map(|&(code, modifiers, action)| (KeyEvent::new(code, modifiers), action))
            .collect();
        Self { bindings }
    }
}
