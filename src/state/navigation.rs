//! Navigation state machine for the search modal (pure reducer).
//!
//! Tracks whether the modal is open and which result is selected. Events
//! arrive already translated from raw keys or clicks; side effects are
//! returned as [`NavEffect`] values for the view layer to carry out.
//!
//! # Cardinality
//! - Closed/Open × selection `None | Some(0..)`.
//! - The stored selection is not reset when the result set changes, so it
//!   may point past the end of a shrunken list. Every read goes through
//!   [`NavigationState::active_index`], which treats such a value as no
//!   selection.

/// Open/closed status plus the current selection.
///
/// `selected == None` is the "no selection" state (index `-1`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigationState {
    open: bool,
    selected: Option<usize>,
}

impl NavigationState {
    /// Closed with no selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a state directly, e.g. to resume a previous session.
    pub fn from_parts(open: bool, selected: Option<usize>) -> Self {
        Self { open, selected }
    }

    /// Whether the modal is showing.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Stored selection, without bounds checking.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Selection validated against the current number of results.
    pub fn active_index(&self, result_count: usize) -> Option<usize> {
        self.selected.filter(|&i| i < result_count)
    }

    /// Selection as the signed index used in telemetry (`-1` for none).
    pub fn selected_signed(&self) -> i64 {
        self.selected.map_or(-1, |i| i as i64)
    }
}

/// Input vocabulary of the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    /// Trigger clicked or open shortcut pressed.
    Open,
    /// Overlay clicked or Escape pressed.
    Close,
    /// Down arrow pressed.
    ArrowDown,
    /// Up arrow pressed.
    ArrowUp,
    /// Enter pressed.
    Activate,
}

/// Side effects requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEffect {
    /// Move keyboard focus to the query input.
    FocusInput,
    /// Mark exactly this result (or none) as active.
    SetActive(Option<usize>),
    /// Scroll the result at this position into view.
    ScrollIntoView(usize),
    /// Invoke the primary action of the result at this position.
    Activate(usize),
}

/// New state plus the effects to apply, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// State after the event.
    pub state: NavigationState,
    /// Effects for the shell to run, in order.
    pub effects: Vec<NavEffect>,
}

/// Apply `event` to `state` given the current number of results.
pub fn reduce(state: NavigationState, event: NavEvent, result_count: usize) -> Transition {
    let mut effects = Vec::new();

    let next = match event {
        NavEvent::Open => {
            effects.push(NavEffect::FocusInput);
            let next = NavigationState {
                open: true,
                ..state
            };
            push_highlight(&mut effects, next, result_count);
            next
        }
        NavEvent::Close => NavigationState {
            open: false,
            ..state
        },
        NavEvent::ArrowDown if state.open => {
            let next = NavigationState {
                selected: step_down(state.selected, result_count),
                ..state
            };
            push_highlight(&mut effects, next, result_count);
            next
        }
        NavEvent::ArrowUp if state.open => {
            let next = NavigationState {
                selected: step_up(state.selected),
                ..state
            };
            push_highlight(&mut effects, next, result_count);
            next
        }
        NavEvent::ArrowDown | NavEvent::ArrowUp => state,
        NavEvent::Activate => {
            if state.open {
                if let Some(index) = state.active_index(result_count) {
                    effects.push(NavEffect::Activate(index));
                }
            }
            state
        }
    };

    Transition {
        state: next,
        effects,
    }
}

/// Advance by one, stopping at the last result. Does not wrap.
fn step_down(selected: Option<usize>, result_count: usize) -> Option<usize> {
    let candidate = selected.map_or(0, |i| i + 1);
    if candidate < result_count {
        Some(candidate)
    } else {
        selected
    }
}

/// Retreat by one, stopping at the first result. Never returns to `None`.
fn step_up(selected: Option<usize>) -> Option<usize> {
    match selected {
        Some(i) if i > 0 => Some(i - 1),
        other => other,
    }
}

fn push_highlight(effects: &mut Vec<NavEffect>, state: NavigationState, result_count: usize) {
    let active = state.active_index(result_count);
    effects.push(NavEffect::SetActive(active));
    if let Some(index) = active {
        effects.push(NavEffect::ScrollIntoView(index));
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "navigation_tests.rs"]
mod tests;
