//! Tests for AppState wiring between the matcher and the reducer.

use super::*;
use crate::model::Document;
use crate::state::query_input_handler::{clear_query, handle_backspace, handle_char_input};

fn corpus() -> Corpus {
    Corpus::new(vec![
        Document::new("Rust ownership", "borrowing"),
        Document::new("Rust async", "futures"),
        Document::new("Go Basics", "goroutines"),
        Document::new("Rust macros", "hygiene"),
    ])
}

fn type_query(state: &mut AppState, s: &str) {
    for ch in s.chars() {
        state.edit_query(|q| handle_char_input(q, ch));
    }
}

// ===== Construction =====

#[test]
fn new_state_is_closed_with_no_results() {
    let state = AppState::new(corpus());

    assert!(!state.is_open());
    assert!(state.results().is_empty());
    assert!(state.pattern().is_none());
    assert_eq!(state.active_marker(), None);
}

// ===== Query edits =====

#[test]
fn typing_recomputes_results() {
    let mut state = AppState::new(corpus());

    type_query(&mut state, "rust");

    assert_eq!(state.results().indices(), &[0, 1, 3]);
    assert_eq!(state.pattern().map(|p| p.as_str()), Some("rust"));
}

#[test]
fn clearing_query_empties_results() {
    let mut state = AppState::new(corpus());
    type_query(&mut state, "rust");

    state.edit_query(clear_query);

    assert!(state.results().is_empty());
    assert!(state.query().is_empty());
}

#[test]
fn cursor_only_edit_keeps_results() {
    let mut state = AppState::new(corpus());
    type_query(&mut state, "go");
    let before = state.results().clone();

    state.edit_query(crate::state::query_input_handler::handle_cursor_left);

    assert_eq!(state.results(), &before);
    assert_eq!(state.query().cursor(), 1);
}

#[test]
fn replace_corpus_reruns_current_query() {
    let mut state = AppState::new(Corpus::empty());
    type_query(&mut state, "go");
    assert!(state.results().is_empty());

    state.replace_corpus(corpus());

    assert_eq!(state.results().indices(), &[2]);
}

// ===== Navigation =====

#[test]
fn open_sets_focus() {
    let mut state = AppState::new(corpus());

    state.dispatch(NavEvent::Open);

    assert!(state.is_open());
    assert!(state.input_focused());
}

#[test]
fn arrow_down_moves_active_marker() {
    let mut state = AppState::new(corpus());
    state.dispatch(NavEvent::Open);
    type_query(&mut state, "rust");

    state.dispatch(NavEvent::ArrowDown);
    state.dispatch(NavEvent::ArrowDown);

    assert_eq!(state.navigation().selected(), Some(1));
    assert_eq!(state.active_marker(), Some(1));
}

#[test]
fn activate_returns_corpus_index_of_selected_result() {
    let mut state = AppState::new(corpus());
    state.dispatch(NavEvent::Open);
    type_query(&mut state, "rust");
    state.dispatch(NavEvent::ArrowDown);
    state.dispatch(NavEvent::ArrowDown);
    state.dispatch(NavEvent::ArrowDown);

    let activated = state.dispatch(NavEvent::Activate);

    // Third result of "rust" is corpus entry 3.
    assert_eq!(activated, Some(3));
}

#[test]
fn activate_without_selection_returns_none() {
    let mut state = AppState::new(corpus());
    state.dispatch(NavEvent::Open);
    type_query(&mut state, "rust");

    assert_eq!(state.dispatch(NavEvent::Activate), None);
}

#[test]
fn escape_closes_mid_navigation() {
    let mut state = AppState::new(corpus());
    state.dispatch(NavEvent::Open);
    type_query(&mut state, "rust");
    state.dispatch(NavEvent::ArrowDown);

    state.dispatch(NavEvent::Close);

    assert!(!state.is_open());
}

// ===== Selection persistence across result changes =====

#[test]
fn selection_persists_when_query_narrows() {
    let mut state = AppState::new(corpus());
    state.dispatch(NavEvent::Open);
    type_query(&mut state, "rust");
    for _ in 0..3 {
        state.dispatch(NavEvent::ArrowDown);
    }
    assert_eq!(state.navigation().selected(), Some(2));

    // "rust a" narrows the list to a single result.
    type_query(&mut state, " a");

    assert_eq!(state.results().len(), 1);
    assert_eq!(state.navigation().selected(), Some(2), "selection is not reset");
    assert_eq!(state.active_marker(), None, "stale marker reads as none");
    assert_eq!(state.dispatch(NavEvent::Activate), None);
}

#[test]
fn selection_points_at_new_item_after_requery() {
    let mut state = AppState::new(corpus());
    state.dispatch(NavEvent::Open);
    type_query(&mut state, "rust");
    state.dispatch(NavEvent::ArrowDown);

    for _ in 0..4 {
        state.edit_query(handle_backspace);
    }
    type_query(&mut state, "go");

    assert_eq!(state.navigation().selected(), Some(0));
    assert_eq!(state.dispatch(NavEvent::Activate), Some(2));
}

// ===== ResultViewport =====

#[test]
fn viewport_scrolls_down_minimally() {
    let mut viewport = ResultViewport::default();
    viewport.set_visible_rows(3);

    viewport.scroll_into_view(4);

    assert_eq!(viewport.offset(), 2);
}

#[test]
fn viewport_scrolls_up_to_index() {
    let mut viewport = ResultViewport::default();
    viewport.set_visible_rows(3);
    viewport.scroll_into_view(6);

    viewport.scroll_into_view(1);

    assert_eq!(viewport.offset(), 1);
}

#[test]
fn viewport_does_not_move_when_visible() {
    let mut viewport = ResultViewport::default();
    viewport.set_visible_rows(5);

    viewport.scroll_into_view(4);

    assert_eq!(viewport.offset(), 0);
}

#[test]
fn viewport_clamps_after_results_shrink() {
    let mut viewport = ResultViewport::default();
    viewport.set_visible_rows(2);
    viewport.scroll_into_view(9);
    assert_eq!(viewport.offset(), 8);

    viewport.clamp_to(3);

    assert_eq!(viewport.offset(), 1);
}
