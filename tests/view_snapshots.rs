//! Render tests for the search modal
//!
//! Uses ratatui TestBackend to check what actually lands on screen, and insta
//! for the one piece of text that is fully deterministic.

use ratatui::backend::TestBackend;
use ratatui::Terminal;
use sitesearch::model::{Corpus, Document};
use sitesearch::state::{AppState, NavEvent, QueryInput, SearchTiming};
use sitesearch::view::{
    compute_layout, results_summary, search_modal, ColorConfig, SearchStyles, ITEM_HEIGHT,
};
use std::time::Duration;

// ===== Test Helpers =====

/// Convert a ratatui buffer to a string, dropping blank lines.
fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            line.push_str(buffer[(x, y)].symbol());
        }
        let trimmed = line.trim_end();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    lines.join("\n")
}

fn render(state: &AppState, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    let styles = SearchStyles::with_color_config(ColorConfig::disabled());
    terminal
        .draw(|frame| {
            let layout = compute_layout(frame.area(), state);
            search_modal::render(frame, state, &styles, &layout);
        })
        .unwrap();
    buffer_to_string(terminal.backend().buffer())
}

fn corpus() -> Corpus {
    Corpus::new(vec![
        Document::new(
            "Go Basics",
            "An introduction to goroutines, channels and the select statement.",
        )
        .with_description("Concurrency primitives in Go")
        .with_categories(["programming"])
        .with_tags(["go", "concurrency"]),
        Document::new("Rust Ownership", "Borrowing and lifetimes explained.")
            .with_tags(["rust"]),
        Document::new("Writing Go Tests", "Table-driven tests with the testing package.")
            .with_categories(["programming", "testing"]),
    ])
}

fn open_state(query: &str) -> AppState {
    let mut state = AppState::new(corpus());
    state.dispatch(NavEvent::Open);
    state.set_query(QueryInput::from_text(query));
    state
}

// ===== Snapshots =====

#[test]
fn telemetry_line() {
    let timing = SearchTiming::from_duration(Duration::from_millis(12));

    insta::assert_snapshot!(results_summary(2, &timing), @"2 results - in 0.012 seconds");
}

#[test]
fn telemetry_line_zero_results() {
    insta::assert_snapshot!(
        results_summary(0, &SearchTiming::default()),
        @"0 results - in 0.000 seconds"
    );
}

// ===== Screens =====

#[test]
fn closed_screen() {
    let text = render(&AppState::new(corpus()), 60, 12);

    assert!(text.contains("sitesearch"));
    assert!(text.contains("3 documents indexed"));
    assert!(text.contains("⌕ Search  Ctrl+K"));
    assert!(text.contains("q to quit"));
}

#[test]
fn open_screen_with_results() {
    let text = render(&open_state("go"), 80, 20);

    assert!(text.contains("Go Basics"));
    assert!(text.contains("Writing Go Tests"));
    assert!(!text.contains("Rust Ownership"));
    assert!(text.contains("Concurrency primitives in Go"));
    assert!(text.contains("programming · #go #concurrency"));
    assert!(text.contains("2 results - in"));
}

#[test]
fn input_shows_clear_icon_with_query_and_search_icon_without() {
    let with_query = render(&open_state("go"), 80, 20);
    let without_query = render(&open_state(""), 80, 20);

    assert!(with_query.contains("✕ go"));
    assert!(without_query.contains("⌕"));
    assert!(!without_query.contains("✕"));
}

#[test]
fn active_marker_follows_selection() {
    let mut state = open_state("go");
    state.dispatch(NavEvent::ArrowDown);
    state.dispatch(NavEvent::ArrowDown);

    let text = render(&state, 80, 20);

    assert!(text.contains("▶ Writing Go Tests"));
    assert!(!text.contains("▶ Go Basics"));
}

#[test]
fn long_titles_are_truncated_with_ellipsis() {
    let long = "A".repeat(200);
    let mut state = AppState::new(Corpus::new(vec![Document::new(long, "needle")]));
    state.dispatch(NavEvent::Open);
    state.set_query(QueryInput::from_text("needle"));

    let text = render(&state, 40, 16);

    assert!(text.contains('…'));
}

#[test]
fn results_area_holds_whole_items() {
    let state = open_state("go");
    let layout = compute_layout(ratatui::layout::Rect::new(0, 0, 80, 20), &state);

    let results = layout.results.unwrap();
    assert!(results.height >= ITEM_HEIGHT);
}

#[test]
fn very_long_query_renders_its_tail() {
    let mut query = "a".repeat(65_534);
    query.push_str("END");

    let text = render(&open_state(&query), 80, 24);

    assert!(text.contains("aaaEND"));
    assert!(text.contains("No results for"));
}
