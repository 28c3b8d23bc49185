//! Top-level widget state.
//!
//! Owns the corpus, the query, the derived result set and the navigation
//! state. Query edits re-run the full filter pass; navigation events go
//! through the pure reducer and its effects are applied here.

use crate::model::Corpus;
use crate::state::navigation::{reduce, NavEffect, NavEvent, NavigationState};
use crate::state::query::{ResultSet, SearchPattern};
use crate::state::query_input_handler::QueryInput;
use crate::state::search_timing::{timed_search, SearchTiming, TimedSearch};
use tracing::debug;

// ===== ResultViewport =====

/// Scroll window over the result list, measured in results (not lines).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResultViewport {
    offset: usize,
    visible_rows: usize,
}

impl ResultViewport {
    /// Index of the first visible result.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of results that fit on screen.
    pub fn visible_rows(&self) -> usize {
        self.visible_rows
    }

    /// Record how many results fit on screen.
    pub fn set_visible_rows(&mut self, rows: usize) {
        self.visible_rows = rows;
    }

    /// Shift the window the minimum amount needed to show `index`.
    pub fn scroll_into_view(&mut self, index: usize) {
        if index < self.offset {
            self.offset = index;
        } else if self.visible_rows > 0 && index >= self.offset + self.visible_rows {
            self.offset = index + 1 - self.visible_rows;
        }
    }

    /// Pull the window back so it does not start past the end of the list.
    pub fn clamp_to(&mut self, result_count: usize) {
        let max_offset = result_count.saturating_sub(self.visible_rows.max(1));
        self.offset = self.offset.min(max_offset);
    }
}

// ===== AppState =====

/// Complete state of the search widget.
#[derive(Debug, Clone)]
pub struct AppState {
    corpus: Corpus,
    input: QueryInput,
    search: TimedSearch,
    navigation: NavigationState,
    /// Result position carrying the active marker, as last set by the reducer.
    active: Option<usize>,
    viewport: ResultViewport,
    input_focused: bool,
}

impl AppState {
    /// Closed widget with an empty query over `corpus`.
    pub fn new(corpus: Corpus) -> Self {
        let search = timed_search(&corpus, "");
        Self {
            corpus,
            input: QueryInput::new(),
            search,
            navigation: NavigationState::new(),
            active: None,
            viewport: ResultViewport::default(),
            input_focused: false,
        }
    }

    /// The corpus being searched.
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Current query text and cursor.
    pub fn query(&self) -> &QueryInput {
        &self.input
    }

    /// Matches for the current query.
    pub fn results(&self) -> &ResultSet {
        &self.search.results
    }

    /// Compiled pattern for the current query, `None` when the query is empty.
    pub fn pattern(&self) -> Option<&SearchPattern> {
        self.search.pattern.as_ref()
    }

    /// How long the last filter pass took.
    pub fn timing(&self) -> SearchTiming {
        self.search.timing
    }

    /// Open/closed flag and active selection.
    pub fn navigation(&self) -> &NavigationState {
        &self.navigation
    }

    /// Whether the modal is showing.
    pub fn is_open(&self) -> bool {
        self.navigation.is_open()
    }

    /// Whether keystrokes edit the query.
    pub fn input_focused(&self) -> bool {
        self.input_focused
    }

    /// Scroll position of the result list.
    pub fn viewport(&self) -> &ResultViewport {
        &self.viewport
    }

    /// Mutable scroll position, for the renderer.
    pub fn viewport_mut(&mut self) -> &mut ResultViewport {
        &mut self.viewport
    }

    /// Result position carrying the active marker.
    ///
    /// Bounds-checked against the current result set, so a marker left
    /// behind by a shrinking result list reads as "none".
    pub fn active_marker(&self) -> Option<usize> {
        self.active.filter(|&i| i < self.search.results.len())
    }

    /// Replace the query with `input`, re-running the filter pass when the
    /// text changed.
    ///
    /// Navigation state is deliberately left untouched: the selection index
    /// survives result-set changes.
    pub fn set_query(&mut self, input: QueryInput) {
        let changed = input.text() != self.input.text();
        self.input = input;
        if changed {
            self.refresh_results();
        }
    }

    /// Apply an editing function to the query.
    pub fn edit_query(&mut self, edit: impl FnOnce(QueryInput) -> QueryInput) {
        let edited = edit(self.input.clone());
        self.set_query(edited);
    }

    /// Replace the corpus and re-run the current query against it.
    pub fn replace_corpus(&mut self, corpus: Corpus) {
        self.corpus = corpus;
        self.refresh_results();
    }

    fn refresh_results(&mut self) {
        self.search = timed_search(&self.corpus, self.input.text());
        self.viewport.clamp_to(self.search.results.len());
    }

    /// Feed a navigation event through the reducer and apply its effects.
    ///
    /// Returns the corpus index of the document to activate, if the event
    /// activated one.
    pub fn dispatch(&mut self, event: NavEvent) -> Option<usize> {
        let result_count = self.search.results.len();
        let transition = reduce(self.navigation, event, result_count);
        self.navigation = transition.state;

        let mut activated = None;
        for effect in transition.effects {
            match effect {
                NavEffect::FocusInput => self.input_focused = true,
                NavEffect::SetActive(active) => self.active = active,
                NavEffect::ScrollIntoView(index) => self.viewport.scroll_into_view(index),
                NavEffect::Activate(position) => {
                    activated = self.search.results.indices().get(position).copied();
                }
            }
        }

        debug!(
            ?event,
            open = self.navigation.is_open(),
            selected = self.navigation.selected_signed(),
            results = result_count,
            "Navigation event applied"
        );

        activated
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod tests;
