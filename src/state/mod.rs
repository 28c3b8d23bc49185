//! Widget state (pure).
//!
//! All state transitions are pure functions testable without a terminal.

pub mod app_state;
pub mod navigation;
pub mod pointer;
pub mod query;
pub mod query_input_handler;
pub mod search_timing;

// Re-export for convenience
pub use app_state::{AppState, ResultViewport};
pub use navigation::{reduce, NavEffect, NavEvent, NavigationState, Transition};
pub use pointer::{hit_test, ModalLayout, PointerTarget};
pub use query::{match_corpus, normalize_query, ResultSet, SearchField, SearchPattern};
pub use query_input_handler::QueryInput;
pub use search_timing::{timed_search, SearchTiming, TimedSearch};
