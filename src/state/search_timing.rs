//! Wall-clock instrumentation around one filter pass.
//!
//! Timing is advisory telemetry shown next to the result count. It never
//! influences which documents match.

use crate::model::Corpus;
use crate::state::query::{ResultSet, SearchPattern};
use std::time::{Duration, Instant};
use tracing::debug;

/// Elapsed time of one complete filter pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchTiming {
    elapsed: Duration,
}

impl SearchTiming {
    /// Wrap a measured duration.
    pub fn from_duration(elapsed: Duration) -> Self {
        Self { elapsed }
    }

    /// Measured duration.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Seconds with millisecond precision, e.g. `"0.004"`.
    pub fn seconds_display(&self) -> String {
        format!("{:.3}", self.elapsed.as_secs_f64())
    }
}

/// Output of a timed filter pass.
#[derive(Debug, Clone)]
pub struct TimedSearch {
    /// Matching documents.
    pub results: ResultSet,
    /// Compiled pattern, kept for highlighting. `None` for an empty query.
    pub pattern: Option<SearchPattern>,
    /// How long the pass took.
    pub timing: SearchTiming,
}

/// Compile `raw_query` and filter `corpus`, measuring the whole pass.
///
/// The start timestamp is taken before compilation and the end timestamp
/// after the last document is tested.
pub fn timed_search(corpus: &Corpus, raw_query: &str) -> TimedSearch {
    let start = Instant::now();

    let pattern = SearchPattern::compile(raw_query);
    let results = match &pattern {
        Some(p) => ResultSet::from_pattern(corpus, p),
        None => ResultSet::empty(),
    };

    let timing = SearchTiming::from_duration(start.elapsed());
    debug!(
        query = pattern.as_ref().map(SearchPattern::as_str).unwrap_or(""),
        corpus = corpus.len(),
        matches = results.len(),
        elapsed_us = timing.elapsed().as_micros() as u64,
        "Search pass complete"
    );

    TimedSearch {
        results,
        pattern,
        timing,
    }
}
