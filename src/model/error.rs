//! Error types for sitesearch.
//!
//! Errors are layered with `thiserror` and compose through `?` and `From`
//! conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level application error
//!   - [`InputError`] - Corpus file/stdin reading failures
//!   - [`ParseError`] - Corpus JSON decoding failures
//!   - `std::io::Error` - Terminal/TUI failures
//!
//! # Recovery Strategy
//!
//! Corpus errors are **non-fatal**: the corpus provider logs them and hands
//! the widget an empty corpus, so every query simply returns no results.
//! Terminal errors are fatal and propagate to `main`.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error.
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to read the corpus from file or stdin.
    #[error("Failed to read corpus: {0}")]
    InputRead(#[from] InputError),

    /// Failed to decode the corpus JSON.
    #[error("Failed to parse corpus: {0}")]
    Parse(#[from] ParseError),

    /// Terminal or TUI rendering error.
    ///
    /// Without a working terminal the widget cannot function, so this is
    /// always fatal.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors encountered when reading the corpus.
#[derive(Debug, Error)]
pub enum InputError {
    /// The corpus file does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use sitesearch::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/srv/site/json/search.json")
    /// };
    /// assert!(err.to_string().contains("search.json"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was attempted.
        path: PathBuf,
    },

    /// Generic I/O failure (permissions, broken pipe, disk errors).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors encountered when decoding the corpus.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The corpus text is not a JSON array of well-formed documents.
    #[error("Invalid corpus JSON: {message}")]
    InvalidJson {
        /// Decoder message including line and column.
        message: String,
    },
}
