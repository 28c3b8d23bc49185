//! Corpus acquisition.
//!
//! The corpus is read exactly once at start-up from a file or from piped
//! stdin. [`load_corpus`] never fails: any read or decode error is logged
//! and an empty corpus is returned, so searching still works (and simply
//! finds nothing).

use crate::model::error::InputError;
use crate::model::{AppError, Corpus};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Where the corpus comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorpusSource {
    /// A `search.json` file on disk.
    File(PathBuf),
    /// JSON piped on stdin.
    Stdin,
}

impl CorpusSource {
    /// Interpret a CLI/config path. `-` selects stdin.
    pub fn from_path(path: &Path) -> Self {
        if path.as_os_str() == "-" {
            CorpusSource::Stdin
        } else {
            CorpusSource::File(path.to_path_buf())
        }
    }

    /// Human-readable origin for logs.
    pub fn describe(&self) -> String {
        match self {
            CorpusSource::File(path) => path.display().to_string(),
            CorpusSource::Stdin => "<stdin>".to_string(),
        }
    }
}

/// Read the raw corpus text.
///
/// # Errors
///
/// Returns `InputError::FileNotFound` for a missing file and
/// `InputError::Io` for other read failures.
pub fn read_source(source: &CorpusSource) -> Result<String, InputError> {
    match source {
        CorpusSource::File(path) => {
            if !path.exists() {
                return Err(InputError::FileNotFound { path: path.clone() });
            }
            Ok(std::fs::read_to_string(path)?)
        }
        CorpusSource::Stdin => {
            let mut text = String::new();
            std::io::stdin().lock().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

/// Read and decode a corpus from any reader.
///
/// # Errors
///
/// Returns `AppError::InputRead` on I/O failure and `AppError::Parse` when
/// the text is not a valid corpus.
pub fn read_corpus_from<R: Read>(mut reader: R) -> Result<Corpus, AppError> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(InputError::from)?;
    Ok(Corpus::from_json(&text)?)
}

/// Read and decode the corpus, reporting failures.
///
/// # Errors
///
/// See [`read_source`] and [`Corpus::from_json`].
pub fn try_load_corpus(source: &CorpusSource) -> Result<Corpus, AppError> {
    let text = read_source(source)?;
    Ok(Corpus::from_json(&text)?)
}

/// Acquire the corpus once, substituting an empty corpus on any failure.
pub fn load_corpus(source: &CorpusSource) -> Corpus {
    match try_load_corpus(source) {
        Ok(corpus) => {
            info!(
                source = %source.describe(),
                documents = corpus.len(),
                "Corpus loaded"
            );
            corpus
        }
        Err(error) => {
            warn!(
                source = %source.describe(),
                %error,
                "Corpus unavailable, searching an empty corpus"
            );
            Corpus::empty()
        }
    }
}
