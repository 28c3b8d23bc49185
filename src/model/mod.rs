//! Domain model (pure data, no I/O).

pub mod document;
pub mod error;
pub mod key_action;

pub use document::{Corpus, Document, Frontmatter};
pub use error::{AppError, InputError, ParseError};
pub use key_action::KeyAction;
