//! sitesearch
//!
//! Keyboard-driven search modal over a static site's content corpus.
//!
//! Follows a Pure Core / Impure Shell split: `model` and `state` hold the
//! matcher and the navigation reducer, `view` owns the terminal.

pub mod config;
pub mod logging;
pub mod model;
pub mod source;
pub mod state;
pub mod view;
