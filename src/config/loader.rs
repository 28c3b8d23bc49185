//! Config file discovery, parsing and layering.
//!
//! Settings are resolved in four layers, later layers winning: built-in
//! defaults, the TOML file, `SITESEARCH_*` environment variables, then
//! command-line flags.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV_VAR: &str = "SITESEARCH_CONFIG";

/// Where static-site generators conventionally emit the search index.
pub const DEFAULT_CORPUS_PATH: &str = "public/json/search.json";

/// Why a config file could not be used.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("cannot read config {path}: {reason}")]
    ReadError {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error message.
        reason: String,
    },

    /// Bad TOML, a wrongly typed value, or an unknown key.
    #[error("cannot parse config {path}: {reason}")]
    ParseError {
        /// File that was being parsed.
        path: PathBuf,
        /// Parser error message, with line and column.
        reason: String,
    },
}

/// Contents of `config.toml`. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Path to the `search.json` corpus (`-` reads stdin).
    #[serde(default)]
    pub corpus_path: Option<PathBuf>,

    /// Site root prepended to document slugs on activation.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Program (plus leading arguments) that opens an activated link.
    #[serde(default)]
    pub open_command: Option<String>,

    /// Show the modal immediately instead of the closed screen.
    #[serde(default)]
    pub start_open: Option<bool>,

    /// Where the log file is written.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Final settings after every layer has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Corpus file; `-` means stdin.
    pub corpus_path: PathBuf,
    /// Prepended to slugs when building links. Empty means relative links.
    pub base_url: String,
    /// Opener command; `None` prints activated links on exit instead.
    pub open_command: Option<String>,
    /// Start with the modal open.
    pub start_open: bool,
    /// Log file location.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            corpus_path: PathBuf::from(DEFAULT_CORPUS_PATH),
            base_url: String::new(),
            open_command: None,
            start_open: false,
            log_file_path: default_log_path(),
        }
    }
}

/// `<state dir>/sitesearch/sitesearch.log`, or `./sitesearch.log` on
/// platforms without a state directory.
pub fn default_log_path() -> PathBuf {
    dirs::state_dir()
        .map(|dir| dir.join("sitesearch").join("sitesearch.log"))
        .unwrap_or_else(|| PathBuf::from("sitesearch.log"))
}

/// `<config dir>/sitesearch/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("sitesearch").join("config.toml"))
}

/// Parse the config file at `path`.
///
/// A missing file is `Ok(None)`.
///
/// # Errors
///
/// `ReadError` when the file exists but is unreadable, `ParseError` when it
/// is not a valid config.
pub fn load_config_file(path: impl AsRef<Path>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(None);
    }

    let text = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    toml::from_str(&text)
        .map(Some)
        .map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

/// The config file to read: `--config`, else `$SITESEARCH_CONFIG`, else the
/// platform default.
pub fn config_path_candidate(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit
        .or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from))
        .or_else(default_config_path)
}

/// Locate and parse the config file.
///
/// # Errors
///
/// See [`load_config_file`]. Not finding any file is not an error.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    match config_path_candidate(config_path) {
        Some(path) => load_config_file(path),
        None => Ok(None),
    }
}

/// Layer the config file over the defaults.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        corpus_path: config.corpus_path.unwrap_or(defaults.corpus_path),
        base_url: config.base_url.unwrap_or(defaults.base_url),
        open_command: config.open_command.or(defaults.open_command),
        start_open: config.start_open.unwrap_or(defaults.start_open),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Layer `SITESEARCH_CORPUS` and `SITESEARCH_BASE_URL` over `config`.
pub fn apply_env_overrides(config: ResolvedConfig) -> ResolvedConfig {
    apply_overrides_from(config, |name| std::env::var(name).ok())
}

/// Same as [`apply_env_overrides`] with an injectable variable lookup.
pub fn apply_overrides_from(
    mut config: ResolvedConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    if let Some(corpus) = lookup("SITESEARCH_CORPUS") {
        config.corpus_path = PathBuf::from(corpus);
    }

    if let Some(base_url) = lookup("SITESEARCH_BASE_URL") {
        config.base_url = base_url;
    }

    config
}

/// Layer command-line flags over `config`, the final layer.
///
/// Pass `Some` only for flags the user actually gave.
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    corpus_override: Option<PathBuf>,
    base_url_override: Option<String>,
    open_command_override: Option<String>,
    start_open_override: Option<bool>,
) -> ResolvedConfig {
    if let Some(corpus) = corpus_override {
        config.corpus_path = corpus;
    }

    if let Some(base_url) = base_url_override {
        config.base_url = base_url;
    }

    if let Some(command) = open_command_override {
        config.open_command = Some(command);
    }

    if let Some(start_open) = start_open_override {
        config.start_open = start_open;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
