//! Configuration: key bindings and layered settings.

pub mod keybindings;
pub mod loader;

pub use keybindings::KeyBindings;
pub use loader::{
    apply_cli_overrides, apply_env_overrides, apply_overrides_from, config_path_candidate,
    default_config_path, default_log_path, load_config_file, load_config_with_precedence,
    merge_config, ConfigError, ConfigFile, ResolvedConfig, CONFIG_ENV_VAR, DEFAULT_CORPUS_PATH,
};
