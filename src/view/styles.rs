//! Styling for the search modal.

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Colors on.
    pub fn enabled() -> Self {
        Self { enabled: true }
    }

    /// Colors off; emphasis uses modifiers only.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== SearchStyles =====

/// Styles for every element of the modal.
///
/// Without colors, emphasis falls back to modifiers (bold, reversed,
/// underline) so the active result and matches stay distinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchStyles {
    /// Result title.
    pub title: Style,
    /// Result excerpt.
    pub excerpt: Style,
    /// Categories and tags line.
    pub meta: Style,
    /// Matched query text.
    pub highlight: Style,
    /// The result under the active marker.
    pub active: Style,
    /// Panel and input borders.
    pub border: Style,
    /// Footer text.
    pub footer: Style,
    /// Key names in hints and the input icon.
    pub hint_key: Style,
    /// Dimmed backdrop behind the panel.
    pub overlay: Style,
    /// The closed-screen search button.
    pub trigger: Style,
}

impl SearchStyles {
    /// Build the style set for `config`.
    pub fn with_color_config(config: ColorConfig) -> Self {
        if config.colors_enabled() {
            Self {
                title: Style::default().add_modifier(Modifier::BOLD),
                excerpt: Style::default(),
                meta: Style::default().fg(Color::DarkGray),
                highlight: Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
                active: Style::default().bg(Color::Rgb(40, 44, 52)),
                border: Style::default().fg(Color::Cyan),
                footer: Style::default().fg(Color::Gray),
                hint_key: Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
                overlay: Style::default().bg(Color::Black),
                trigger: Style::default().fg(Color::Cyan),
            }
        } else {
            Self {
                title: Style::default().add_modifier(Modifier::BOLD),
                excerpt: Style::default(),
                meta: Style::default(),
                highlight: Style::default().add_modifier(Modifier::UNDERLINED),
                active: Style::default().add_modifier(Modifier::REVERSED),
                border: Style::default(),
                footer: Style::default(),
                hint_key: Style::default().add_modifier(Modifier::BOLD),
                overlay: Style::default(),
                trigger: Style::default(),
            }
        }
    }
}

impl Default for SearchStyles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::from_env_and_args(false))
    }
}
