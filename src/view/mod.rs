//! TUI rendering and terminal management (impure shell)

pub mod activation;
pub mod highlight;
pub mod input_binder;
pub mod search_modal;
pub mod styles;
pub mod terminal_session;

pub use activation::{CommandOpener, RecordSelection, ResultAction};
pub use input_binder::{bind_key, BoundInput, EditCommand};
pub use search_modal::{compute_layout, results_summary, ITEM_HEIGHT};
pub use styles::{ColorConfig, SearchStyles};
pub use terminal_session::{CrosstermControl, TerminalControl, TerminalSession};

use crate::config::KeyBindings;
use crate::model::{AppError, Corpus};
use crate::state::query_input_handler::{clear_query, QueryInput};
use crate::state::{hit_test, AppState, ModalLayout, NavEvent, PointerTarget};
use crossterm::event::{
    self, Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::Rect;
use ratatui::Terminal;
use std::io;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Application error
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend, and over the
/// action run when a result is activated.
pub struct TuiApp<B, A>
where
    B: Backend,
    A: ResultAction,
{
    terminal: Terminal<B>,
    app_state: AppState,
    key_bindings: KeyBindings,
    action: A,
    styles: SearchStyles,
    /// Regions of the last rendered frame (for mouse hit-testing)
    layout: ModalLayout,
}

impl<B, A> TuiApp<B, A>
where
    B: Backend,
    A: ResultAction,
{
    /// Assemble an app around an already-acquired terminal.
    pub fn new(
        terminal: Terminal<B>,
        app_state: AppState,
        key_bindings: KeyBindings,
        action: A,
        styles: SearchStyles,
    ) -> Self {
        Self {
            terminal,
            app_state,
            key_bindings,
            action,
            styles,
            layout: ModalLayout::default(),
        }
    }

    /// Current widget state.
    pub fn app_state(&self) -> &AppState {
        &self.app_state
    }

    /// The underlying terminal, for inspecting test backends.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Regions of the last drawn frame.
    pub fn layout(&self) -> &ModalLayout {
        &self.layout
    }

    /// Give back the activation action (with whatever it recorded).
    pub fn into_action(self) -> A {
        self.action
    }

    /// Run the main event loop
    ///
    /// Returns when the user quits (Ctrl+C, or `q` while closed). Blocks on
    /// terminal events; nothing else can change the screen.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if self.handle_key(key) {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => self.handle_mouse(mouse),
                Event::Resize(width, height) => {
                    debug!("Handling resize to {}x{}", width, height);
                }
                _ => continue,
            }
            self.draw()?;
        }
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match bind_key(&self.key_bindings, self.app_state.navigation(), key) {
            BoundInput::Quit => return true,
            BoundInput::Nav(event) => self.dispatch(event),
            BoundInput::Edit(command) => self.app_state.edit_query(|input| command.apply(input)),
            BoundInput::ClearQuery => self.app_state.edit_query(clear_query),
            BoundInput::Ignored => {}
        }
        false
    }

    /// Handle a single mouse event
    ///
    /// Only left clicks matter; targets come from the last rendered layout.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }

        match hit_test(&self.layout, mouse.column, mouse.row) {
            PointerTarget::Trigger => self.dispatch(NavEvent::Open),
            PointerTarget::Overlay => self.dispatch(NavEvent::Close),
            PointerTarget::ClearButton => self.app_state.edit_query(clear_query),
            PointerTarget::Panel | PointerTarget::Nothing => {}
        }
    }

    fn dispatch(&mut self, event: NavEvent) {
        let Some(index) = self.app_state.dispatch(event) else {
            return;
        };
        if let Some(document) = self.app_state.corpus().get(index) {
            info!(title = document.title(), index, "Activating result");
            self.action.activate(document);
        }
    }

    /// Render the current frame
    ///
    /// Recomputes the layout first so the viewport knows how many results
    /// fit, and so mouse clicks resolve against what is on screen.
    pub fn draw(&mut self) -> Result<(), TuiError> {
        let size = self.terminal.size()?;
        let area = Rect::new(0, 0, size.width, size.height);
        self.layout = search_modal::compute_layout(area, &self.app_state);

        if let Some(results) = self.layout.results {
            let rows = (results.height / ITEM_HEIGHT).max(1) as usize;
            let count = self.app_state.results().len();
            let active = self.app_state.active_marker();
            let viewport = self.app_state.viewport_mut();
            viewport.set_visible_rows(rows);
            viewport.clamp_to(count);
            if let Some(active) = active {
                viewport.scroll_into_view(active);
            }
        }

        let state = &self.app_state;
        let styles = &self.styles;
        let layout = &self.layout;
        self.terminal.draw(|frame| {
            search_modal::render(frame, state, styles, layout);
        })?;

        Ok(())
    }
}

/// Start-up options for the interactive session.
#[derive(Debug, Clone)]
pub struct UiOptions {
    /// Query typed into the input before the first frame.
    pub initial_query: Option<String>,
    /// Open the modal immediately.
    pub start_open: bool,
    /// Whether styles use colors.
    pub color: ColorConfig,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self {
            initial_query: None,
            start_open: false,
            color: ColorConfig::enabled(),
        }
    }
}

/// Build the initial state from the corpus and start-up options.
pub fn initial_state(corpus: Corpus, options: &UiOptions) -> AppState {
    let mut app_state = AppState::new(corpus);
    if let Some(query) = options.initial_query.as_deref().filter(|q| !q.is_empty()) {
        app_state.set_query(QueryInput::from_text(query));
    }
    if options.start_open {
        app_state.dispatch(NavEvent::Open);
    }
    app_state
}

/// Initialize and run the TUI application
///
/// Acquires the terminal for the duration of the loop and restores it on
/// every exit path. Returns the action so the caller can report what was
/// activated once the terminal is back to normal.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_search<A: ResultAction>(
    corpus: Corpus,
    options: UiOptions,
    action: A,
) -> Result<A, TuiError> {
    let app_state = initial_state(corpus, &options);

    let session = TerminalSession::acquire(CrosstermControl)?;
    let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    let mut app = TuiApp::new(
        terminal,
        app_state,
        KeyBindings::default(),
        action,
        SearchStyles::with_color_config(options.color),
    );

    let result = app.run();
    session.release()?;
    result?;

    Ok(app.into_action())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Document;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::backend::TestBackend;

    fn corpus() -> Corpus {
        Corpus::new(vec![
            Document::new("Go Basics", "goroutines").with_slug("go-basics"),
            Document::new("Go Channels", "select").with_slug("go-channels"),
            Document::new("Rust", "ownership").with_slug("rust"),
        ])
    }

    fn create_test_app() -> TuiApp<TestBackend, RecordSelection> {
        let terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        TuiApp::new(
            terminal,
            AppState::new(corpus()),
            KeyBindings::default(),
            RecordSelection::new("https://site.test"),
            SearchStyles::with_color_config(ColorConfig::disabled()),
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut TuiApp<TestBackend, RecordSelection>, text: &str) {
        for ch in text.chars() {
            assert!(!app.handle_key(key(KeyCode::Char(ch))));
        }
    }

    fn click(app: &mut TuiApp<TestBackend, RecordSelection>, column: u16, row: u16) {
        app.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        });
    }

    #[test]
    fn tui_error_from_io_error() {
        let io_err = io::Error::other("test error");
        let tui_err: TuiError = io_err.into();
        assert!(matches!(tui_err, TuiError::Io(_)));
    }

    #[test]
    fn handle_key_ctrl_c_returns_true() {
        let mut app = create_test_app();

        assert!(app.handle_key(ctrl('c')));
    }

    #[test]
    fn handle_key_q_quits_only_while_closed() {
        let mut app = create_test_app();
        app.handle_key(ctrl('k'));

        assert!(!app.handle_key(key(KeyCode::Char('q'))));
        assert_eq!(app.app_state().query().text(), "q");

        app.handle_key(key(KeyCode::Esc));
        assert!(app.handle_key(key(KeyCode::Char('q'))));
    }

    #[test]
    fn typing_filters_and_enter_activates() {
        let mut app = create_test_app();
        app.handle_key(ctrl('k'));
        type_text(&mut app, "go");
        assert_eq!(app.app_state().results().len(), 2);

        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(
            app.into_action().links(),
            &["https://site.test/go-channels".to_string()]
        );
    }

    #[test]
    fn enter_without_selection_activates_nothing() {
        let mut app = create_test_app();
        app.handle_key(ctrl('k'));
        type_text(&mut app, "go");

        app.handle_key(key(KeyCode::Enter));

        assert!(app.into_action().links().is_empty());
    }

    #[test]
    fn ctrl_u_clears_query() {
        let mut app = create_test_app();
        app.handle_key(ctrl('k'));
        type_text(&mut app, "rust");

        app.handle_key(ctrl('u'));

        assert!(app.app_state().query().is_empty());
        assert!(app.app_state().results().is_empty());
    }

    #[test]
    fn draw_renders_without_error() {
        let mut app = create_test_app();

        assert!(app.draw().is_ok());
        assert!(app.layout().trigger.is_some());
    }

    #[test]
    fn click_trigger_opens_and_overlay_closes() {
        let mut app = create_test_app();
        app.draw().unwrap();
        let trigger = app.layout().trigger.unwrap();

        click(&mut app, trigger.x + 1, trigger.y + 1);
        assert!(app.app_state().is_open());

        app.draw().unwrap();
        click(&mut app, 0, 0);
        assert!(!app.app_state().is_open());
    }

    #[test]
    fn click_clear_button_empties_query() {
        let mut app = create_test_app();
        app.handle_key(ctrl('k'));
        type_text(&mut app, "go");
        app.draw().unwrap();
        let clear = app.layout().clear_button.unwrap();

        click(&mut app, clear.x, clear.y);

        assert!(app.app_state().query().is_empty());
        assert!(app.app_state().is_open());
    }

    #[test]
    fn click_inside_panel_keeps_modal_open() {
        let mut app = create_test_app();
        app.handle_key(ctrl('k'));
        app.draw().unwrap();
        let results = app.layout().results.unwrap();

        click(&mut app, results.x + 2, results.y + 2);

        assert!(app.app_state().is_open());
    }

    #[test]
    fn draw_sizes_viewport_from_results_area() {
        let mut app = create_test_app();
        app.handle_key(ctrl('k'));
        app.draw().unwrap();

        let rows = app.layout().results.unwrap().height / ITEM_HEIGHT;
        assert_eq!(app.app_state().viewport().visible_rows(), rows as usize);
    }

    #[test]
    fn initial_state_applies_options() {
        let options = UiOptions {
            initial_query: Some("rust".to_string()),
            start_open: true,
            color: ColorConfig::disabled(),
        };

        let state = initial_state(corpus(), &options);

        assert!(state.is_open());
        assert!(state.input_focused());
        assert_eq!(state.results().len(), 1);
    }
}
