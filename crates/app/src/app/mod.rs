//! Main application module.
//!
//! Contains the App struct and its event handlers.

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use ratatui::{backend::Backend, Frame, Terminal};

use docmodal_config::constants::{EVENT_HANDLER_INTERVAL_MS, MAX_LOG_ENTRIES};
use docmodal_config::Config;
use docmodal_core::{Event, EventHandler};
use docmodal_document::{renderer_for, DefaultFetcher, DocumentFetcher};
use docmodal_logger as logger;
use docmodal_modal::{DocumentSource, ElementId, ModalController, ModalOptions};

use crate::state::AppState;

mod key_handler;
mod mouse_handler;

const LOG_FILE_NAME: &str = "docmodal.log";

/// Main application
pub struct App {
    state: AppState,
    modal: ModalController,
    event_handler: EventHandler,
}

impl App {
    /// Create the application: starts logging and wires the modal to the
    /// network/filesystem fetcher.
    pub fn new(config: Config) -> Self {
        init_logger(&config);
        logger::info("Application started");

        let timeout = Duration::from_secs(config.document.timeout_secs);
        let fetcher = Arc::new(DefaultFetcher::new(timeout));
        Self::with_fetcher(config, fetcher)
    }

    /// Create the application with a specific document fetcher.
    pub fn with_fetcher(config: Config, fetcher: Arc<dyn DocumentFetcher>) -> Self {
        let state = AppState::new(config);
        let renderer = renderer_for(state.config.document.renderer, state.theme);
        let source = DocumentSource {
            base: state.config.document.base.clone(),
            path: state.config.document.path.clone(),
        };
        let modal = ModalController::new(
            source,
            fetcher,
            renderer,
            ModalOptions::from(&state.config),
        );

        Self {
            state,
            modal,
            event_handler: EventHandler::new(Duration::from_millis(EVENT_HANDLER_INTERVAL_MS)),
        }
    }

    /// Create the application for a terminal of the given size and report
    /// any screen regions the modal cannot bind to.
    pub fn new_with_size(config: Config, width: u16, height: u16) -> Self {
        let mut app = Self::new(config);
        app.resize(width, height);
        app.modal.report_missing_elements();
        app
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn modal(&self) -> &ModalController {
        &self.modal
    }

    /// Open the documentation modal.
    pub fn open_documentation(&mut self) {
        self.modal.open();
        self.state.needs_redraw = true;
    }

    /// Lay out the host screen and the modal for new terminal dimensions.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.state.update_terminal_size(width, height);
        self.modal.layout(self.state.terminal.area());

        let elements = self.modal.elements_mut();
        match self.state.layout.open_button {
            Some(button) => elements.register(ElementId::OpenTrigger, button),
            None => elements.remove(ElementId::OpenTrigger),
        }
    }

    /// Run the main application loop
    pub fn run<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        render_fn: impl Fn(&mut Frame<'_>, &AppState, &ModalController),
    ) -> Result<()> {
        let size = terminal.size()?;
        if (size.width, size.height) != (self.state.terminal.width, self.state.terminal.height) {
            self.resize(size.width, size.height);
        }

        while !self.state.should_quit {
            match self.event_handler.next()? {
                Event::Key(key) => {
                    self.handle_key_event(key);
                    self.state.needs_redraw = true;
                }
                Event::Mouse(mouse) => self.handle_mouse_event(mouse),
                Event::Resize(width, height) => self.resize(width, height),
                Event::Tick => self.handle_tick(),
            }

            // Render UI only when needed
            if self.state.needs_redraw {
                terminal.draw(|frame| render_fn(frame, &self.state, &self.modal))?;
                self.state.needs_redraw = false;
            }
        }

        logger::info("Application stopped");
        Ok(())
    }

    /// Apply finished document fetches
    fn handle_tick(&mut self) {
        if self.modal.poll() {
            self.state.needs_redraw = true;
        }
    }
}

/// Log to `logging.file_path`, or to the cache directory by default.
fn init_logger(config: &Config) {
    let log_file_path = match config.logging.file_path {
        Some(ref path) => PathBuf::from(path),
        None => docmodal_config::get_cache_dir()
            .map(|dir| dir.join(LOG_FILE_NAME))
            .unwrap_or_else(|_| std::env::temp_dir().join(LOG_FILE_NAME)),
    };
    let min_log_level = logger::LogLevel::from_str(&config.logging.min_level)
        .ok()
        .unwrap_or(logger::LogLevel::Info);
    logger::init(log_file_path, MAX_LOG_ENTRIES, min_log_level);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{
        KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    };
    use docmodal_document::{DocumentLocation, FetchError};
    use ratatui::layout::Rect;

    struct StaticFetcher;

    impl DocumentFetcher for StaticFetcher {
        fn fetch(&self, _location: &DocumentLocation) -> Result<String, FetchError> {
            Ok("# Tools".to_string())
        }
    }

    fn app_with(config: Config) -> App {
        let mut app = App::with_fetcher(config, Arc::new(StaticFetcher));
        app.resize(100, 40);
        app
    }

    fn app() -> App {
        app_with(Config::default())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(app: &mut App, column: u16, row: u16) {
        app.handle_mouse_event(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        });
    }

    #[test]
    fn test_f1_opens_documentation() {
        let mut app = app();
        app.handle_key_event(key(KeyCode::F(1)));
        assert!(app.modal().is_shown());
    }

    #[test]
    fn test_q_quits_only_when_hidden() {
        let mut app = app();
        app.handle_key_event(key(KeyCode::Char('?')));
        app.handle_key_event(key(KeyCode::Char('q')));
        assert!(!app.state().should_quit);

        app.handle_key_event(key(KeyCode::Esc));
        assert!(!app.modal().is_shown());

        app.handle_key_event(key(KeyCode::Char('q')));
        assert!(app.state().should_quit);
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let mut app = app();
        app.open_documentation();

        app.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.state().should_quit);
    }

    #[test]
    fn test_open_button_click() {
        let mut app = app();
        let button = app.state().layout.open_button.unwrap();

        click(&mut app, button.x + 1, button.y);
        assert!(app.modal().is_shown());
    }

    #[test]
    fn test_disabled_open_button_is_not_registered() {
        let mut config = Config::default();
        config.modal.show_open_button = false;
        let mut app = app_with(config);

        assert!(!app.modal().elements().is_registered(ElementId::OpenTrigger));
        click(&mut app, 3, 4);
        assert!(!app.modal().is_shown());

        // Keyboard still works
        app.handle_key_event(key(KeyCode::F(1)));
        assert!(app.modal().is_shown());
    }

    #[test]
    fn test_resize_recenters_panel() {
        let mut app = app();
        app.resize(60, 20);

        assert_eq!(
            app.modal().elements().get(ElementId::Panel),
            Some(Rect::new(6, 2, 48, 16))
        );
    }

    #[test]
    fn test_tick_applies_fetched_document() {
        let mut app = app();
        app.open_documentation();

        for _ in 0..500 {
            app.handle_tick();
            if app.modal().content().summary().contains("Tools") {
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        assert!(app.modal().content().summary().contains("Tools"));
    }
}
