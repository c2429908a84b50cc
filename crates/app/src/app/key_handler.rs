//! Keyboard event handling for the application.
//!
//! Global quit keys first, then the modal, then host hotkeys.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use docmodal_logger as logger;
use docmodal_modal::EventOutcome;

use super::App;

impl App {
    /// Handle keyboard event
    pub(super) fn handle_key_event(&mut self, key: KeyEvent) {
        logger::debug(format!(
            "Key event: code={:?}, modifiers={:?}",
            key.code, key.modifiers
        ));

        if is_force_quit(&key) {
            self.state.should_quit = true;
            return;
        }

        if self.modal.handle_key(key) == EventOutcome::Consumed {
            return;
        }

        match key.code {
            KeyCode::F(1) | KeyCode::Char('?') => self.open_documentation(),
            KeyCode::Char('q') if !self.modal.is_shown() => self.state.should_quit = true,
            _ => {}
        }
    }
}

/// Ctrl+C and Ctrl+Q quit from anywhere.
fn is_force_quit(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
}
