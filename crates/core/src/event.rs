//! Application-level events and terminal polling.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind, MouseEvent};

/// Application event
#[derive(Debug, Clone)]
pub enum Event {
    /// Keyboard event
    Key(KeyEvent),
    /// Mouse event
    Mouse(MouseEvent),
    /// Terminal resize event
    Resize(u16, u16),
    /// Tick event (drains background work such as document fetches)
    Tick,
}

/// Event handler for polling terminal events
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    /// Create new event handler with specified tick rate
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    /// Wait for next event
    pub fn next(&self) -> Result<Event> {
        if event::poll(self.tick_rate)? {
            Ok(Self::translate(event::read()?))
        } else {
            Ok(Event::Tick)
        }
    }

    fn translate(event: CrosstermEvent) -> Event {
        match event {
            // With the kitty keyboard protocol we receive Press, Release and Repeat.
            // Only Press is acted upon.
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Event::Key(key),
            CrosstermEvent::Mouse(mouse) => Event::Mouse(mouse),
            CrosstermEvent::Resize(width, height) => Event::Resize(width, height),
            _ => Event::Tick,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    #[test]
    fn test_key_release_becomes_tick() {
        let release = KeyEvent {
            code: KeyCode::Esc,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert!(matches!(
            EventHandler::translate(CrosstermEvent::Key(release)),
            Event::Tick
        ));

        let press = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert!(matches!(
            EventHandler::translate(CrosstermEvent::Key(press)),
            Event::Key(_)
        ));
    }

    #[test]
    fn test_resize_passes_through() {
        assert!(matches!(
            EventHandler::translate(CrosstermEvent::Resize(80, 24)),
            Event::Resize(80, 24)
        ));
    }
}
