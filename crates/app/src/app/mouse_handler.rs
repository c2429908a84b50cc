//! Mouse event handling.

use crossterm::event::MouseEvent;

use docmodal_modal::EventOutcome;

use super::App;

impl App {
    /// Handle mouse event
    ///
    /// The host screen has no mouse targets of its own besides the open
    /// button, which the modal controller tracks as its open trigger.
    pub(super) fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        if self.modal.handle_mouse(mouse) == EventOutcome::Consumed {
            self.state.needs_redraw = true;
        }
    }
}
