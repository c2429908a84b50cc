//! Draggable documentation modal.
//!
//! [`ModalController`] owns the open/close/drag state machine and the
//! document shown inside the panel. The host registers its open trigger
//! in the controller's [`ElementRegistry`], forwards input events and
//! calls [`render_modal`] after drawing its own screen.

mod content;
mod controller;
mod drag;
mod element;
mod error;
mod panel;
mod view;

pub use content::{ContentState, DocumentContent};
pub use controller::{DocumentSource, EventOutcome, ModalController, ModalOptions};
pub use drag::{DragSession, DragState};
pub use element::{contains, ElementId, ElementRegistry};
pub use error::ModalError;
pub use panel::{Panel, Visibility};
pub use view::render_modal;
