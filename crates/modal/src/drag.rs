//! Pointer drag state machine.

use docmodal_core::{Offset, Point};

/// An in-progress drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    /// Pointer position when the gesture started
    pub origin: Point,
    /// Panel offset when the gesture started
    pub start_offset: Offset,
}

impl DragSession {
    /// Offset for the current pointer position.
    pub fn offset_at(&self, pointer: Point) -> Offset {
        self.start_offset + (pointer - self.origin)
    }
}

/// `Idle` until a press on the header, `Dragging` until release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

impl DragState {
    pub fn begin(&mut self, origin: Point, start_offset: Offset) {
        *self = DragState::Dragging(DragSession {
            origin,
            start_offset,
        });
    }

    /// New offset while dragging, `None` when idle.
    pub fn update(&self, pointer: Point) -> Option<Offset> {
        match self {
            DragState::Dragging(session) => Some(session.offset_at(pointer)),
            DragState::Idle => None,
        }
    }

    /// End the gesture. Returns whether one was active.
    pub fn end(&mut self) -> bool {
        std::mem::take(self) != DragState::Idle
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging(_))
    }
}
