//! Core types for docmodal.
//!
//! Terminal event polling and the small amount of screen geometry
//! shared by the modal and the host application.

pub mod event;
pub mod geometry;

pub use event::{Event, EventHandler};
pub use geometry::{Offset, Point};
