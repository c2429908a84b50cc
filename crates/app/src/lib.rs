//! Application orchestrator for docmodal.
//!
//! This crate provides:
//! - `App` - the event loop routing input to the host screen and the
//!   documentation modal
//! - `AppState` - terminal size, host layout, theme and config
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        docmodal (bin)                            │
//! │  main.rs - CLI, terminal setup; ui.rs - frame rendering         │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//!                                ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                   docmodal-app (this crate)                      │
//! │  App, AppState, host layout, key/mouse routing                  │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//!                                ▼
//!     ┌──────────┐      ┌──────────────┐      ┌──────────┐
//!     │  modal   │ ───▶ │   document   │      │  theme   │
//!     └──────────┘      └──────────────┘      └──────────┘
//! ```

pub mod app;
pub mod state;

pub use app::App;
pub use state::{latest_problem, AppState, HostLayout, OPEN_BUTTON_LABEL};
