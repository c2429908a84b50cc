//! Application-wide constants.

/// Maximum number of log entries kept in memory
pub const MAX_LOG_ENTRIES: usize = 1000;

/// Event poll interval in milliseconds (42ms = ~24 FPS)
pub const EVENT_HANDLER_INTERVAL_MS: u64 = 42;

/// Maximum accepted document size (4 MB)
pub const MAX_DOCUMENT_SIZE: u64 = 4 * 1024 * 1024;

/// Smallest panel the modal will lay out (including borders)
pub const MIN_PANEL_WIDTH: u16 = 20;
pub const MIN_PANEL_HEIGHT: u16 = 5;

/// Lines scrolled per mouse wheel step
pub const SCROLL_STEP: u16 = 3;

/// User agent sent with HTTP document requests
pub const USER_AGENT: &str = concat!("docmodal/", env!("CARGO_PKG_VERSION"));
