//! Application state and host screen layout.

use ratatui::layout::Rect;
use unicode_width::UnicodeWidthStr;

use docmodal_config::Config;
use docmodal_logger::{self as logger, LogLevel};
use docmodal_theme::Theme;

/// Label of the host button that opens the documentation.
pub const OPEN_BUTTON_LABEL: &str = "[ README ]";

/// Terminal dimensions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TerminalState {
    pub width: u16,
    pub height: u16,
}

impl TerminalState {
    pub fn area(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }
}

/// Where the host screen draws its parts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostLayout {
    pub title: Rect,
    pub hint: Rect,
    /// `None` when disabled in config or when the screen is too small
    pub open_button: Option<Rect>,
    pub status: Rect,
}

impl HostLayout {
    /// Compute the host layout for a screen.
    ///
    /// Rows: title, blank, hint, blank, open button; status line at the
    /// bottom. Rows that do not fit collapse to empty rects.
    pub fn compute(screen: Rect, show_open_button: bool) -> Self {
        let row = |y: u16| {
            if y < screen.height {
                Rect::new(screen.x, screen.y + y, screen.width, 1)
            } else {
                Rect::default()
            }
        };

        let status = if screen.height > 0 {
            Rect::new(screen.x, screen.bottom() - 1, screen.width, 1)
        } else {
            Rect::default()
        };

        let button_width = OPEN_BUTTON_LABEL.width() as u16;
        // The button row must not overlap the status line
        let open_button = (show_open_button
            && screen.height > 5
            && screen.width >= button_width + 2)
            .then(|| Rect::new(screen.x + 2, screen.y + 4, button_width, 1));

        Self {
            title: row(0),
            hint: row(2),
            open_button,
            status,
        }
    }
}

/// Global application state
#[derive(Debug)]
pub struct AppState {
    /// Should application quit
    pub should_quit: bool,
    /// Terminal state
    pub terminal: TerminalState,
    /// Host screen layout for the current terminal size
    pub layout: HostLayout,
    /// Current theme
    pub theme: &'static Theme,
    /// Application configuration
    pub config: Config,
    /// Flag indicating UI needs to be redrawn
    pub needs_redraw: bool,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let theme = Theme::get_by_name(&config.general.theme);
        Self {
            should_quit: false,
            terminal: TerminalState::default(),
            layout: HostLayout::default(),
            theme,
            config,
            needs_redraw: true,
        }
    }

    /// Record new terminal dimensions and recompute the host layout.
    pub fn update_terminal_size(&mut self, width: u16, height: u16) {
        self.terminal = TerminalState { width, height };
        self.layout = HostLayout::compute(
            self.terminal.area(),
            self.config.modal.show_open_button,
        );
        self.needs_redraw = true;
    }

    /// Document location as configured, for the status line.
    pub fn document_label(&self) -> String {
        let document = &self.config.document;
        format!("{} (base {})", document.path, document.base)
    }
}

/// Latest warning or error from the log, for the status line.
pub fn latest_problem() -> Option<String> {
    logger::latest(LogLevel::Warn).map(|entry| format!("[{}] {}", entry.timestamp, entry.message))
}
