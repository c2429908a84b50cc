//! Theme color definitions.

use ratatui::style::Color;

/// Application theme with semantic color assignments.
///
/// The same 10-color palette styles the host screen, the modal frame
/// and the rendered document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    /// Theme name for display
    pub name: &'static str,

    /// Screen background
    pub bg: Color,
    /// Main text
    pub fg: Color,

    /// Status line and panel background
    pub accented_bg: Color,
    /// Panel borders, headings, link text
    pub accented_fg: Color,

    /// Focused button background
    pub selected_bg: Color,
    /// Focused button text
    pub selected_fg: Color,

    /// Secondary text, rules, quotes
    pub disabled: Color,

    /// List markers
    pub success: Color,
    /// Inline and block code
    pub warning: Color,
    /// Fetch errors
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        *Self::get_by_name("default")
    }
}
