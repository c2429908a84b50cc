//! What the content sink currently shows.

use ratatui::text::Text;
use ratatui::widgets::{Paragraph, Wrap};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum ContentState {
    /// Nothing requested yet
    #[default]
    Empty,
    /// A fetch is in flight
    Loading { name: String },
    /// Fetched and rendered document
    Rendered { text: Text<'static> },
    /// Fetch failed; `message` is shown inline
    Failed { message: String },
}

/// The paragraph the content sink is drawn with.
///
/// Scroll limits are measured with the same wrapping, so both must come
/// from here.
pub(crate) fn wrapped_paragraph(text: Text<'static>) -> Paragraph<'static> {
    Paragraph::new(text).wrap(Wrap { trim: false })
}

/// Content sink state with its scroll position.
///
/// Scrolling counts wrapped rows at the current viewport size, so the
/// last row of a long paragraph is reachable.
#[derive(Debug, Clone, Default)]
pub struct DocumentContent {
    state: ContentState,
    scroll: u16,
    viewport: (u16, u16),
    rows: usize,
}

impl DocumentContent {
    pub fn state(&self) -> &ContentState {
        &self.state
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Rows the content takes once wrapped to the viewport width.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Replace the shown content; scrolling starts over.
    pub fn replace(&mut self, state: ContentState) {
        self.state = state;
        self.scroll = 0;
        self.measure();
    }

    /// Set the size of the area the content is drawn into.
    pub fn set_viewport(&mut self, width: u16, height: u16) {
        if self.viewport == (width, height) {
            return;
        }
        self.viewport = (width, height);
        self.measure();
        self.scroll = self.scroll.min(self.max_scroll());
    }

    fn measure(&mut self) {
        self.rows = wrapped_paragraph(self.display_text()).line_count(self.viewport.0);
    }

    /// Unstyled text for the current state.
    pub fn display_text(&self) -> Text<'static> {
        match &self.state {
            ContentState::Empty => Text::default(),
            ContentState::Rendered { text } => text.clone(),
            _ => Text::from(self.summary()),
        }
    }

    /// Text currently shown as a single string (for status lines and tests).
    pub fn summary(&self) -> String {
        match &self.state {
            ContentState::Empty => String::new(),
            ContentState::Loading { name } => format!("Loading {}…", name),
            ContentState::Rendered { text } => text
                .lines
                .iter()
                .map(|line| line.to_string())
                .collect::<Vec<_>>()
                .join("\n"),
            ContentState::Failed { message } => message.clone(),
        }
    }

    fn max_scroll(&self) -> u16 {
        let max = self.rows.saturating_sub(usize::from(self.viewport.1));
        max.min(usize::from(u16::MAX)) as u16
    }

    pub fn scroll_by(&mut self, delta: i32) {
        let max = i32::from(self.max_scroll());
        self.scroll = (i32::from(self.scroll) + delta).clamp(0, max) as u16;
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll = self.max_scroll();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(lines: usize) -> ContentState {
        let lines: Vec<String> = (0..lines).map(|i| format!("line {}", i)).collect();
        ContentState::Rendered {
            text: Text::from(lines.join("\n")),
        }
    }

    fn content(width: u16, height: u16) -> DocumentContent {
        let mut content = DocumentContent::default();
        content.set_viewport(width, height);
        content
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut content = content(20, 4);
        content.replace(rendered(10));

        content.scroll_by(-3);
        assert_eq!(content.scroll(), 0);

        content.scroll_by(4);
        assert_eq!(content.scroll(), 4);

        // Last page: rows 6..10 visible
        content.scroll_to_bottom();
        assert_eq!(content.scroll(), 6);
        content.scroll_by(1);
        assert_eq!(content.scroll(), 6);
    }

    #[test]
    fn test_short_content_does_not_scroll() {
        let mut content = content(20, 10);
        content.replace(rendered(3));

        content.scroll_to_bottom();
        assert_eq!(content.scroll(), 0);
    }

    #[test]
    fn test_long_line_scrolls_by_wrapped_rows() {
        let mut content = content(10, 3);
        content.replace(ContentState::Rendered {
            text: Text::from("a".repeat(100)),
        });

        assert_eq!(content.rows(), 10);
        content.scroll_to_bottom();
        assert_eq!(content.scroll(), 7);
    }

    #[test]
    fn test_narrower_viewport_remeasures() {
        let mut content = content(100, 3);
        content.replace(ContentState::Rendered {
            text: Text::from("a".repeat(100)),
        });
        assert_eq!(content.rows(), 1);

        content.set_viewport(10, 3);
        assert_eq!(content.rows(), 10);

        // Widening again pulls the scroll position back into range
        content.scroll_to_bottom();
        content.set_viewport(50, 3);
        assert_eq!(content.rows(), 2);
        assert_eq!(content.scroll(), 0);
    }

    #[test]
    fn test_replace_resets_scroll() {
        let mut content = content(20, 4);
        content.replace(rendered(10));
        content.scroll_by(5);

        content.replace(ContentState::Failed {
            message: "boom".into(),
        });
        assert_eq!(content.scroll(), 0);
        assert_eq!(content.summary(), "boom");
    }
}
