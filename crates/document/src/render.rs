//! Turning document text into styled terminal lines.

use ratatui::style::Style;
use ratatui::text::{Line, Text};

use docmodal_config::RendererChoice;
use docmodal_logger as logger;
use docmodal_theme::Theme;

/// Converts raw document text into displayable lines.
pub trait DocumentRenderer: Send {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn render(&self, source: &str) -> Text<'static>;
}

/// Shows the document verbatim, like a `<pre>` block.
///
/// Whitespace is preserved; wrapping is left to the panel.
#[derive(Debug, Clone, Copy)]
pub struct PlainTextRenderer {
    style: Style,
}

impl PlainTextRenderer {
    pub fn new(theme: &Theme) -> Self {
        Self {
            style: Style::default().fg(theme.fg),
        }
    }
}

impl DocumentRenderer for PlainTextRenderer {
    fn name(&self) -> &'static str {
        "plain"
    }

    fn render(&self, source: &str) -> Text<'static> {
        // Tabs would be rendered as a single cell
        let lines: Vec<Line<'static>> = source
            .lines()
            .map(|line| Line::styled(line.replace('\t', "    "), self.style))
            .collect();
        Text::from(lines)
    }
}

/// Markdown renderer if compiled in.
pub fn markdown_renderer(theme: &Theme) -> Option<Box<dyn DocumentRenderer>> {
    #[cfg(feature = "markdown")]
    {
        Some(Box::new(crate::markdown::MarkdownRenderer::new(theme)))
    }
    #[cfg(not(feature = "markdown"))]
    {
        let _ = theme;
        None
    }
}

/// Pick the renderer for a configured choice.
///
/// A missing markdown renderer is not an error: the document is shown
/// as plain text instead.
pub fn renderer_for(choice: RendererChoice, theme: &Theme) -> Box<dyn DocumentRenderer> {
    if choice == RendererChoice::Plain {
        return Box::new(PlainTextRenderer::new(theme));
    }

    match markdown_renderer(theme) {
        Some(renderer) => renderer,
        None => {
            if choice == RendererChoice::Markdown {
                logger::info("Markdown renderer not available, showing documents as plain text");
            }
            Box::new(PlainTextRenderer::new(theme))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_preserves_lines_and_markup() {
        let renderer = PlainTextRenderer::new(Theme::get_by_name("default"));
        let text = renderer.render("# Title\n\n  indented\tcell");

        assert_eq!(text.lines.len(), 3);
        assert_eq!(text.lines[0].to_string(), "# Title");
        assert_eq!(text.lines[2].to_string(), "  indented    cell");
    }

    #[test]
    fn test_plain_choice_is_always_plain() {
        let renderer = renderer_for(RendererChoice::Plain, Theme::get_by_name("default"));
        assert_eq!(renderer.name(), "plain");
    }

    #[cfg(feature = "markdown")]
    #[test]
    fn test_auto_prefers_markdown() {
        let renderer = renderer_for(RendererChoice::Auto, Theme::get_by_name("default"));
        assert_eq!(renderer.name(), "markdown");
    }

    #[cfg(not(feature = "markdown"))]
    #[test]
    fn test_markdown_falls_back_to_plain() {
        let renderer = renderer_for(RendererChoice::Markdown, Theme::get_by_name("default"));
        assert_eq!(renderer.name(), "plain");
    }
}
