//! Markdown-to-styled-lines renderer.
//!
//! Produces unwrapped lines; the panel wraps them to its current width,
//! so the same rendering survives resizes and drags.

use std::mem;

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use unicode_width::UnicodeWidthStr;

use docmodal_theme::Theme;

use crate::DocumentRenderer;

const RULE_WIDTH: usize = 40;
const CODE_INDENT: &str = "  ";

/// Styles for each markdown construct, derived from a theme.
#[derive(Debug, Clone, Copy)]
struct MarkdownStyles {
    body: Style,
    h1: Style,
    h2: Style,
    h3: Style,
    code: Style,
    link: Style,
    muted: Style,
    marker: Style,
}

impl MarkdownStyles {
    fn from_theme(theme: &Theme) -> Self {
        let body = Style::default().fg(theme.fg);
        let accent = Style::default()
            .fg(theme.accented_fg)
            .add_modifier(Modifier::BOLD);
        Self {
            body,
            h1: accent.add_modifier(Modifier::UNDERLINED),
            h2: accent,
            h3: body.add_modifier(Modifier::BOLD),
            code: Style::default().fg(theme.warning),
            link: Style::default()
                .fg(theme.accented_fg)
                .add_modifier(Modifier::UNDERLINED),
            muted: Style::default().fg(theme.disabled),
            marker: Style::default().fg(theme.success),
        }
    }

    fn heading(&self, level: HeadingLevel) -> Style {
        match level {
            HeadingLevel::H1 => self.h1,
            HeadingLevel::H2 => self.h2,
            _ => self.h3,
        }
    }
}

/// Renders CommonMark (plus tables, strikethrough and task lists).
#[derive(Debug, Clone, Copy)]
pub struct MarkdownRenderer {
    styles: MarkdownStyles,
}

impl MarkdownRenderer {
    pub fn new(theme: &Theme) -> Self {
        Self {
            styles: MarkdownStyles::from_theme(theme),
        }
    }
}

impl DocumentRenderer for MarkdownRenderer {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn render(&self, source: &str) -> Text<'static> {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_FOOTNOTES;

        let mut writer = Writer::new(self.styles);
        for event in Parser::new_ext(source, options) {
            writer.event(event);
        }
        writer.finish()
    }
}

#[derive(Debug, Default)]
struct TableState {
    rows: Vec<Vec<String>>,
    row: Vec<String>,
    cell: Option<String>,
    has_header: bool,
}

/// Accumulates lines while walking parser events.
struct Writer {
    styles: MarkdownStyles,
    lines: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
    style_stack: Vec<Style>,
    quote_depth: usize,
    /// One entry per open list; `Some(n)` is the next ordered number
    lists: Vec<Option<u64>>,
    pending_marker: Option<String>,
    in_code_block: bool,
    /// Open links: destination and index of the first span of the link text
    links: Vec<(String, usize)>,
    table: Option<TableState>,
}

impl Writer {
    fn new(styles: MarkdownStyles) -> Self {
        Self {
            styles,
            lines: Vec::new(),
            spans: Vec::new(),
            style_stack: Vec::new(),
            quote_depth: 0,
            lists: Vec::new(),
            pending_marker: None,
            in_code_block: false,
            links: Vec::new(),
            table: None,
        }
    }

    fn style(&self) -> Style {
        self.style_stack.last().copied().unwrap_or(self.styles.body)
    }

    fn push_style(&mut self, patch: Style) {
        let style = self.style().patch(patch);
        self.style_stack.push(style);
    }

    fn pop_style(&mut self) {
        self.style_stack.pop();
    }

    /// Emit quote bars, list indentation and any pending list marker.
    fn start_line(&mut self) {
        if !self.spans.is_empty() {
            return;
        }
        if self.quote_depth > 0 {
            self.spans
                .push(Span::styled("│ ".repeat(self.quote_depth), self.styles.muted));
        }
        if let Some(marker) = self.pending_marker.take() {
            let indent = "  ".repeat(self.lists.len().saturating_sub(1));
            self.spans.push(Span::raw(indent));
            self.spans.push(Span::styled(marker, self.styles.marker));
        } else if !self.lists.is_empty() {
            self.spans.push(Span::raw("  ".repeat(self.lists.len())));
        }
    }

    fn text(&mut self, text: &str, style: Style) {
        if let Some(cell) = self.table.as_mut().and_then(|t| t.cell.as_mut()) {
            cell.push_str(text);
            return;
        }
        self.start_line();
        self.spans.push(Span::styled(text.to_string(), style));
    }

    fn flush(&mut self) {
        if !self.spans.is_empty() {
            self.lines.push(Line::from(mem::take(&mut self.spans)));
        }
    }

    /// Separate blocks by exactly one empty line.
    fn blank(&mut self) {
        self.flush();
        if self.lines.last().is_some_and(|line| line.width() > 0) {
            self.lines.push(Line::default());
        }
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) if self.in_code_block => {
                for line in text.lines() {
                    self.start_line();
                    self.spans.push(Span::styled(
                        format!("{}{}", CODE_INDENT, line.replace('\t', "    ")),
                        self.styles.code,
                    ));
                    self.flush();
                }
            }
            Event::Text(text) => self.text(&text, self.style()),
            Event::Code(code) => self.text(&code, self.styles.code),
            Event::Html(html) => {
                for line in html.lines() {
                    self.text(line, self.styles.muted);
                    self.flush();
                }
            }
            Event::InlineHtml(html) => self.text(&html, self.styles.muted),
            Event::FootnoteReference(name) => {
                self.text(&format!("[^{}]", name), self.styles.muted)
            }
            Event::SoftBreak => self.text(" ", self.style()),
            Event::HardBreak => self.flush(),
            Event::Rule => {
                self.blank();
                self.lines
                    .push(Line::styled("─".repeat(RULE_WIDTH), self.styles.muted));
                self.blank();
            }
            Event::TaskListMarker(checked) => {
                let marker = if checked { "[x] " } else { "[ ] " };
                self.text(marker, self.styles.marker);
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { level, .. } => {
                self.blank();
                let style = self.styles.heading(level);
                self.style_stack.push(style);
            }
            Tag::BlockQuote(_) => {
                self.flush();
                self.quote_depth += 1;
                self.push_style(Style::default().add_modifier(Modifier::ITALIC));
            }
            Tag::CodeBlock(kind) => {
                self.blank();
                self.in_code_block = true;
                if let CodeBlockKind::Fenced(lang) = kind {
                    if !lang.is_empty() {
                        self.text(&lang, self.styles.muted);
                        self.flush();
                    }
                }
            }
            Tag::List(start) => {
                self.flush();
                self.lists.push(start);
            }
            Tag::Item => {
                self.flush();
                let marker = match self.lists.last_mut() {
                    Some(Some(number)) => {
                        let marker = format!("{}. ", number);
                        *number += 1;
                        marker
                    }
                    _ => "• ".to_string(),
                };
                self.pending_marker = Some(marker);
            }
            Tag::Emphasis => self.push_style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => {
                self.push_style(Style::default().add_modifier(Modifier::CROSSED_OUT))
            }
            Tag::Link { dest_url, .. } => {
                self.links.push((dest_url.into_string(), self.spans.len()));
                self.push_style(self.styles.link);
            }
            Tag::Image { .. } => {
                self.push_style(self.styles.muted);
                self.text("[image: ", self.style());
            }
            Tag::Table(_) => {
                self.blank();
                self.table = Some(TableState::default());
            }
            Tag::TableHead => {
                if let Some(table) = self.table.as_mut() {
                    table.has_header = true;
                }
            }
            Tag::TableCell => {
                if let Some(table) = self.table.as_mut() {
                    table.cell = Some(String::new());
                }
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.blank(),
            TagEnd::Heading(_) => {
                self.pop_style();
                self.blank();
            }
            TagEnd::BlockQuote(_) => {
                self.pop_style();
                self.flush();
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.blank();
            }
            TagEnd::CodeBlock => {
                self.in_code_block = false;
                self.blank();
            }
            TagEnd::List(_) => {
                self.flush();
                self.lists.pop();
                if self.lists.is_empty() {
                    self.blank();
                }
            }
            TagEnd::Item => {
                // An empty item still shows its marker
                if self.pending_marker.is_some() {
                    self.start_line();
                }
                self.flush();
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => self.pop_style(),
            TagEnd::Link => {
                self.pop_style();
                if let Some((url, first_span)) = self.links.pop() {
                    self.link_target(url, first_span);
                }
            }
            TagEnd::Image => {
                self.text("]", self.style());
                self.pop_style();
            }
            TagEnd::TableCell => {
                if let Some(table) = self.table.as_mut() {
                    let cell = table.cell.take().unwrap_or_default();
                    table.row.push(cell.trim().to_string());
                }
            }
            TagEnd::TableHead | TagEnd::TableRow => {
                if let Some(table) = self.table.as_mut() {
                    if !table.row.is_empty() {
                        let row = mem::take(&mut table.row);
                        table.rows.push(row);
                    }
                }
            }
            TagEnd::Table => {
                if let Some(table) = self.table.take() {
                    self.table_lines(table);
                }
                self.blank();
            }
            _ => {}
        }
    }

    /// Show the destination after the link text unless it adds nothing.
    fn link_target(&mut self, url: String, first_span: usize) {
        if url.is_empty() || url.starts_with('#') {
            return;
        }
        let label: String = self
            .spans
            .get(first_span..)
            .unwrap_or_default()
            .iter()
            .map(|span| span.content.as_ref())
            .collect();
        if label != url && label.strip_prefix("mailto:") != Some(url.as_str()) {
            self.text(&format!(" ({})", url), self.styles.muted);
        }
    }

    fn table_lines(&mut self, table: TableState) {
        let columns = table.rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut widths = vec![0usize; columns];
        for row in &table.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.width());
            }
        }

        for (index, row) in table.rows.iter().enumerate() {
            let is_header = table.has_header && index == 0;
            let style = if is_header {
                self.styles.body.add_modifier(Modifier::BOLD)
            } else {
                self.styles.body
            };

            self.start_line();
            for (column, width) in widths.iter().enumerate() {
                if column > 0 {
                    self.spans.push(Span::styled(" │ ", self.styles.muted));
                }
                let cell = row.get(column).map(String::as_str).unwrap_or("");
                let padding = width.saturating_sub(cell.width());
                self.spans
                    .push(Span::styled(format!("{}{}", cell, " ".repeat(padding)), style));
            }
            self.flush();

            if is_header {
                let rule: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
                self.start_line();
                self.spans
                    .push(Span::styled(rule.join("─┼─"), self.styles.muted));
                self.flush();
            }
        }
    }

    fn finish(mut self) -> Text<'static> {
        self.flush();
        while self.lines.last().is_some_and(|line| line.width() == 0) {
            self.lines.pop();
        }
        Text::from(self.lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(source: &str) -> Vec<String> {
        MarkdownRenderer::new(Theme::get_by_name("default"))
            .render(source)
            .lines
            .iter()
            .map(|line| line.to_string())
            .collect()
    }

    #[test]
    fn test_heading_and_paragraph() {
        let lines = render("# DevToolBox\n\nSome *emphasis* text.\n");
        assert_eq!(lines, vec!["DevToolBox", "", "Some emphasis text."]);
    }

    #[test]
    fn test_heading_is_styled() {
        let text = MarkdownRenderer::new(Theme::get_by_name("default")).render("## Usage");
        let span = &text.lines[0].spans[0];
        assert!(span.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_lists() {
        let lines = render("- one\n- two\n  - nested\n\n3. third\n4. fourth\n");
        assert_eq!(
            lines,
            vec!["• one", "• two", "  • nested", "", "3. third", "4. fourth"]
        );
    }

    #[test]
    fn test_task_list() {
        let lines = render("- [x] done\n- [ ] todo\n");
        assert_eq!(lines, vec!["• [x] done", "• [ ] todo"]);
    }

    #[test]
    fn test_fenced_code_keeps_layout() {
        let lines = render("```rust\nfn main() {\n    run();\n}\n```\n");
        assert_eq!(lines, vec!["rust", "  fn main() {", "      run();", "  }"]);
    }

    #[test]
    fn test_link_shows_destination() {
        let lines = render("See [the docs](https://example.com/docs).");
        assert_eq!(lines, vec!["See the docs (https://example.com/docs)."]);
    }

    #[test]
    fn test_autolink_not_repeated() {
        let lines = render("<https://example.com>");
        assert_eq!(lines, vec!["https://example.com"]);
    }

    #[test]
    fn test_block_quote() {
        let lines = render("> quoted\n");
        assert_eq!(lines, vec!["│ quoted"]);
    }

    #[test]
    fn test_table_columns_align() {
        let lines = render("| Tool | Key |\n|---|---|\n| JSON | j |\n| Base64 | b |\n");
        assert_eq!(
            lines,
            vec![
                "Tool   │ Key",
                "───────┼────",
                "JSON   │ j  ",
                "Base64 │ b  ",
            ]
        );
    }

    #[test]
    fn test_rule() {
        let rule = "─".repeat(RULE_WIDTH);
        let lines = render("above\n\n---\n\nbelow\n");
        assert_eq!(lines, vec!["above", "", rule.as_str(), "", "below"]);
    }
}
