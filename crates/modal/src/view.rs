//! Drawing the documentation panel.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Widget},
};

use docmodal_theme::Theme;

use crate::content::wrapped_paragraph;
use crate::controller::CLOSE_LABEL;
use crate::{ContentState, ElementId, ModalController};

/// Draw the panel over whatever the host already rendered into `buf`.
///
/// Nothing is drawn while hidden. The panel is drawn at full size into
/// a scratch buffer and only the on-screen part is copied, so a panel
/// dragged past the left or bottom edge is cut off instead of being
/// squashed.
pub fn render_modal(controller: &ModalController, buf: &mut Buffer, theme: &Theme) {
    if !controller.is_shown() {
        return;
    }
    let Some(home) = controller.elements().get(ElementId::Panel) else {
        return;
    };
    let Some(visible) = controller.placed(ElementId::Panel) else {
        return;
    };

    let mut scratch = Buffer::empty(Rect::new(0, 0, home.width, home.height));
    render_panel(controller, scratch.area, &mut scratch, theme);

    let offset = controller.offset();
    let left = i32::from(home.x) + offset.dx;
    let top = i32::from(home.y) + offset.dy;

    for y in visible.top()..visible.bottom() {
        for x in visible.left()..visible.right() {
            let source = ((i32::from(x) - left) as u16, (i32::from(y) - top) as u16);
            if let (Some(from), Some(to)) = (scratch.cell(source), buf.cell_mut((x, y))) {
                *to = from.clone();
            }
        }
    }
}

fn render_panel(controller: &ModalController, area: Rect, buf: &mut Buffer, theme: &Theme) {
    Clear.render(area, buf);

    let border_style = Style::default().fg(theme.accented_fg);
    let title = Line::from(vec![
        Span::styled(
            CLOSE_LABEL,
            Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{} ", controller.title()),
            border_style.add_modifier(Modifier::BOLD),
        ),
    ]);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
        .style(Style::default().bg(theme.accented_bg).fg(theme.fg));

    let inner = block.inner(area);
    block.render(area, buf);

    let content = controller.content();
    let style = match content.state() {
        ContentState::Loading { .. } => Style::default()
            .fg(theme.disabled)
            .add_modifier(Modifier::ITALIC),
        ContentState::Failed { .. } => Style::default().fg(theme.error),
        ContentState::Empty | ContentState::Rendered { .. } => Style::default(),
    };

    wrapped_paragraph(content.display_text())
        .style(style)
        .scroll((content.scroll(), 0))
        .render(inner, buf);
}
