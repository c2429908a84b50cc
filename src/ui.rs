use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use docmodal_app::{latest_problem, AppState, OPEN_BUTTON_LABEL};
use docmodal_modal::{render_modal, ModalController};

const HINT_HIDDEN: &str = "F1 or ? opens the documentation, q quits";
const HINT_SHOWN: &str = "Drag the header to move the panel, [X] or Esc closes it";

/// Render the host screen, then the documentation modal on top of it
pub fn render(frame: &mut Frame, state: &AppState, modal: &ModalController) {
    let theme = state.theme;
    let layout = &state.layout;

    // Set application background
    let background = Block::default().style(Style::default().bg(theme.bg).fg(theme.fg));
    frame.render_widget(background, frame.area());

    let title = Line::from(vec![
        Span::styled(
            " docmodal ",
            Style::default()
                .fg(theme.accented_fg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            concat!("v", env!("CARGO_PKG_VERSION")),
            Style::default().fg(theme.disabled),
        ),
    ]);
    frame.render_widget(Paragraph::new(title), layout.title);

    let hint = if modal.is_shown() { HINT_SHOWN } else { HINT_HIDDEN };
    frame.render_widget(
        Paragraph::new(Span::styled(format!("  {}", hint), Style::default().fg(theme.fg))),
        layout.hint,
    );

    if let Some(button) = layout.open_button {
        let style = if modal.is_shown() {
            Style::default().fg(theme.disabled)
        } else {
            Style::default()
                .fg(theme.selected_fg)
                .bg(theme.selected_bg)
                .add_modifier(Modifier::BOLD)
        };
        frame.render_widget(Paragraph::new(Span::styled(OPEN_BUTTON_LABEL, style)), button);
    }

    let mut status = Line::from(vec![
        Span::styled(" Document: ", Style::default().fg(theme.disabled)),
        Span::styled(state.document_label(), Style::default().fg(theme.fg)),
    ]);
    if let Some(problem) = latest_problem() {
        status.push_span(Span::styled(
            format!("  {}", problem),
            Style::default().fg(theme.warning),
        ));
    }
    frame.render_widget(
        Paragraph::new(status).style(Style::default().bg(theme.accented_bg)),
        layout.status,
    );

    render_modal(modal, frame.buffer_mut(), theme);
}
