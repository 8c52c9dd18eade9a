//! Yes/no confirmation popup component.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::tui::theme::*;

use super::{centered_rect, wrap_text};

/// Render the confirmation popup for a pending save or delete.
pub fn render_confirm_popup(frame: &mut Frame, area: Rect, prompt: &str) {
    let popup_width = 50u16;
    let message = wrap_text(prompt, popup_width.saturating_sub(4) as usize);
    let popup_height = message.len() as u16 + 6;
    let popup_area = centered_rect(area, popup_width, popup_height);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let mut lines: Vec<Line> = vec![];
    lines.push(Line::from(vec![Span::styled(
        "Confirm",
        Style::new().fg(LOGO_CORAL).bold(),
    )]));
    lines.push(Line::raw(""));
    for line in message {
        lines.push(Line::styled(line, Style::new().fg(TEXT_WHITE)));
    }
    lines.push(Line::raw(""));

    // Footer with options
    lines.push(Line::from(vec![
        Span::styled("[y]", Style::new().fg(LOGO_CORAL)),
        Span::styled(" yes  ", Style::new().fg(TEXT_DIM)),
        Span::styled("[n]", Style::new().fg(TEXT_WHITE)),
        Span::styled(" no", Style::new().fg(TEXT_DIM)),
    ]));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::new().fg(LOGO_CORAL))
        .style(Style::new().bg(Color::Black));

    frame.render_widget(Paragraph::new(lines).block(block), popup_area);
}
