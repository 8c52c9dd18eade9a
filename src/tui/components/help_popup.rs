//! Help popup component.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::tui::theme::*;

use super::centered_rect;

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("j/k", "Move through the sidebar"),
            ("Enter", "Open the highlighted screen"),
            ("1-9", "Jump to screen by number"),
            ("Esc", "Back to the sidebar"),
            ("q", "Quit (Ctrl+C anywhere)"),
        ],
    ),
    (
        "Lists",
        &[
            ("j/k", "Move between rows"),
            ("a/n", "New record"),
            ("e/Enter", "Edit highlighted record"),
            ("d/x", "Delete highlighted record"),
            ("r", "Reload from the server"),
        ],
    ),
    (
        "Forms",
        &[
            ("Tab", "Next field (Shift+Tab back)"),
            ("←/→", "Change a dropdown value"),
            ("Space", "Toggle a checkbox"),
            ("Enter", "Submit / calculate"),
            ("Ctrl+R", "Reset the form"),
        ],
    ),
    (
        "Technologies",
        &[
            ("j/k", "Move within a list"),
            ("←/→", "Switch between lists"),
            ("Enter", "Add or remove technology"),
        ],
    ),
];

/// Render the help popup with keyboard shortcuts.
pub fn render_help_popup(frame: &mut Frame, area: Rect) {
    let rows: usize = SECTIONS.iter().map(|(_, keys)| keys.len() + 2).sum();
    let popup_area = centered_rect(area, 52, rows as u16 + 5);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let mut lines: Vec<Line> = vec![Line::from(vec![Span::styled(
        "Keyboard Shortcuts",
        Style::new().fg(TEXT_WHITE).bold(),
    )])];

    for (title, keys) in SECTIONS {
        lines.push(Line::raw(""));
        lines.push(Line::styled(*title, Style::new().fg(LOGO_LIGHT_BLUE).bold()));
        for (key, description) in keys.iter() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<10}", key), Style::new().fg(TEXT_WHITE)),
                Span::styled(*description, Style::new().fg(TEXT_DIM)),
            ]));
        }
    }

    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "Press ? or Esc to close",
        Style::new().fg(TEXT_DIM),
    ));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::new().fg(LOGO_LIGHT_BLUE))
        .style(Style::new().bg(Color::Black));

    frame.render_widget(Paragraph::new(lines).block(block), popup_area);
}
