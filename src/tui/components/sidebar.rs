//! Sidebar component - logo and screen list.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, InputMode, Screen};
use crate::screens::ResourceKind;
use crate::tui::theme::*;

/// Render the "orgdesk" logo centered in the area.
pub fn render_logo(frame: &mut Frame, area: Rect) {
    let colors = [LOGO_CORAL, LOGO_GOLD, LOGO_LIGHT_BLUE, LOGO_MINT];
    let word = "orgdesk";
    let padding = (area.width.saturating_sub(word.len() as u16)) / 2;

    let mut spans = vec![Span::raw(" ".repeat(padding as usize))];
    for (i, c) in word.chars().enumerate() {
        spans.push(Span::styled(
            c.to_string(),
            Style::new().fg(colors[i % colors.len()]).bold(),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the navigable list of screens.
pub fn render_screen_list(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.input_mode == InputMode::Normal;
    let mut lines: Vec<Line> = vec![];

    for (i, screen) in Screen::ALL.iter().enumerate() {
        let is_cursor = i == app.sidebar_selected;
        let is_open = *screen == app.screen;
        let cursor = if is_cursor && focused { "> " } else { "  " };

        let name_style = if is_open {
            Style::new().fg(LOGO_CORAL).bold()
        } else if is_cursor {
            Style::new().fg(TEXT_WHITE).bold()
        } else {
            Style::new().fg(TEXT_WHITE)
        };

        lines.push(Line::from(vec![
            Span::raw(cursor),
            Span::styled(format!("{}. ", i + 1), Style::new().fg(TEXT_DIM)),
            Span::styled(screen.title(), name_style),
        ]));

        // Break between people screens, master data and payroll
        if matches!(screen, Screen::AddEmployee | Screen::MasterData(ResourceKind::Students)) {
            lines.push(Line::raw(""));
        }
    }

    lines.push(Line::raw(""));
    lines.push(Line::styled(
        app.api_base_url.clone(),
        Style::new().fg(TEXT_DIM),
    ));

    let border = if focused { LOGO_LIGHT_BLUE } else { TEXT_DIM };
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::new().fg(border));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
