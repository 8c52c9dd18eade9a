//! Bottom rows: hotkey hints, success toast and error banner.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{App, InputMode, Screen};
use crate::screens::MasterPane;
use crate::tui::theme::*;

use super::hint;

/// Hotkeys for whatever currently has focus.
pub fn render_hotkeys(frame: &mut Frame, area: Rect, app: &App) {
    let pairs: Vec<(&str, &str)> = if app.confirm_prompt().is_some() {
        vec![("y", "confirm"), ("n", "cancel")]
    } else {
        match (app.input_mode, app.screen) {
            (InputMode::Help, _) => vec![("Esc", "close")],
            (InputMode::Normal, _) => vec![
                ("j/k", "navigate"),
                ("Enter", "open"),
                ("?", "help"),
                ("q", "quit"),
            ],
            (InputMode::Insert, Screen::Employees) => vec![
                ("a", "add"),
                ("e", "edit"),
                ("d", "delete"),
                ("r", "reload"),
                ("Esc", "back"),
            ],
            (InputMode::Insert, Screen::AddEmployee) if app.in_technology_picker() => vec![
                ("Enter", "add/remove"),
                ("←/→", "switch list"),
                ("Tab", "next field"),
                ("C-s", "save"),
                ("Esc", "back"),
            ],
            (InputMode::Insert, Screen::AddEmployee) => vec![
                ("Tab", "next field"),
                ("←/→", "choose"),
                ("Enter", "save"),
                ("C-r", "reset"),
                ("Esc", "back"),
            ],
            (InputMode::Insert, Screen::MasterData(kind))
                if app.master(kind).is_some_and(|m| m.pane == MasterPane::Form) =>
            {
                let mut pairs = vec![("Tab", "next field")];
                if kind.lookup().is_some() {
                    pairs.push(("←/→", "choose"));
                }
                pairs.extend([("Enter", "submit"), ("Esc", "cancel")]);
                pairs
            }
            (InputMode::Insert, Screen::MasterData(_)) => vec![
                ("a", "new"),
                ("e", "edit"),
                ("d", "delete"),
                ("r", "reload"),
                ("Esc", "back"),
            ],
            (InputMode::Insert, Screen::Salary) => vec![
                ("Tab", "next field"),
                ("←/→", "choose"),
                ("Enter", "calculate"),
                ("C-r", "reset"),
                ("Esc", "back"),
            ],
        }
    };

    let mut spans: Vec<Span> = pairs
        .into_iter()
        .flat_map(|(key, label)| hint(key, label))
        .collect();
    // Drop the trailing separator
    if let Some(last) = spans.pop() {
        let label = last.content.trim_end_matches(" • ").to_string();
        spans.push(Span::styled(label, Style::new().fg(TEXT_DIM)));
    }
    if app.is_loading() {
        spans.push(Span::styled(format!("  {}", app.spinner()), Style::new().fg(LOGO_MINT)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Success message, right-aligned, until it expires.
pub fn render_toast(frame: &mut Frame, area: Rect, app: &App) {
    let Some(toast) = &app.toast else {
        return;
    };
    let line = Line::from(vec![
        Span::styled("✓ ", Style::new().fg(LOGO_MINT).bold()),
        Span::styled(toast.message.clone(), Style::new().fg(LOGO_MINT)),
    ])
    .right_aligned();
    frame.render_widget(Paragraph::new(line), area);
}

pub fn render_error_banner(frame: &mut Frame, area: Rect, message: &str) {
    let line = Line::from(vec![
        Span::styled("✗ ", Style::new().fg(ERROR_RED).bold()),
        Span::styled(message.to_string(), Style::new().fg(ERROR_RED)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
