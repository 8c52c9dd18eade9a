use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};

use super::components::*;
use crate::app::{App, InputMode, Screen};

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Main vertical layout: logo, content, banner, hotkeys
    let main_layout = Layout::vertical([
        Constraint::Length(2), // Logo + spacing
        Constraint::Min(0),    // Content
        Constraint::Length(1), // Error banner / toast
        Constraint::Length(1), // Hotkeys
    ])
    .split(area);

    render_logo(frame, main_layout[0]);

    // Horizontal split: sidebar | gap | screen
    let content_layout = Layout::horizontal([
        Constraint::Length(26), // Sidebar
        Constraint::Length(1),  // Gap/padding
        Constraint::Min(0),     // Screen
    ])
    .split(main_layout[1]);

    render_screen_list(frame, content_layout[0], app);

    let screen_area = content_layout[2];
    match app.screen {
        Screen::Employees => render_employee_list(frame, screen_area, app),
        Screen::AddEmployee => render_employee_form(frame, screen_area, app),
        Screen::MasterData(kind) => render_master_data(frame, screen_area, app, kind),
        Screen::Salary => render_salary(frame, screen_area, app),
    }

    if let Some(message) = app.current_error() {
        render_error_banner(frame, main_layout[2], message);
    } else {
        render_toast(frame, main_layout[2], app);
    }
    render_hotkeys(frame, main_layout[3], app);

    // Overlays
    if let Some(prompt) = app.confirm_prompt() {
        render_confirm_popup(frame, screen_area, &prompt);
    }
    if app.input_mode == InputMode::Help {
        render_help_popup(frame, area);
    }
}
