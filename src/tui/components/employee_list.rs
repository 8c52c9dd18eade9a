//! Employee table.

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};

use crate::api::Employee;
use crate::app::App;
use crate::loadable::Loadable;
use crate::tui::theme::*;

const HEADERS: [&str; 7] = [
    "Emp ID", "Name", "City", "Pincode", "Joined", "Designation", "Roles",
];

fn roles(employee: &Employee) -> String {
    [
        (employee.admin, "Admin"),
        (employee.reporting, "Reporting"),
        (employee.supervisor, "Supervisor"),
        (employee.user, "User"),
    ]
    .iter()
    .filter(|(set, _)| *set)
    .map(|(_, name)| *name)
    .collect::<Vec<_>>()
    .join(", ")
}

fn row(employee: &Employee) -> Row<'static> {
    Row::new(vec![
        Cell::from(employee.employee_id.map(|id| id.to_string()).unwrap_or_default()),
        Cell::from(employee.full_name()),
        Cell::from(employee.city.clone().unwrap_or_default()),
        Cell::from(employee.pincode.map(|p| p.to_string()).unwrap_or_default()),
        Cell::from(
            employee
                .joining_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        ),
        Cell::from(employee.designation.clone().unwrap_or_default()),
        Cell::from(roles(employee)),
    ])
}

pub fn render_employee_list(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Employees ")
        .borders(Borders::ALL)
        .border_style(Style::new().fg(TEXT_DIM));

    let list = &app.employees;
    let employees = match &list.employees {
        Loadable::Idle => Vec::new(),
        Loadable::Loading => {
            let line = Line::styled(
                format!("{} Loading employees...", app.spinner()),
                Style::new().fg(LOGO_MINT),
            );
            frame.render_widget(Paragraph::new(line).block(block), area);
            return;
        }
        Loadable::Failed(_) => Vec::new(),
        Loadable::Loaded(employees) => employees.iter().map(row).collect(),
    };

    if employees.is_empty() && list.employees.is_loaded() {
        let line = Line::styled(
            "No employees yet. Press [a] to add one.",
            Style::new().fg(TEXT_DIM),
        );
        frame.render_widget(Paragraph::new(line).block(block), area);
        return;
    }

    let header = Row::new(HEADERS.to_vec()).style(Style::new().fg(LOGO_LIGHT_BLUE).bold());
    let widths = [
        Constraint::Length(8),
        Constraint::Min(16),
        Constraint::Length(14),
        Constraint::Length(8),
        Constraint::Length(11),
        Constraint::Length(14),
        Constraint::Min(12),
    ];
    let table = Table::new(employees, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Style::new().bg(HIGHLIGHT_BG).fg(TEXT_WHITE).bold())
        .highlight_symbol("> ");

    let mut state = TableState::default().with_selected(Some(list.selected));
    frame.render_stateful_widget(table, area, &mut state);
}
