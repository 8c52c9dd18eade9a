//! Salary calculator form and breakdown.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, InputMode};
use crate::screens::{SalaryField, format_inr};
use crate::tui::theme::*;

use super::field_line;

pub fn render_salary(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.salary;
    let active = app.input_mode == InputMode::Insert;
    let layout = Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let lines: Vec<Line> = SalaryField::ALL
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let focused = active && i == form.focus;
            let value = match field {
                SalaryField::Month => form.month_label().unwrap_or("Select Month").to_string(),
                SalaryField::Year => form
                    .year
                    .map(|y| y.to_string())
                    .unwrap_or_else(|| "Select Year".to_string()),
                other => form.text(*other).unwrap_or_default().to_string(),
            };
            let value = if focused && field.is_choice() {
                format!("‹ {} ›", value)
            } else {
                value
            };
            let required = matches!(
                field,
                SalaryField::Month
                    | SalaryField::Year
                    | SalaryField::EmployeeName
                    | SalaryField::SalaryAmount
            );
            field_line(field.label(), value, focused, required, false)
        })
        .collect();

    let block = Block::default()
        .title(" Salary Calculator ")
        .borders(Borders::ALL)
        .border_style(Style::new().fg(if active { LOGO_LIGHT_BLUE } else { TEXT_DIM }));
    frame.render_widget(Paragraph::new(lines).block(block), layout[0]);

    let mut summary: Vec<Line> = vec![];
    if let Some(result) = form.result() {
        let name = form.text(SalaryField::EmployeeName).unwrap_or_default();
        summary.push(Line::styled(
            format!(
                "{} {} {}",
                name,
                form.month_label().unwrap_or_default(),
                form.year.map(|y| y.to_string()).unwrap_or_default()
            ),
            Style::new().fg(TEXT_WHITE).bold(),
        ));
        summary.push(Line::raw(""));
        for (label, amount) in [
            ("Overtime", result.overtime),
            ("Leave deduction", result.leave_deduction),
            ("Total salary", result.total),
            ("Total paid", result.paid_total),
        ] {
            summary.push(Line::from(vec![
                Span::styled(format!("{:<18}", label), Style::new().fg(TEXT_DIM)),
                Span::styled(format_inr(amount), Style::new().fg(LOGO_MINT)),
            ]));
        }
    } else {
        summary.push(Line::styled(
            "Press [Enter] to calculate.",
            Style::new().fg(TEXT_DIM),
        ));
    }

    let block = Block::default()
        .title(" Breakdown ")
        .borders(Borders::ALL)
        .border_style(Style::new().fg(TEXT_DIM));
    frame.render_widget(Paragraph::new(summary).block(block), layout[1]);
}
