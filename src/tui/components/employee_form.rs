//! Add/edit employee form.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, InputMode};
use crate::screens::{EmployeeField, EmployeeForm, Role};
use crate::tui::theme::*;

use super::{field_line, render_technology_selector};

/// Value shown for a chooser, or a hint when there is nothing to pick yet.
fn choice_text(form: &EmployeeForm, field: EmployeeField, focused: bool) -> String {
    let loading = match field {
        EmployeeField::State => form.states.is_loading(),
        EmployeeField::District => form.districts.is_loading(),
        EmployeeField::City => form.cities.is_loading(),
        EmployeeField::Designation => form.designations.is_loading(),
        _ => false,
    };
    let value = match form.choice_label(field) {
        Some(label) => label,
        None if loading => "loading...".to_string(),
        None if field == EmployeeField::District && form.state.is_none() => {
            "(choose a state first)".to_string()
        }
        None if field == EmployeeField::City && form.district.is_none() => {
            "(choose a district first)".to_string()
        }
        None => format!("Select {}", field.label()),
    };
    if focused {
        format!("‹ {} ›", value)
    } else {
        value
    }
}

fn roles_line<'a>(form: &EmployeeForm, focused: bool) -> Line<'a> {
    let mut spans = vec![
        Span::styled(if focused { "> " } else { "  " }, Style::new().fg(LOGO_CORAL)),
        Span::styled(format!("{:<24}", EmployeeField::Roles.label()), Style::new().fg(TEXT_DIM)),
    ];
    for (i, role) in Role::ALL.iter().enumerate() {
        let mark = if form.has_role(*role) { "x" } else { " " };
        let mut style = Style::new().fg(TEXT_WHITE);
        if focused && i == form.role_cursor {
            style = style.add_modifier(Modifier::REVERSED);
        }
        spans.push(Span::styled(format!("[{}] {}", mark, role.label()), style));
        spans.push(Span::raw("  "));
    }
    Line::from(spans)
}

pub fn render_employee_form(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.employee_form;
    let active = app.input_mode == InputMode::Insert;

    let field_count = EmployeeField::ALL.len() as u16 - 1;
    let layout =
        Layout::vertical([Constraint::Length(field_count + 2), Constraint::Min(6)]).split(area);

    let title = if form.submitting {
        format!(" {} {} ", form.title(), app.spinner())
    } else {
        format!(" {} ", form.title())
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::new().fg(if active { LOGO_LIGHT_BLUE } else { TEXT_DIM }));

    let focused_field = form.focused();
    let lines: Vec<Line> = EmployeeField::ALL
        .iter()
        .filter(|field| **field != EmployeeField::Technologies)
        .map(|field| {
            let focused = active && *field == focused_field;
            if *field == EmployeeField::Roles {
                return roles_line(form, focused);
            }
            let value = match form.text(*field) {
                Some(text) => text.to_string(),
                None => choice_text(form, *field, focused),
            };
            field_line(field.label(), value, focused, field.is_required(), false)
        })
        .collect();
    frame.render_widget(Paragraph::new(lines).block(block), layout[0]);

    render_technology_selector(
        frame,
        layout[1],
        &form.selector,
        form.pane,
        active && focused_field == EmployeeField::Technologies,
        app.spinner(),
    );
}
