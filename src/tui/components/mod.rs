//! UI components for the TUI.
//!
//! # Component Organization
//!
//! - `sidebar` - Logo and screen list
//! - `employee_list` - Employee table
//! - `employee_form` - Add/edit employee form
//! - `technology_selector` - Two-list technology picker inside the employee form
//! - `master_data` - Table plus form for the simple collections
//! - `salary` - Salary calculator form and breakdown
//! - `confirm_popup` - Yes/no confirmation modal
//! - `help_popup` - Help overlay with keybindings
//! - `status_bar` - Hotkeys, toast and error banner

mod confirm_popup;
mod employee_form;
mod employee_list;
mod help_popup;
mod master_data;
mod salary;
mod sidebar;
mod status_bar;
mod technology_selector;

pub use confirm_popup::render_confirm_popup;
pub use employee_form::render_employee_form;
pub use employee_list::render_employee_list;
pub use help_popup::render_help_popup;
pub use master_data::render_master_data;
pub use salary::render_salary;
pub use sidebar::{render_logo, render_screen_list};
pub use status_bar::{render_error_banner, render_hotkeys, render_toast};
pub use technology_selector::render_technology_selector;

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
};

use crate::tui::theme::*;

/// Centered rect of at most `width` x `height` inside `area`.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// One `label: value` row of a form.
pub fn field_line<'a>(
    label: &str,
    value: String,
    focused: bool,
    required: bool,
    locked: bool,
) -> Line<'a> {
    let cursor = if focused { "> " } else { "  " };
    let marker = if required { "*" } else { " " };
    let value_style = if locked {
        Style::new().fg(TEXT_DIM)
    } else if focused {
        Style::new().fg(TEXT_WHITE).bold()
    } else {
        Style::new().fg(TEXT_WHITE)
    };
    let caret = if focused && !locked { "_" } else { "" };

    Line::from(vec![
        Span::styled(cursor, Style::new().fg(LOGO_CORAL)),
        Span::styled(format!("{:<24}", format!("{}{}", label, marker)), Style::new().fg(TEXT_DIM)),
        Span::styled(format!("{}{}", value, caret), value_style),
    ])
}

/// Key hint spans: `[key] label`
pub fn hint<'a>(key: &'a str, label: &'a str) -> Vec<Span<'a>> {
    vec![
        Span::styled(format!("[{}]", key), Style::new().fg(TEXT_WHITE)),
        Span::styled(format!(" {} • ", label), Style::new().fg(TEXT_DIM)),
    ]
}

/// Greedy word wrap.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let needed = if current.is_empty() { 0 } else { 1 } + word.chars().count();
        if !current.is_empty() && current.chars().count() + needed > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text() {
        assert_eq!(
            wrap_text("Are you sure you want to delete Asha Rao?", 16),
            vec!["Are you sure you", "want to delete", "Asha Rao?"]
        );
        assert_eq!(wrap_text("", 10), vec![""]);
    }

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 40, 10);
        assert_eq!(centered_rect(area, 20, 4), Rect::new(10, 3, 20, 4));
        assert_eq!(centered_rect(area, 80, 40), Rect::new(0, 0, 40, 10));
    }
}
