//! Mouse event handling.
//!
//! Only the wheel is used: it moves the sidebar cursor or the rows of the
//! focused list. On the employee form only the technology picker scrolls.

use crossterm::event::{MouseEvent, MouseEventKind};

use crate::app::{App, InputMode, Screen};

use super::Action;

/// Handle mouse events and return the appropriate action.
pub fn handle_mouse_event(app: &App, mouse: MouseEvent) -> Action {
    let in_screen = app.input_mode == InputMode::Insert && app.confirm_prompt().is_none();
    if in_screen && app.screen == Screen::AddEmployee && !app.in_technology_picker() {
        return Action::None;
    }
    match (mouse.kind, in_screen) {
        (MouseEventKind::ScrollUp, true) => Action::RowUp,
        (MouseEventKind::ScrollDown, true) => Action::RowDown,
        (MouseEventKind::ScrollUp, false) if app.input_mode == InputMode::Normal => {
            Action::SidebarPrev
        }
        (MouseEventKind::ScrollDown, false) if app.input_mode == InputMode::Normal => {
            Action::SidebarNext
        }
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::EmployeeField;
    use crossterm::event::KeyModifiers;

    fn wheel(kind: MouseEventKind) -> MouseEvent {
        MouseEvent {
            kind,
            column: 10,
            row: 5,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn app_on(screen: Screen) -> App {
        let mut app = App::new("http://localhost:8080".to_string(), vec![2024]);
        app.dispatch(Action::OpenScreen(screen));
        app
    }

    #[test]
    fn test_wheel_ignored_outside_technology_picker() {
        let app = app_on(Screen::AddEmployee);
        assert_eq!(app.employee_form.focused(), EmployeeField::EmployeeId);
        assert_eq!(handle_mouse_event(&app, wheel(MouseEventKind::ScrollDown)), Action::None);
        assert_eq!(handle_mouse_event(&app, wheel(MouseEventKind::ScrollUp)), Action::None);
    }

    #[test]
    fn test_wheel_scrolls_focused_technology_picker() {
        let mut app = app_on(Screen::AddEmployee);
        app.employee_form.focus = EmployeeField::ALL
            .iter()
            .position(|f| *f == EmployeeField::Technologies)
            .unwrap();
        assert_eq!(handle_mouse_event(&app, wheel(MouseEventKind::ScrollDown)), Action::RowDown);
        assert_eq!(handle_mouse_event(&app, wheel(MouseEventKind::ScrollUp)), Action::RowUp);
    }

    #[test]
    fn test_wheel_moves_rows_and_sidebar() {
        let mut app = app_on(Screen::Employees);
        assert_eq!(handle_mouse_event(&app, wheel(MouseEventKind::ScrollDown)), Action::RowDown);

        app.dispatch(Action::LeaveScreen);
        assert_eq!(
            handle_mouse_event(&app, wheel(MouseEventKind::ScrollDown)),
            Action::SidebarNext
        );
    }
}
