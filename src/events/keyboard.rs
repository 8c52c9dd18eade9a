//! Keyboard event handling by input mode and screen.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, InputMode, Screen};
use crate::screens::{EmployeeField, MasterPane, SelectorPane};

use super::Action;

/// Handle keyboard events and return the appropriate action.
pub fn handle_key_event(app: &App, key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    match app.input_mode {
        InputMode::Help => handle_help_mode(key),
        InputMode::Normal => handle_normal_mode(key),
        InputMode::Insert if app.confirm_prompt().is_some() => handle_confirm_mode(key),
        InputMode::Insert => match app.screen {
            Screen::Employees => handle_employee_list(key),
            Screen::AddEmployee => handle_employee_form(app, key),
            Screen::MasterData(kind) => {
                let pane = app.master(kind).map(|m| m.pane).unwrap_or(MasterPane::Table);
                handle_master_data(pane, key)
            }
            Screen::Salary => handle_salary(key),
        },
    }
}

fn handle_normal_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('?') => Action::OpenHelp,
        KeyCode::Char('j') | KeyCode::Down => Action::SidebarNext,
        KeyCode::Char('k') | KeyCode::Up => Action::SidebarPrev,
        KeyCode::Char('l') | KeyCode::Right | KeyCode::Enter => Action::EnterScreen,

        // Screen selection by number
        KeyCode::Char(c @ '1'..='9') => {
            let idx = (c as usize) - ('1' as usize);
            Screen::ALL
                .get(idx)
                .map(|screen| Action::OpenScreen(*screen))
                .unwrap_or(Action::None)
        }

        _ => Action::None,
    }
}

fn handle_help_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => Action::CloseHelp,
        _ => Action::None,
    }
}

fn handle_confirm_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => Action::Confirm,
        KeyCode::Char('n') | KeyCode::Esc => Action::Cancel,
        _ => Action::None,
    }
}

fn handle_employee_list(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc | KeyCode::Char('h') => Action::LeaveScreen,
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('?') => Action::OpenHelp,
        KeyCode::Char('j') | KeyCode::Down => Action::RowDown,
        KeyCode::Char('k') | KeyCode::Up => Action::RowUp,
        KeyCode::Char('r') => Action::Refresh,
        KeyCode::Char('a') | KeyCode::Char('n') => Action::NewRecord,
        KeyCode::Char('e') | KeyCode::Enter => Action::EditSelected,
        KeyCode::Char('d') | KeyCode::Char('x') => Action::DeleteSelected,
        _ => Action::None,
    }
}

fn handle_employee_form(app: &App, key: KeyEvent) -> Action {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => return Action::LeaveScreen,
        KeyCode::Char('s') if ctrl => return Action::Submit,
        KeyCode::Char('r') if ctrl => return Action::ResetForm,
        KeyCode::Tab => return Action::NextField,
        KeyCode::BackTab => return Action::PrevField,
        _ => {}
    }

    if app.in_technology_picker() {
        let committing = app.employee_form.pane == SelectorPane::Candidates;
        return match key.code {
            KeyCode::Char('j') | KeyCode::Down => Action::RowDown,
            KeyCode::Char('k') | KeyCode::Up => Action::RowUp,
            KeyCode::Left | KeyCode::Right | KeyCode::Char('h') | KeyCode::Char('l') => {
                Action::SwitchPane
            }
            KeyCode::Enter | KeyCode::Char(' ') if committing => Action::CommitTechnology,
            KeyCode::Enter | KeyCode::Char(' ') => Action::RemoveTechnology,
            KeyCode::Backspace | KeyCode::Delete => Action::RemoveTechnology,
            _ => Action::None,
        };
    }

    let on_roles = app.employee_form.focused() == EmployeeField::Roles;
    match key.code {
        KeyCode::Down => Action::NextField,
        KeyCode::Up => Action::PrevField,
        KeyCode::Left => Action::CycleLeft,
        KeyCode::Right => Action::CycleRight,
        KeyCode::Enter => Action::Submit,
        KeyCode::Char(' ') if on_roles => Action::Toggle,
        KeyCode::Char(c) => Action::InputChar(c),
        KeyCode::Backspace => Action::Backspace,
        _ => Action::None,
    }
}

fn handle_master_data(pane: MasterPane, key: KeyEvent) -> Action {
    match pane {
        MasterPane::Table => match key.code {
            KeyCode::Esc | KeyCode::Char('h') => Action::LeaveScreen,
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Char('?') => Action::OpenHelp,
            KeyCode::Char('j') | KeyCode::Down => Action::RowDown,
            KeyCode::Char('k') | KeyCode::Up => Action::RowUp,
            KeyCode::Char('r') => Action::Refresh,
            KeyCode::Char('a') | KeyCode::Char('n') | KeyCode::Tab => Action::NewRecord,
            KeyCode::Char('e') | KeyCode::Enter => Action::EditSelected,
            KeyCode::Char('d') | KeyCode::Char('x') => Action::DeleteSelected,
            _ => Action::None,
        },
        MasterPane::Form => match key.code {
            KeyCode::Esc => Action::ResetForm,
            KeyCode::Tab | KeyCode::Down => Action::NextField,
            KeyCode::BackTab | KeyCode::Up => Action::PrevField,
            KeyCode::Left => Action::CycleLeft,
            KeyCode::Right => Action::CycleRight,
            KeyCode::Enter => Action::Submit,
            KeyCode::Char(c) => Action::InputChar(c),
            KeyCode::Backspace => Action::Backspace,
            _ => Action::None,
        },
    }
}

fn handle_salary(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc => Action::LeaveScreen,
        KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::ResetForm,
        KeyCode::Tab | KeyCode::Down => Action::NextField,
        KeyCode::BackTab | KeyCode::Up => Action::PrevField,
        KeyCode::Left => Action::CycleLeft,
        KeyCode::Right => Action::CycleRight,
        KeyCode::Enter => Action::Submit,
        KeyCode::Char(c) => Action::InputChar(c),
        KeyCode::Backspace => Action::Backspace,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::ResourceKind;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_on(screen: Screen) -> App {
        let mut app = App::new("http://localhost:8080".to_string(), vec![2024]);
        app.dispatch(Action::OpenScreen(screen));
        app
    }

    #[test]
    fn test_number_keys_jump_to_screens() {
        let app = App::new(String::new(), vec![]);
        assert_eq!(
            handle_key_event(&app, press(KeyCode::Char('3'))),
            Action::OpenScreen(Screen::MasterData(ResourceKind::States))
        );
        assert_eq!(handle_key_event(&app, press(KeyCode::Char('q'))), Action::Quit);
    }

    #[test]
    fn test_typing_in_forms_does_not_quit() {
        let app = app_on(Screen::Salary);
        assert_eq!(
            handle_key_event(&app, press(KeyCode::Char('q'))),
            Action::InputChar('q')
        );

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(&app, ctrl_c), Action::Quit);
    }

    #[test]
    fn test_technology_picker_keys() {
        let mut app = app_on(Screen::AddEmployee);
        app.employee_form.focus = EmployeeField::ALL.len() - 1;

        assert_eq!(handle_key_event(&app, press(KeyCode::Enter)), Action::CommitTechnology);
        assert_eq!(handle_key_event(&app, press(KeyCode::Right)), Action::SwitchPane);

        app.employee_form.switch_pane();
        assert_eq!(handle_key_event(&app, press(KeyCode::Enter)), Action::RemoveTechnology);
    }

    #[test]
    fn test_confirm_modal_takes_over() {
        let mut app = app_on(Screen::Employees);
        app.employees.pending_delete = Some(Default::default());
        assert_eq!(handle_key_event(&app, press(KeyCode::Char('y'))), Action::Confirm);
        assert_eq!(handle_key_event(&app, press(KeyCode::Esc)), Action::Cancel);
    }
}
