use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::api::Employee;
use crate::error::ApiResult;
use crate::events::Action;
use crate::log;
use crate::picker::Picker;
use crate::screens::{
    EmployeeField, EmployeeForm, EmployeeListScreen, FormMode, MasterDataScreen, MasterPane,
    ResourceKind, SalaryForm, SelectorPane,
};
use crate::selector::CommitOutcome;
use crate::services::{ApiEvent, ApiRequest};

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// How long a success toast stays visible
pub const TOAST_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal, // Sidebar navigation
    Insert, // Working inside the current screen
    Help,   // Help popup showing all hotkeys
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Employees,
    AddEmployee,
    MasterData(ResourceKind),
    Salary,
}

impl Screen {
    pub const ALL: [Screen; 9] = [
        Screen::Employees,
        Screen::AddEmployee,
        Screen::MasterData(ResourceKind::States),
        Screen::MasterData(ResourceKind::Districts),
        Screen::MasterData(ResourceKind::Cities),
        Screen::MasterData(ResourceKind::Designations),
        Screen::MasterData(ResourceKind::Technologies),
        Screen::MasterData(ResourceKind::Students),
        Screen::Salary,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Screen::Employees => "Employees",
            Screen::AddEmployee => "Add Employee",
            Screen::MasterData(kind) => kind.title(),
            Screen::Salary => "Salary",
        }
    }

    /// Parse a screen name from the command line or config file.
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized: String = name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "employees" | "employee" => Some(Screen::Employees),
            "addemployee" => Some(Screen::AddEmployee),
            "salary" => Some(Screen::Salary),
            other => ResourceKind::from_name(other).map(Screen::MasterData),
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }
}

/// Transient success message
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub expires_at: Instant,
}

pub struct App {
    pub screen: Screen,
    pub input_mode: InputMode,
    pub sidebar_selected: usize,
    pub employees: EmployeeListScreen,
    pub employee_form: EmployeeForm,
    pub master: HashMap<ResourceKind, MasterDataScreen>,
    pub salary: SalaryForm,
    pub toast: Option<Toast>,
    pub spinner_frame: usize,
    pub should_quit: bool,
    pub api_base_url: String,
}

impl App {
    pub fn new(api_base_url: String, years: Vec<i32>) -> Self {
        let master = ResourceKind::ALL
            .into_iter()
            .map(|kind| (kind, MasterDataScreen::new(kind)))
            .collect();

        Self {
            screen: Screen::Employees,
            input_mode: InputMode::Normal,
            sidebar_selected: 0,
            employees: EmployeeListScreen::default(),
            employee_form: EmployeeForm::create(),
            master,
            salary: SalaryForm::new(years),
            toast: None,
            spinner_frame: 0,
            should_quit: false,
            api_base_url,
        }
    }

    /// Advance spinner animation and expire the toast.
    pub fn tick(&mut self, now: Instant) {
        self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
        if self.toast.as_ref().is_some_and(|t| now >= t.expires_at) {
            self.toast = None;
        }
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_frame]
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::log(&format!("Toast: {}", message));
        self.toast = Some(Toast {
            message,
            expires_at: Instant::now() + TOAST_DURATION,
        });
    }

    pub fn master(&self, kind: ResourceKind) -> Option<&MasterDataScreen> {
        self.master.get(&kind)
    }

    fn master_mut(&mut self, kind: ResourceKind) -> &mut MasterDataScreen {
        self.master
            .entry(kind)
            .or_insert_with(|| MasterDataScreen::new(kind))
    }

    /// Switch to `screen`, returning the fetches it needs.
    pub fn open_screen(&mut self, screen: Screen) -> Vec<ApiRequest> {
        log::log_event(&format!("open screen {}", screen.title()));
        self.screen = screen;
        self.sidebar_selected = screen.index();
        match screen {
            Screen::Employees => vec![self.employees.load_request()],
            Screen::AddEmployee => {
                self.employee_form = EmployeeForm::create();
                self.employee_form.mount_requests()
            }
            Screen::MasterData(kind) => self.master_mut(kind).load_requests(),
            Screen::Salary => Vec::new(),
        }
    }

    fn open_edit_employee(&mut self) -> Vec<ApiRequest> {
        let Some(employee) = self.employees.selected_item().cloned() else {
            return Vec::new();
        };
        self.screen = Screen::AddEmployee;
        self.sidebar_selected = Screen::AddEmployee.index();
        self.employee_form = EmployeeForm::edit(&employee);
        self.employee_form.mount_requests()
    }

    /// Error for the banner on the current screen
    pub fn current_error(&self) -> Option<&str> {
        match self.screen {
            Screen::Employees => self.employees.error.as_deref(),
            Screen::AddEmployee => self.employee_form.error.as_deref(),
            Screen::MasterData(kind) => self.master(kind).and_then(|m| m.error.as_deref()),
            Screen::Salary => self.salary.error.as_deref(),
        }
    }

    /// Clear the banner of the current screen.
    pub fn dismiss_error(&mut self) {
        match self.screen {
            Screen::Employees => self.employees.error = None,
            Screen::AddEmployee => self.employee_form.error = None,
            Screen::MasterData(kind) => self.master_mut(kind).error = None,
            Screen::Salary => self.salary.error = None,
        }
    }

    /// Prompt for the confirmation modal, if one is open.
    pub fn confirm_prompt(&self) -> Option<String> {
        match self.screen {
            Screen::Employees if self.employees.confirming() => {
                Some(self.employees.confirm_message())
            }
            Screen::MasterData(kind) => self
                .master(kind)
                .filter(|m| m.confirming)
                .map(|m| m.confirm_message()),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        match self.screen {
            Screen::Employees => self.employees.employees.is_loading(),
            Screen::AddEmployee => {
                self.employee_form.submitting
                    || self.employee_form.selector.catalog_state().is_loading()
            }
            Screen::MasterData(kind) => self.master(kind).is_some_and(|m| m.rows.is_loading()),
            Screen::Salary => false,
        }
    }

    /// Apply a user action, returning backend work to dispatch.
    pub fn dispatch(&mut self, action: Action) -> Vec<ApiRequest> {
        match action {
            Action::None => Vec::new(),
            Action::Quit => {
                self.should_quit = true;
                Vec::new()
            }
            Action::OpenHelp => {
                self.input_mode = InputMode::Help;
                Vec::new()
            }
            Action::CloseHelp => {
                self.input_mode = InputMode::Normal;
                Vec::new()
            }
            Action::SidebarNext => {
                self.sidebar_selected = (self.sidebar_selected + 1) % Screen::ALL.len();
                Vec::new()
            }
            Action::SidebarPrev => {
                self.sidebar_selected = self
                    .sidebar_selected
                    .checked_sub(1)
                    .unwrap_or(Screen::ALL.len() - 1);
                Vec::new()
            }
            Action::OpenScreen(screen) => {
                self.input_mode = InputMode::Insert;
                self.open_screen(screen)
            }
            Action::EnterScreen => {
                self.input_mode = InputMode::Insert;
                self.open_screen(Screen::ALL[self.sidebar_selected])
            }
            Action::LeaveScreen => {
                self.input_mode = InputMode::Normal;
                self.dismiss_error();
                Vec::new()
            }
            _ => match self.screen {
                Screen::Employees => self.dispatch_employees(action),
                Screen::AddEmployee => self.dispatch_employee_form(action),
                Screen::MasterData(kind) => self.dispatch_master(kind, action),
                Screen::Salary => {
                    self.dispatch_salary(action);
                    Vec::new()
                }
            },
        }
    }

    fn dispatch_employees(&mut self, action: Action) -> Vec<ApiRequest> {
        let list = &mut self.employees;
        match action {
            Action::RowDown => list.select_next(),
            Action::RowUp => list.select_prev(),
            Action::Refresh => return vec![list.load_request()],
            Action::DeleteSelected => list.request_delete(),
            Action::Confirm => return list.confirm().into_iter().collect(),
            Action::Cancel => list.cancel(),
            Action::EditSelected => return self.open_edit_employee(),
            Action::NewRecord => return self.open_screen(Screen::AddEmployee),
            _ => {}
        }
        Vec::new()
    }

    fn dispatch_employee_form(&mut self, action: Action) -> Vec<ApiRequest> {
        let form = &mut self.employee_form;
        match action {
            Action::NextField => form.next_field(),
            Action::PrevField => form.prev_field(),
            Action::RowDown => form.selector_down(),
            Action::RowUp => form.selector_up(),
            Action::CycleLeft => form.cycle(-1),
            Action::CycleRight => form.cycle(1),
            Action::InputChar(c) => form.input_char(c),
            Action::Backspace => form.backspace(),
            Action::Toggle => form.toggle_role(),
            Action::SwitchPane => form.switch_pane(),
            Action::CommitTechnology => {
                if form.selector.commit_selection() == CommitOutcome::Committed {
                    form.pane = SelectorPane::Candidates;
                }
            }
            Action::RemoveTechnology => {
                form.selector.remove_selection();
            }
            Action::ResetForm if !form.submitting => {
                return self.open_screen(Screen::AddEmployee);
            }
            Action::Submit if !form.submitting => {
                if let Ok(request) = form.submit() {
                    return vec![request];
                }
            }
            _ => {}
        }
        Vec::new()
    }

    fn dispatch_master(&mut self, kind: ResourceKind, action: Action) -> Vec<ApiRequest> {
        let screen = self.master_mut(kind);
        if screen.confirming {
            return match action {
                Action::Confirm => screen.confirm().into_iter().collect(),
                Action::Cancel => {
                    screen.cancel();
                    Vec::new()
                }
                _ => Vec::new(),
            };
        }

        match (screen.pane, action) {
            (MasterPane::Table, Action::RowDown) => screen.select_next(),
            (MasterPane::Table, Action::RowUp) => screen.select_prev(),
            (MasterPane::Table, Action::Refresh) => return screen.load_requests(),
            (MasterPane::Table, Action::EditSelected) => screen.edit_selected(),
            (MasterPane::Table, Action::DeleteSelected) => screen.request_delete(),
            (MasterPane::Table, Action::NewRecord) => {
                screen.reset_form();
                screen.focus_form();
            }
            (MasterPane::Form, Action::NextField) => screen.next_field(),
            (MasterPane::Form, Action::PrevField) => screen.prev_field(),
            (MasterPane::Form, Action::InputChar(c)) => screen.input_char(c),
            (MasterPane::Form, Action::Backspace) => screen.backspace(),
            (MasterPane::Form, Action::CycleLeft) => screen.cycle(-1),
            (MasterPane::Form, Action::CycleRight) => screen.cycle(1),
            (MasterPane::Form, Action::Toggle) => screen.toggle(),
            (MasterPane::Form, Action::Submit) => {
                if let Err(e) = screen.request_submit() {
                    screen.error = Some(e.to_string());
                }
            }
            (MasterPane::Form, Action::ResetForm) => {
                screen.reset_form();
                screen.focus_table();
            }
            _ => {}
        }
        Vec::new()
    }

    fn dispatch_salary(&mut self, action: Action) {
        let form = &mut self.salary;
        match action {
            Action::NextField => form.next_field(),
            Action::PrevField => form.prev_field(),
            Action::CycleLeft => form.cycle(-1),
            Action::CycleRight => form.cycle(1),
            Action::InputChar(c) => form.input_char(c),
            Action::Backspace => form.backspace(),
            Action::Submit => {
                let _ = form.calculate();
            }
            Action::ResetForm => form.reset(),
            _ => {}
        }
    }

    /// Fold a finished backend call into screen state. May ask for reloads.
    pub fn handle_api_event(&mut self, event: ApiEvent) -> Vec<ApiRequest> {
        match event {
            ApiEvent::TechCatalog(result) => self.employee_form.apply_catalog(result),
            ApiEvent::States(result) => self.employee_form.apply_states(result),
            ApiEvent::Districts(result) => self.employee_form.apply_districts(result),
            ApiEvent::Cities(result) => self.employee_form.apply_cities(result),
            ApiEvent::Designations(result) => self.employee_form.apply_designations(result),
            ApiEvent::Records(kind, result) => self.master_mut(kind).apply_rows(result),
            ApiEvent::Lookup(kind, result) => self.master_mut(kind).apply_lookup(result),
            ApiEvent::RecordSaved(kind, result) => {
                return self.settle_record(kind, result, false);
            }
            ApiEvent::RecordDeleted(kind, result) => {
                return self.settle_record(kind, result, true);
            }
            ApiEvent::Employees(result) => self.employees.apply_employees(result),
            ApiEvent::EmployeeSaved { mode, result } => {
                return self.settle_employee_save(mode, result);
            }
            ApiEvent::EmployeeDeleted(result) => {
                if let Some(message) = self.employees.apply_deleted(result) {
                    self.show_toast(message);
                    return vec![self.employees.load_request()];
                }
            }
        }
        Vec::new()
    }

    /// A save only drives the form that is still waiting on it. If that form
    /// was reset or replaced meanwhile, a success is still announced.
    fn settle_employee_save(
        &mut self,
        mode: FormMode,
        result: ApiResult<Employee>,
    ) -> Vec<ApiRequest> {
        let owned = self.employee_form.submitting && self.employee_form.mode == mode;
        let saved = if owned {
            self.employee_form.apply_saved(result)
        } else {
            match result {
                Ok(_) => Some(mode.saved_message().to_string()),
                Err(e) => {
                    log::log(&format!("Save from a closed employee form failed: {}", e));
                    None
                }
            }
        };

        let Some(message) = saved else {
            return Vec::new();
        };
        self.show_toast(message);
        match self.screen {
            Screen::AddEmployee if owned => self.open_screen(Screen::Employees),
            Screen::Employees => vec![self.employees.load_request()],
            _ => Vec::new(),
        }
    }

    fn settle_record(
        &mut self,
        kind: ResourceKind,
        result: ApiResult<()>,
        deleted: bool,
    ) -> Vec<ApiRequest> {
        let screen = self.master_mut(kind);
        match screen.apply_mutation(result, deleted) {
            Some(message) => {
                let reload = screen.load_request();
                self.show_toast(message);
                vec![reload]
            }
            None => Vec::new(),
        }
    }

    /// Whether the focused form field swallows plain characters
    pub fn is_typing(&self) -> bool {
        if self.input_mode != InputMode::Insert {
            return false;
        }
        match self.screen {
            Screen::Employees => false,
            Screen::AddEmployee => self.employee_form.text(self.employee_form.focused()).is_some(),
            Screen::MasterData(kind) => self
                .master(kind)
                .is_some_and(|m| m.pane == MasterPane::Form && !m.confirming),
            Screen::Salary => self.salary.text(self.salary.focused()).is_some(),
        }
    }

    /// Whether the employee form's technology picker has focus
    pub fn in_technology_picker(&self) -> bool {
        self.screen == Screen::AddEmployee
            && self.employee_form.focused() == EmployeeField::Technologies
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Technology;
    use crate::error::ApiError;
    use serde_json::json;

    fn app() -> App {
        App::new("http://localhost:8080".to_string(), vec![2024, 2025])
    }

    #[test]
    fn test_screen_from_name() {
        assert_eq!(Screen::from_name("employees"), Some(Screen::Employees));
        assert_eq!(Screen::from_name("add-employee"), Some(Screen::AddEmployee));
        assert_eq!(
            Screen::from_name("Designations"),
            Some(Screen::MasterData(ResourceKind::Designations))
        );
        assert_eq!(Screen::from_name("payroll"), None);
    }

    #[test]
    fn test_sidebar_enter_loads_screen() {
        let mut app = app();
        app.dispatch(Action::SidebarNext);
        app.dispatch(Action::SidebarNext);
        let requests = app.dispatch(Action::EnterScreen);

        assert_eq!(app.screen, Screen::MasterData(ResourceKind::States));
        assert_eq!(app.input_mode, InputMode::Insert);
        assert_eq!(requests, vec![ApiRequest::LoadRecords(ResourceKind::States)]);
    }

    #[test]
    fn test_add_employee_mounts_lookups() {
        let mut app = app();
        let requests = app.dispatch(Action::OpenScreen(Screen::AddEmployee));
        assert_eq!(requests.len(), 5);
        assert!(requests.contains(&ApiRequest::LoadTechCatalog));
        assert!(app.is_loading());

        app.handle_api_event(ApiEvent::TechCatalog(Ok(vec![Technology {
            id: Some(3),
            tech_id: Some(3),
            tech_description: "Rust".to_string(),
        }])));
        assert_eq!(app.employee_form.selector.options().len(), 1);
    }

    #[test]
    fn test_master_save_reloads_and_toasts() {
        let mut app = app();
        app.dispatch(Action::OpenScreen(Screen::MasterData(ResourceKind::States)));
        app.handle_api_event(ApiEvent::Records(
            ResourceKind::States,
            Ok(vec![json!({"stateId": 1, "stateName": "Goa"})]),
        ));

        let reload = app.handle_api_event(ApiEvent::RecordSaved(ResourceKind::States, Ok(())));
        assert_eq!(reload, vec![ApiRequest::LoadRecords(ResourceKind::States)]);
        assert_eq!(toast_text(&app), Some("State saved successfully!"));
    }

    #[test]
    fn test_master_delete_flow() {
        let mut app = app();
        let kind = ResourceKind::States;
        app.dispatch(Action::OpenScreen(Screen::MasterData(kind)));
        app.handle_api_event(ApiEvent::Records(
            kind,
            Ok(vec![json!({"stateId": 7, "stateName": "Goa"})]),
        ));

        app.dispatch(Action::DeleteSelected);
        assert_eq!(app.confirm_prompt().as_deref(), Some("Delete state 7?"));
        let requests = app.dispatch(Action::Confirm);
        assert_eq!(
            requests,
            vec![ApiRequest::DeleteRecord { kind, key: "7".to_string() }]
        );
        assert!(app.confirm_prompt().is_none());
    }

    #[test]
    fn test_employee_edit_then_save_returns_to_list() {
        let mut app = app();
        app.dispatch(Action::OpenScreen(Screen::Employees));
        app.handle_api_event(ApiEvent::Employees(Ok(vec![Employee {
            id: Some(9),
            employee_id: Some(1001),
            first_name: "Asha".to_string(),
            last_name: "Rao".to_string(),
            ..Default::default()
        }])));

        app.dispatch(Action::EditSelected);
        assert_eq!(app.screen, Screen::AddEmployee);
        assert_eq!(app.employee_form.title(), "Edit Employee");

        let requests = app.dispatch(Action::Submit);
        assert!(matches!(
            requests.as_slice(),
            [ApiRequest::UpdateEmployee { key, .. }] if key == "9"
        ));

        let follow_up = app.handle_api_event(ApiEvent::EmployeeSaved {
            mode: FormMode::Edit { key: "9".to_string() },
            result: Ok(Employee::default()),
        });
        assert_eq!(app.screen, Screen::Employees);
        assert_eq!(follow_up, vec![ApiRequest::LoadEmployees]);
        assert_eq!(toast_text(&app), Some("Employee updated successfully!"));
    }

    fn submit_new_employee(app: &mut App) {
        app.dispatch(Action::OpenScreen(Screen::AddEmployee));
        app.employee_form.employee_id = "1001".to_string();
        app.employee_form.first_name = "Asha".to_string();
        app.employee_form.last_name = "Rao".to_string();
        let requests = app.dispatch(Action::Submit);
        assert!(matches!(requests.as_slice(), [ApiRequest::CreateEmployee { .. }]));
    }

    fn saved(mode: FormMode) -> ApiEvent {
        ApiEvent::EmployeeSaved {
            mode,
            result: Ok(Employee::default()),
        }
    }

    fn toast_text(app: &App) -> Option<&str> {
        app.toast.as_ref().map(|t| t.message.as_str())
    }

    #[test]
    fn test_create_then_save_returns_to_list() {
        let mut app = app();
        submit_new_employee(&mut app);

        let follow_up = app.handle_api_event(saved(FormMode::Create));
        assert_eq!(app.screen, Screen::Employees);
        assert_eq!(follow_up, vec![ApiRequest::LoadEmployees]);
        assert_eq!(toast_text(&app), Some("Employee added successfully!"));
    }

    #[test]
    fn test_save_after_leaving_form_keeps_current_screen() {
        let mut app = app();
        submit_new_employee(&mut app);
        app.dispatch(Action::LeaveScreen);
        app.dispatch(Action::OpenScreen(Screen::Employees));

        let follow_up = app.handle_api_event(saved(FormMode::Create));
        assert_eq!(app.screen, Screen::Employees);
        assert_eq!(follow_up, vec![ApiRequest::LoadEmployees]);
        assert_eq!(toast_text(&app), Some("Employee added successfully!"));
    }

    #[test]
    fn test_save_for_replaced_form_reports_its_own_mode() {
        let mut app = app();
        app.dispatch(Action::OpenScreen(Screen::Employees));
        app.handle_api_event(ApiEvent::Employees(Ok(vec![Employee {
            id: Some(9),
            employee_id: Some(1001),
            first_name: "Asha".to_string(),
            last_name: "Rao".to_string(),
            ..Default::default()
        }])));
        app.dispatch(Action::EditSelected);
        app.dispatch(Action::Submit);
        app.dispatch(Action::OpenScreen(Screen::AddEmployee));

        let follow_up = app.handle_api_event(saved(FormMode::Edit { key: "9".to_string() }));
        assert!(follow_up.is_empty());
        assert_eq!(app.screen, Screen::AddEmployee);
        assert_eq!(app.employee_form.mode, FormMode::Create);
        assert_eq!(toast_text(&app), Some("Employee updated successfully!"));

        let failed = app.handle_api_event(ApiEvent::EmployeeSaved {
            mode: FormMode::Edit { key: "9".to_string() },
            result: Err(ApiError::MissingField("employeeId")),
        });
        assert!(failed.is_empty());
        assert!(app.current_error().is_none());
    }

    #[test]
    fn test_reset_waits_for_pending_save() {
        let mut app = app();
        submit_new_employee(&mut app);

        assert!(app.dispatch(Action::ResetForm).is_empty());
        assert!(app.employee_form.submitting);
        assert_eq!(app.employee_form.first_name, "Asha");
        assert!(app.dispatch(Action::Submit).is_empty());
    }

    #[test]
    fn test_failed_save_keeps_form() {
        let mut app = app();
        submit_new_employee(&mut app);
        let follow_up = app.handle_api_event(ApiEvent::EmployeeSaved {
            mode: FormMode::Create,
            result: Err(ApiError::Status {
                status: 500,
                body: String::new(),
            }),
        });
        assert!(follow_up.is_empty());
        assert!(app.current_error().is_some());
        assert!(app.toast.is_none());

        app.dispatch(Action::LeaveScreen);
        assert!(app.current_error().is_none());
    }

    #[test]
    fn test_toast_expires() {
        let mut app = app();
        app.show_toast("Saved");
        app.tick(Instant::now());
        assert!(app.toast.is_some());
        app.tick(Instant::now() + TOAST_DURATION + Duration::from_millis(1));
        assert!(app.toast.is_none());
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        app.dispatch(Action::Quit);
        assert!(app.should_quit);
    }
}
