//! Employee table with delete confirmation.

use crate::api::{Employee, Resource};
use crate::error::ApiResult;
use crate::loadable::Loadable;
use crate::picker::Picker;
use crate::services::ApiRequest;

#[derive(Debug, Default)]
pub struct EmployeeListScreen {
    pub employees: Loadable<Vec<Employee>>,
    pub selected: usize,
    pub pending_delete: Option<Employee>,
    pub error: Option<String>,
}

impl EmployeeListScreen {
    pub fn load_request(&mut self) -> ApiRequest {
        self.employees = Loadable::Loading;
        ApiRequest::LoadEmployees
    }

    pub fn apply_employees(&mut self, result: ApiResult<Vec<Employee>>) {
        if let Err(e) = &result {
            self.error = Some(format!("Failed to fetch employees. {}", e));
        }
        self.employees = Loadable::from_result(result);
        self.clamp_selection();
    }

    pub fn confirming(&self) -> bool {
        self.pending_delete.is_some()
    }

    pub fn request_delete(&mut self) {
        self.pending_delete = self.selected_item().cloned();
    }

    pub fn confirm(&mut self) -> Option<ApiRequest> {
        let employee = self.pending_delete.take()?;
        let key = employee.key()?;
        Some(ApiRequest::DeleteEmployee { key })
    }

    pub fn cancel(&mut self) {
        self.pending_delete = None;
    }

    /// Settle a delete. Returns the toast to show on success.
    pub fn apply_deleted(&mut self, result: ApiResult<()>) -> Option<String> {
        match result {
            Ok(()) => {
                self.error = None;
                Some("Employee deleted successfully!".to_string())
            }
            Err(e) => {
                self.error = Some(format!("Failed to delete the employee. {}", e));
                None
            }
        }
    }

    pub fn confirm_message(&self) -> String {
        match &self.pending_delete {
            Some(employee) => format!(
                "Are you sure you want to delete {} ({})?",
                employee.full_name(),
                employee
                    .employee_id
                    .map(|id| id.to_string())
                    .unwrap_or_default()
            ),
            None => String::new(),
        }
    }
}

impl Picker for EmployeeListScreen {
    type Item = Employee;

    fn items(&self) -> &[Employee] {
        self.employees.items()
    }

    fn selected_index(&self) -> usize {
        self.selected
    }

    fn set_selected_index(&mut self, index: usize) {
        self.selected = index;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;

    fn employee(id: i64, employee_id: i64, first: &str) -> Employee {
        Employee {
            id: Some(id),
            employee_id: Some(employee_id),
            first_name: first.to_string(),
            last_name: "K".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_delete_uses_database_id() {
        let mut screen = EmployeeListScreen::default();
        screen.load_request();
        screen.apply_employees(Ok(vec![employee(4, 1001, "Asha"), employee(5, 1002, "Ravi")]));
        screen.select_next();

        screen.request_delete();
        assert!(screen.confirming());
        assert_eq!(screen.confirm_message(), "Are you sure you want to delete Ravi K (1002)?");
        assert_eq!(
            screen.confirm(),
            Some(ApiRequest::DeleteEmployee { key: "5".to_string() })
        );
        assert!(!screen.confirming());
    }

    #[test]
    fn test_cancel_sends_nothing() {
        let mut screen = EmployeeListScreen::default();
        screen.apply_employees(Ok(vec![employee(4, 1001, "Asha")]));
        screen.request_delete();
        screen.cancel();
        assert_eq!(screen.confirm(), None);
    }

    #[test]
    fn test_shrinking_list_clamps_cursor() {
        let mut screen = EmployeeListScreen::default();
        screen.apply_employees(Ok(vec![employee(4, 1001, "Asha"), employee(5, 1002, "Ravi")]));
        screen.select_next();
        screen.apply_employees(Ok(vec![employee(4, 1001, "Asha")]));
        assert_eq!(screen.selected_index(), 0);
    }

    #[test]
    fn test_delete_failure_reports_error() {
        let mut screen = EmployeeListScreen::default();
        let toast = screen.apply_deleted(Err(ApiError::Status {
            status: 404,
            body: String::new(),
        }));
        assert!(toast.is_none());
        assert!(screen.error.is_some());
    }
}
