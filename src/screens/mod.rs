//! Screen state for each page of the app.
//!
//! Screens own their data and form state and hand back `ApiRequest`s
//! instead of talking to the backend themselves.

mod employee_form;
mod employee_list;
mod master_data;
mod salary;

pub use employee_form::{EmployeeField, EmployeeForm, FormMode, Role, SelectorPane};
pub use employee_list::EmployeeListScreen;
pub use master_data::{FieldType, MasterDataScreen, MasterPane, ResourceKind, cell_text};
pub use salary::{SalaryField, SalaryForm, format_inr};
