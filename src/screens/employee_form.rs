//! Add/edit employee form.
//!
//! Owns the cascading location choosers, the role checkboxes and an embedded
//! [`TechnologySelector`]. The selector reports its picks through a `watch`
//! channel so the form always submits the latest selection.

use chrono::NaiveDate;
use tokio::sync::watch;

use crate::api::{City, Designation, District, Employee, Resource, State, Technology};
use crate::error::{ApiResult, FormError, FormResult};
use crate::loadable::Loadable;
use crate::log;
use crate::selector::TechnologySelector;
use crate::services::ApiRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployeeField {
    EmployeeId,
    FirstName,
    LastName,
    Address1,
    Address2,
    Address3,
    State,
    District,
    City,
    Pincode,
    JoiningDate,
    Gender,
    Roles,
    Designation,
    Technologies,
}

impl EmployeeField {
    pub const ALL: [EmployeeField; 15] = [
        EmployeeField::EmployeeId,
        EmployeeField::FirstName,
        EmployeeField::LastName,
        EmployeeField::Address1,
        EmployeeField::Address2,
        EmployeeField::Address3,
        EmployeeField::State,
        EmployeeField::District,
        EmployeeField::City,
        EmployeeField::Pincode,
        EmployeeField::JoiningDate,
        EmployeeField::Gender,
        EmployeeField::Roles,
        EmployeeField::Designation,
        EmployeeField::Technologies,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EmployeeField::EmployeeId => "Employee ID",
            EmployeeField::FirstName => "First Name",
            EmployeeField::LastName => "Last Name",
            EmployeeField::Address1 => "Address Line 1",
            EmployeeField::Address2 => "Address Line 2",
            EmployeeField::Address3 => "Address Line 3",
            EmployeeField::State => "State",
            EmployeeField::District => "District",
            EmployeeField::City => "City",
            EmployeeField::Pincode => "Pincode",
            EmployeeField::JoiningDate => "Joining Date",
            EmployeeField::Gender => "Gender",
            EmployeeField::Roles => "Roles",
            EmployeeField::Designation => "Designation",
            EmployeeField::Technologies => "Technologies",
        }
    }

    pub fn is_required(self) -> bool {
        matches!(
            self,
            EmployeeField::EmployeeId | EmployeeField::FirstName | EmployeeField::LastName
        )
    }

    pub fn is_choice(self) -> bool {
        matches!(
            self,
            EmployeeField::State
                | EmployeeField::District
                | EmployeeField::City
                | EmployeeField::Gender
                | EmployeeField::Designation
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Reporting,
    Supervisor,
    User,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::Reporting, Role::Supervisor, Role::User];

    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Reporting => "Reporting",
            Role::Supervisor => "Supervisor",
            Role::User => "User",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|g| g.label().eq_ignore_ascii_case(label))
    }
}

/// Which list of the technology picker arrow keys move through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorPane {
    Candidates,
    Selected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { key: String },
}

impl FormMode {
    pub fn saved_message(&self) -> &'static str {
        match self {
            FormMode::Create => "Employee added successfully!",
            FormMode::Edit { .. } => "Employee updated successfully!",
        }
    }
}

#[derive(Debug)]
pub struct EmployeeForm {
    pub mode: FormMode,
    pub focus: usize,
    pub employee_id: String,
    pub first_name: String,
    pub last_name: String,
    pub address1: String,
    pub address2: String,
    pub address3: String,
    pub pincode: String,
    pub joining_date: String,
    pub state: Option<String>,
    pub district: Option<String>,
    pub city: Option<String>,
    pub designation: Option<String>,
    pub gender: Option<Gender>,
    pub roles: Vec<Role>,
    pub role_cursor: usize,
    pub states: Loadable<Vec<State>>,
    pub districts: Loadable<Vec<District>>,
    pub cities: Loadable<Vec<City>>,
    pub designations: Loadable<Vec<Designation>>,
    pub selector: TechnologySelector,
    pub pane: SelectorPane,
    pub submitting: bool,
    pub error: Option<String>,
    technologies: watch::Receiver<Vec<String>>,
    existing: Option<Employee>,
}

impl EmployeeForm {
    fn with_mode(mode: FormMode) -> Self {
        let (tx, technologies) = watch::channel(Vec::new());
        let selector = TechnologySelector::new(move |ids: &[String]| {
            log::log(&format!("Selected technologies: {:?}", ids));
            let _ = tx.send(ids.to_vec());
        });

        Self {
            mode,
            focus: 0,
            employee_id: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            address1: String::new(),
            address2: String::new(),
            address3: String::new(),
            pincode: String::new(),
            joining_date: String::new(),
            state: None,
            district: None,
            city: None,
            designation: None,
            gender: None,
            roles: Vec::new(),
            role_cursor: 0,
            states: Loadable::Idle,
            districts: Loadable::Idle,
            cities: Loadable::Idle,
            designations: Loadable::Idle,
            selector,
            pane: SelectorPane::Candidates,
            submitting: false,
            error: None,
            technologies,
            existing: None,
        }
    }

    pub fn create() -> Self {
        Self::with_mode(FormMode::Create)
    }

    /// Form prefilled from an existing employee.
    pub fn edit(employee: &Employee) -> Self {
        let key = employee.key().unwrap_or_default();
        let mut form = Self::with_mode(FormMode::Edit { key });

        form.employee_id = employee.employee_id.map(|id| id.to_string()).unwrap_or_default();
        form.first_name = employee.first_name.clone();
        form.last_name = employee.last_name.clone();
        form.address1 = employee.address1.clone();
        form.address2 = employee.address2.clone();
        form.address3 = employee.address3.clone();
        form.pincode = employee.pincode.map(|p| p.to_string()).unwrap_or_default();
        form.joining_date = employee
            .joining_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        form.state = employee.state.clone();
        form.district = employee.district.clone();
        form.city = employee.city.clone();
        form.designation = employee.designation.clone();
        form.gender = employee.gender.as_deref().and_then(Gender::from_label);
        for (role, set) in [
            (Role::Admin, employee.admin),
            (Role::Reporting, employee.reporting),
            (Role::Supervisor, employee.supervisor),
            (Role::User, employee.user),
        ] {
            if set {
                form.roles.push(role);
            }
        }
        form.existing = Some(employee.clone());
        form
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Add Employee",
            FormMode::Edit { .. } => "Edit Employee",
        }
    }

    /// Lookups and the technology catalog, fetched once when the form opens.
    pub fn mount_requests(&mut self) -> Vec<ApiRequest> {
        self.states = Loadable::Loading;
        self.districts = Loadable::Loading;
        self.cities = Loadable::Loading;
        self.designations = Loadable::Loading;
        self.selector.begin_loading();
        vec![
            ApiRequest::LoadStates,
            ApiRequest::LoadDistricts,
            ApiRequest::LoadCities,
            ApiRequest::LoadDesignations,
            ApiRequest::LoadTechCatalog,
        ]
    }

    pub fn apply_states(&mut self, result: ApiResult<Vec<State>>) {
        self.states = settle("states", result);
    }

    pub fn apply_districts(&mut self, result: ApiResult<Vec<District>>) {
        self.districts = settle("districts", result);
    }

    pub fn apply_cities(&mut self, result: ApiResult<Vec<City>>) {
        self.cities = settle("cities", result);
    }

    pub fn apply_designations(&mut self, result: ApiResult<Vec<Designation>>) {
        self.designations = settle("designations", result);
    }

    pub fn apply_catalog(&mut self, result: ApiResult<Vec<Technology>>) {
        self.selector.apply_catalog(result);
    }

    pub fn focused(&self) -> EmployeeField {
        EmployeeField::ALL[self.focus]
    }

    pub fn next_field(&mut self) {
        self.focus = (self.focus + 1) % EmployeeField::ALL.len();
    }

    pub fn prev_field(&mut self) {
        self.focus = self
            .focus
            .checked_sub(1)
            .unwrap_or(EmployeeField::ALL.len() - 1);
    }

    pub fn text(&self, field: EmployeeField) -> Option<&str> {
        let value = match field {
            EmployeeField::EmployeeId => &self.employee_id,
            EmployeeField::FirstName => &self.first_name,
            EmployeeField::LastName => &self.last_name,
            EmployeeField::Address1 => &self.address1,
            EmployeeField::Address2 => &self.address2,
            EmployeeField::Address3 => &self.address3,
            EmployeeField::Pincode => &self.pincode,
            EmployeeField::JoiningDate => &self.joining_date,
            _ => return None,
        };
        Some(value)
    }

    fn text_mut(&mut self, field: EmployeeField) -> Option<&mut String> {
        let value = match field {
            EmployeeField::EmployeeId => &mut self.employee_id,
            EmployeeField::FirstName => &mut self.first_name,
            EmployeeField::LastName => &mut self.last_name,
            EmployeeField::Address1 => &mut self.address1,
            EmployeeField::Address2 => &mut self.address2,
            EmployeeField::Address3 => &mut self.address3,
            EmployeeField::Pincode => &mut self.pincode,
            EmployeeField::JoiningDate => &mut self.joining_date,
            _ => return None,
        };
        Some(value)
    }

    pub fn input_char(&mut self, c: char) {
        let field = self.focused();
        if let Some(value) = self.text_mut(field) {
            value.push(c);
        }
    }

    pub fn backspace(&mut self) {
        let field = self.focused();
        if let Some(value) = self.text_mut(field) {
            value.pop();
        }
    }

    /// Changing the state invalidates the district and city below it.
    pub fn set_state(&mut self, state: Option<String>) {
        if self.state != state {
            self.district = None;
            self.city = None;
        }
        self.state = state;
    }

    /// Changing the district invalidates the city below it.
    pub fn set_district(&mut self, district: Option<String>) {
        if self.district != district {
            self.city = None;
        }
        self.district = district;
    }

    /// Districts of the chosen state. Districts the backend did not tag
    /// with a state are always offered.
    pub fn district_options(&self) -> Vec<(String, String)> {
        let Some(state) = self.state.as_deref() else {
            return Vec::new();
        };
        self.districts
            .items()
            .iter()
            .filter(|d| d.state_id.is_none_or(|id| id.to_string() == state))
            .map(|d| (d.district_id.to_string(), d.district_name.clone()))
            .collect()
    }

    /// Cities of the chosen district, same tagging rule as districts.
    pub fn city_options(&self) -> Vec<(String, String)> {
        let Some(district) = self.district.as_deref() else {
            return Vec::new();
        };
        self.cities
            .items()
            .iter()
            .filter(|c| c.district_id.is_none_or(|id| id.to_string() == district))
            .map(|c| (c.city_id.to_string(), c.city_name.clone()))
            .collect()
    }

    /// `(value, label)` pairs offered by a choice field.
    pub fn choice_options(&self, field: EmployeeField) -> Vec<(String, String)> {
        match field {
            EmployeeField::State => self
                .states
                .items()
                .iter()
                .map(|s| (s.state_id.to_string(), s.state_name.clone()))
                .collect(),
            EmployeeField::District => self.district_options(),
            EmployeeField::City => self.city_options(),
            EmployeeField::Designation => self
                .designations
                .items()
                .iter()
                .map(|d| (d.designation_id.to_string(), d.designation_name.clone()))
                .collect(),
            EmployeeField::Gender => Gender::ALL
                .iter()
                .map(|g| (g.label().to_string(), g.label().to_string()))
                .collect(),
            _ => Vec::new(),
        }
    }

    fn choice_value(&self, field: EmployeeField) -> Option<String> {
        match field {
            EmployeeField::State => self.state.clone(),
            EmployeeField::District => self.district.clone(),
            EmployeeField::City => self.city.clone(),
            EmployeeField::Designation => self.designation.clone(),
            EmployeeField::Gender => self.gender.map(|g| g.label().to_string()),
            _ => None,
        }
    }

    /// Display text for a choice field's current value.
    pub fn choice_label(&self, field: EmployeeField) -> Option<String> {
        let value = self.choice_value(field)?;
        let label = self
            .choice_options(field)
            .into_iter()
            .find(|(v, _)| *v == value)
            .map(|(_, label)| label)
            .unwrap_or(value);
        Some(label)
    }

    fn set_choice(&mut self, field: EmployeeField, value: String) {
        match field {
            EmployeeField::State => self.set_state(Some(value)),
            EmployeeField::District => self.set_district(Some(value)),
            EmployeeField::City => self.city = Some(value),
            EmployeeField::Designation => self.designation = Some(value),
            EmployeeField::Gender => self.gender = Gender::from_label(&value),
            _ => {}
        }
    }

    /// Left/right on the focused field: step a chooser, or move the role
    /// cursor.
    pub fn cycle(&mut self, direction: isize) {
        let field = self.focused();
        if field == EmployeeField::Roles {
            let len = Role::ALL.len() as isize;
            self.role_cursor = (self.role_cursor as isize + direction).rem_euclid(len) as usize;
            return;
        }
        if !field.is_choice() {
            return;
        }

        let options = self.choice_options(field);
        if options.is_empty() {
            return;
        }
        let len = options.len() as isize;
        let current = self
            .choice_value(field)
            .and_then(|value| options.iter().position(|(v, _)| *v == value));
        let index = match current {
            Some(pos) => (pos as isize + direction).rem_euclid(len),
            None if direction >= 0 => 0,
            None => len - 1,
        };
        let value = options[index as usize].0.clone();
        self.set_choice(field, value);
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Toggle the role under the cursor.
    pub fn toggle_role(&mut self) {
        let role = Role::ALL[self.role_cursor];
        if let Some(pos) = self.roles.iter().position(|r| *r == role) {
            self.roles.remove(pos);
        } else {
            self.roles.push(role);
        }
    }

    pub fn switch_pane(&mut self) {
        self.pane = match self.pane {
            SelectorPane::Candidates => SelectorPane::Selected,
            SelectorPane::Selected => SelectorPane::Candidates,
        };
    }

    pub fn selector_down(&mut self) {
        match self.pane {
            SelectorPane::Candidates => self.selector.candidate_next(),
            SelectorPane::Selected => self.selector.selected_next(),
        }
    }

    pub fn selector_up(&mut self) {
        match self.pane {
            SelectorPane::Candidates => self.selector.candidate_prev(),
            SelectorPane::Selected => self.selector.selected_prev(),
        }
    }

    /// Latest selection reported by the technology picker.
    pub fn technologies(&self) -> Vec<String> {
        self.technologies.borrow().clone()
    }

    /// Validate the form into the employee to send.
    pub fn build_employee(&self) -> FormResult<Employee> {
        let employee_id = required_number(&self.employee_id, EmployeeField::EmployeeId.label())?;
        let first_name = required_text(&self.first_name, EmployeeField::FirstName.label())?;
        let last_name = required_text(&self.last_name, EmployeeField::LastName.label())?;
        let pincode = optional_number(&self.pincode, EmployeeField::Pincode.label())?;

        let joining_date = match self.joining_date.trim() {
            "" => None,
            raw => Some(
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .map_err(|_| FormError::InvalidDate(EmployeeField::JoiningDate.label()))?,
            ),
        };

        Ok(Employee {
            id: self.existing.as_ref().and_then(|e| e.id),
            employee_id: Some(employee_id),
            first_name,
            last_name,
            address1: self.address1.trim().to_string(),
            address2: self.address2.trim().to_string(),
            address3: self.address3.trim().to_string(),
            state: self.state.clone(),
            district: self.district.clone(),
            city: self.city.clone(),
            pincode,
            joining_date,
            gender: self.gender.map(|g| g.label().to_string()),
            admin: self.has_role(Role::Admin),
            reporting: self.has_role(Role::Reporting),
            supervisor: self.has_role(Role::Supervisor),
            user: self.has_role(Role::User),
            designation: self.designation.clone(),
            technologies: self.technologies(),
        })
    }

    /// Validate and produce the save request.
    pub fn submit(&mut self) -> FormResult<ApiRequest> {
        let employee = match self.build_employee() {
            Ok(employee) => employee,
            Err(e) => {
                self.error = Some(e.to_string());
                return Err(e);
            }
        };
        self.error = None;
        self.submitting = true;

        Ok(match &self.mode {
            FormMode::Create => ApiRequest::CreateEmployee {
                tech_ids: employee.technologies.clone(),
                employee,
            },
            FormMode::Edit { key } => ApiRequest::UpdateEmployee {
                key: key.clone(),
                employee,
            },
        })
    }

    /// Settle a save. Returns the success message to show.
    pub fn apply_saved(&mut self, result: ApiResult<Employee>) -> Option<String> {
        self.submitting = false;
        match result {
            Ok(_) => Some(self.mode.saved_message().to_string()),
            Err(e) => {
                log::log(&format!("Error submitting form: {}", e));
                self.error = Some(format!(
                    "An error occurred while submitting the form. Please try again. ({})",
                    e
                ));
                None
            }
        }
    }
}

fn settle<T>(what: &str, result: ApiResult<Vec<T>>) -> Loadable<Vec<T>> {
    if let Err(e) = &result {
        log::log(&format!("Error fetching {}: {}", what, e));
    }
    Loadable::from_result(result)
}

fn required_text(raw: &str, label: &'static str) -> FormResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FormError::Required(label));
    }
    Ok(trimmed.to_string())
}

fn required_number(raw: &str, label: &'static str) -> FormResult<i64> {
    optional_number(raw, label)?.ok_or(FormError::Required(label))
}

fn optional_number(raw: &str, label: &'static str) -> FormResult<Option<i64>> {
    match raw.trim() {
        "" => Ok(None),
        trimmed => trimmed
            .parse()
            .map(Some)
            .map_err(|_| FormError::NotANumber(label)),
    }
}
