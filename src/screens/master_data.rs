//! Table-plus-form screens for the simple master-data collections.
//!
//! States, districts, cities, designations, technologies and students all
//! share one shape: a list fetched from the backend, a form that either
//! creates a record or edits the highlighted one, and a confirmation step
//! before anything is sent. Rows are kept as raw JSON so edits preserve
//! fields the form does not show (database ids, version counters).

use serde_json::{Map, Number, Value};

use crate::api::{City, Designation, District, Resource, State, Technology};
use crate::error::{ApiResult, FormError, FormResult};
use crate::loadable::Loadable;
use crate::log;
use crate::picker::Picker;
use crate::services::ApiRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    States,
    Districts,
    Cities,
    Designations,
    Technologies,
    Students,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Integer,
    Decimal,
    Text,
    YesNo,
    /// Key of a record from another collection, picked from its list
    Lookup(ResourceKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub label: &'static str,
    pub field_type: FieldType,
    pub required: bool,
}

impl FieldDef {
    const fn new(name: &'static str, label: &'static str, field_type: FieldType) -> Self {
        Self { name, label, field_type, required: true }
    }

    const fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

const STATE_FIELDS: &[FieldDef] = &[
    FieldDef::new("stateId", "State ID", FieldType::Integer),
    FieldDef::new("stateName", "State Name", FieldType::Text),
];

const DISTRICT_FIELDS: &[FieldDef] = &[
    FieldDef::new("districtId", "District ID", FieldType::Integer),
    FieldDef::new("districtName", "District Name", FieldType::Text),
    FieldDef::new("stateId", "State", FieldType::Lookup(ResourceKind::States)),
];

const CITY_FIELDS: &[FieldDef] = &[
    FieldDef::new("cityId", "City ID", FieldType::Integer),
    FieldDef::new("cityName", "City Name", FieldType::Text),
    FieldDef::new("districtId", "District", FieldType::Lookup(ResourceKind::Districts)),
];

const DESIGNATION_FIELDS: &[FieldDef] = &[
    FieldDef::new("designationId", "Designation ID", FieldType::Integer),
    FieldDef::new("designationName", "Designation Name", FieldType::Text),
];

const TECHNOLOGY_FIELDS: &[FieldDef] = &[
    FieldDef::new("techId", "Tech ID", FieldType::Integer),
    FieldDef::new("techDescription", "Description", FieldType::Text),
];

const STUDENT_FIELDS: &[FieldDef] = &[
    FieldDef::new("name", "Name", FieldType::Text),
    FieldDef::new("division", "Division", FieldType::Text),
    FieldDef::new("section", "Section", FieldType::Text).optional(),
    FieldDef::new("fees", "Fees", FieldType::Decimal),
    FieldDef::new("busFacility", "Bus Facility", FieldType::YesNo),
];

const STUDENT_KEY: FieldDef = FieldDef::new("studentId", "Student ID", FieldType::Integer);

impl ResourceKind {
    pub const ALL: [ResourceKind; 6] = [
        ResourceKind::States,
        ResourceKind::Districts,
        ResourceKind::Cities,
        ResourceKind::Designations,
        ResourceKind::Technologies,
        ResourceKind::Students,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ResourceKind::States => "States",
            ResourceKind::Districts => "Districts",
            ResourceKind::Cities => "Cities",
            ResourceKind::Designations => "Designations",
            ResourceKind::Technologies => "Technologies",
            ResourceKind::Students => "Students",
        }
    }

    /// Singular noun for messages ("State saved successfully!")
    pub fn noun(self) -> &'static str {
        match self {
            ResourceKind::States => "State",
            ResourceKind::Districts => "District",
            ResourceKind::Cities => "City",
            ResourceKind::Designations => "Designation",
            ResourceKind::Technologies => "Technology",
            ResourceKind::Students => "Student",
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            ResourceKind::States => State::PATH,
            ResourceKind::Districts => District::PATH,
            ResourceKind::Cities => City::PATH,
            ResourceKind::Designations => Designation::PATH,
            ResourceKind::Technologies => Technology::PATH,
            ResourceKind::Students => "/api/students",
        }
    }

    /// Editable fields, in form order
    pub fn fields(self) -> &'static [FieldDef] {
        match self {
            ResourceKind::States => STATE_FIELDS,
            ResourceKind::Districts => DISTRICT_FIELDS,
            ResourceKind::Cities => CITY_FIELDS,
            ResourceKind::Designations => DESIGNATION_FIELDS,
            ResourceKind::Technologies => TECHNOLOGY_FIELDS,
            ResourceKind::Students => STUDENT_FIELDS,
        }
    }

    /// Field whose value addresses a record in `PUT`/`DELETE` paths
    pub fn key_field(self) -> &'static str {
        match self {
            ResourceKind::Students => STUDENT_KEY.name,
            other => other.fields()[0].name,
        }
    }

    /// Field shown when a record of this kind is offered in a lookup
    pub fn label_field(self) -> &'static str {
        self.fields()
            .iter()
            .find(|def| def.field_type == FieldType::Text)
            .map(|def| def.name)
            .unwrap_or_else(|| self.key_field())
    }

    /// Collection the form picks a parent record from, if any
    pub fn lookup(self) -> Option<ResourceKind> {
        self.fields().iter().find_map(|def| match def.field_type {
            FieldType::Lookup(source) => Some(source),
            _ => None,
        })
    }

    /// Table columns: the form fields, preceded by the key when the server
    /// assigns it.
    pub fn columns(self) -> Vec<FieldDef> {
        let mut columns = Vec::new();
        if self == ResourceKind::Students {
            columns.push(STUDENT_KEY);
        }
        columns.extend_from_slice(self.fields());
        columns
    }

    /// Parse a screen name given on the command line or in config.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.title().to_ascii_lowercase() == name)
    }
}

/// Render a JSON value as a table cell.
pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// What the confirmation modal will do once accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    Submit,
    Update,
    Delete { key: String },
}

/// Which half of the screen has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MasterPane {
    Table,
    Form,
}

#[derive(Debug)]
pub struct MasterDataScreen {
    pub kind: ResourceKind,
    pub rows: Loadable<Vec<Value>>,
    pub lookup: Loadable<Vec<Value>>,
    pub selected: usize,
    pub values: Vec<String>,
    pub focus: usize,
    pub pane: MasterPane,
    pub action: Option<PendingAction>,
    pub confirming: bool,
    pub error: Option<String>,
    editing: Option<Value>,
}

impl MasterDataScreen {
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            rows: Loadable::Idle,
            lookup: Loadable::Idle,
            selected: 0,
            values: blank_values(kind),
            focus: 0,
            pane: MasterPane::Table,
            action: None,
            confirming: false,
            error: None,
            editing: None,
        }
    }

    pub fn load_request(&mut self) -> ApiRequest {
        self.rows = Loadable::Loading;
        ApiRequest::LoadRecords(self.kind)
    }

    /// Rows plus the parent list the form picks from.
    pub fn load_requests(&mut self) -> Vec<ApiRequest> {
        let mut requests = vec![self.load_request()];
        if let Some(source) = self.kind.lookup() {
            self.lookup = Loadable::Loading;
            requests.push(ApiRequest::LoadLookup {
                screen: self.kind,
                source,
            });
        }
        requests
    }

    pub fn apply_rows(&mut self, result: ApiResult<Vec<Value>>) {
        if let Err(e) = &result {
            let title = self.kind.title().to_lowercase();
            self.error = Some(format!("Failed to fetch {}. {}", title, e));
        }
        self.rows = Loadable::from_result(result);
        self.clamp_selection();
    }

    pub fn apply_lookup(&mut self, result: ApiResult<Vec<Value>>) {
        if let Err(e) = &result {
            let source = self.kind.lookup().map(ResourceKind::title).unwrap_or_default();
            log::log(&format!("Error fetching {} for {}: {}", source, self.kind.title(), e));
            self.error = Some(format!("Failed to fetch {}. {}", source.to_lowercase(), e));
        }
        self.lookup = Loadable::from_result(result);
    }

    /// `(key, label)` pairs offered by the lookup field.
    pub fn lookup_options(&self) -> Vec<(String, String)> {
        let Some(source) = self.kind.lookup() else {
            return Vec::new();
        };
        self.lookup
            .items()
            .iter()
            .map(|row| {
                (
                    cell_text(row.get(source.key_field())),
                    cell_text(row.get(source.label_field())),
                )
            })
            .filter(|(key, _)| !key.is_empty())
            .collect()
    }

    /// Label for a lookup key, or the key itself when the parent list has
    /// no such record.
    pub fn lookup_label(&self, key: &str) -> String {
        self.lookup_options()
            .into_iter()
            .find(|(k, _)| k == key)
            .map(|(_, label)| label)
            .unwrap_or_else(|| key.to_string())
    }

    pub fn is_updating(&self) -> bool {
        self.action == Some(PendingAction::Update)
    }

    /// The key field cannot change while editing an existing record.
    pub fn is_locked(&self, index: usize) -> bool {
        self.is_updating()
            && self
                .kind
                .fields()
                .get(index)
                .is_some_and(|def| def.name == self.kind.key_field())
    }

    pub fn focus_form(&mut self) {
        self.pane = MasterPane::Form;
        if self.is_locked(self.focus) {
            self.next_field();
        }
    }

    pub fn focus_table(&mut self) {
        self.pane = MasterPane::Table;
    }

    pub fn next_field(&mut self) {
        let len = self.values.len();
        for step in 1..=len {
            let index = (self.focus + step) % len;
            if !self.is_locked(index) {
                self.focus = index;
                return;
            }
        }
    }

    pub fn prev_field(&mut self) {
        let len = self.values.len();
        for step in 1..=len {
            let index = (self.focus + len - step) % len;
            if !self.is_locked(index) {
                self.focus = index;
                return;
            }
        }
    }

    fn focused_def(&self) -> Option<FieldDef> {
        self.kind.fields().get(self.focus).copied()
    }

    pub fn input_char(&mut self, c: char) {
        if self.is_locked(self.focus) {
            return;
        }
        match self.focused_def().map(|s| s.field_type) {
            Some(FieldType::YesNo) => {
                if c == ' ' {
                    self.toggle();
                }
            }
            Some(FieldType::Lookup(_)) => {}
            Some(_) => {
                if let Some(value) = self.values.get_mut(self.focus) {
                    value.push(c);
                }
            }
            None => {}
        }
    }

    pub fn backspace(&mut self) {
        if self.is_locked(self.focus) {
            return;
        }
        match self.focused_def().map(|s| s.field_type) {
            Some(FieldType::YesNo) => {}
            Some(FieldType::Lookup(_)) => {
                if let Some(value) = self.values.get_mut(self.focus) {
                    value.clear();
                }
            }
            _ => {
                if let Some(value) = self.values.get_mut(self.focus) {
                    value.pop();
                }
            }
        }
    }

    /// Step a lookup field through the parent records.
    pub fn cycle(&mut self, direction: isize) {
        if self.is_locked(self.focus) {
            return;
        }
        if !matches!(self.focused_def().map(|s| s.field_type), Some(FieldType::Lookup(_))) {
            return;
        }
        let options = self.lookup_options();
        if options.is_empty() {
            return;
        }

        let len = options.len() as isize;
        let current = self
            .values
            .get(self.focus)
            .and_then(|value| options.iter().position(|(key, _)| key == value));
        let index = match current {
            Some(pos) => (pos as isize + direction).rem_euclid(len),
            None if direction >= 0 => 0,
            None => len - 1,
        };
        if let Some(value) = self.values.get_mut(self.focus) {
            *value = options[index as usize].0.clone();
        }
    }

    /// Flip a yes/no field.
    pub fn toggle(&mut self) {
        if self.focused_def().map(|s| s.field_type) != Some(FieldType::YesNo) {
            return;
        }
        if let Some(value) = self.values.get_mut(self.focus) {
            *value = if value == "yes" { "no".to_string() } else { "yes".to_string() };
        }
    }

    /// Copy the highlighted row into the form for editing.
    pub fn edit_selected(&mut self) {
        let Some(row) = self.selected_item().cloned() else {
            return;
        };
        self.values = self
            .kind
            .fields()
            .iter()
            .map(|def| match def.field_type {
                FieldType::YesNo => yes_no(row.get(def.name)),
                _ => cell_text(row.get(def.name)),
            })
            .collect();
        self.editing = Some(row);
        self.action = Some(PendingAction::Update);
        self.focus = 0;
        self.focus_form();
    }

    /// Clear the form back to "create" mode.
    pub fn reset_form(&mut self) {
        self.values = blank_values(self.kind);
        self.editing = None;
        self.action = None;
        self.focus = 0;
    }

    /// Validate the form and ask for confirmation.
    pub fn request_submit(&mut self) -> FormResult<()> {
        self.build_body()?;
        if !self.is_updating() {
            self.action = Some(PendingAction::Submit);
        }
        self.confirming = true;
        Ok(())
    }

    /// Ask for confirmation before deleting the highlighted row.
    pub fn request_delete(&mut self) {
        let Some(key) = self.selected_key() else {
            return;
        };
        self.action = Some(PendingAction::Delete { key });
        self.confirming = true;
    }

    /// Accept the confirmation modal.
    pub fn confirm(&mut self) -> Option<ApiRequest> {
        if !self.confirming {
            return None;
        }
        self.confirming = false;

        let request = match self.action.clone()? {
            PendingAction::Submit => self.build_body().map(|body| ApiRequest::SaveRecord {
                kind: self.kind,
                key: None,
                body,
            }),
            PendingAction::Update => {
                let key = self
                    .editing
                    .as_ref()
                    .map(|row| cell_text(row.get(self.kind.key_field())))
                    .unwrap_or_default();
                self.build_body().map(|body| ApiRequest::SaveRecord {
                    kind: self.kind,
                    key: Some(key),
                    body,
                })
            }
            PendingAction::Delete { key } => Ok(ApiRequest::DeleteRecord {
                kind: self.kind,
                key,
            }),
        };

        match request {
            Ok(request) => Some(request),
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }

    /// Dismiss the confirmation modal without sending anything.
    pub fn cancel(&mut self) {
        self.confirming = false;
        if matches!(self.action, Some(PendingAction::Delete { .. })) {
            self.action = self.editing.as_ref().map(|_| PendingAction::Update);
        }
    }

    /// Settle a save or delete. Returns the success message to show.
    pub fn apply_mutation(&mut self, result: ApiResult<()>, deleted: bool) -> Option<String> {
        match result {
            Ok(()) => {
                self.error = None;
                if deleted {
                    self.action = self.editing.as_ref().map(|_| PendingAction::Update);
                    Some(format!("{} deleted successfully!", self.kind.noun()))
                } else {
                    self.reset_form();
                    self.focus_table();
                    Some(format!("{} saved successfully!", self.kind.noun()))
                }
            }
            Err(e) => {
                let verb = if deleted { "delete" } else { "submit" };
                self.error = Some(format!(
                    "Failed to {} {} details. {}",
                    verb,
                    self.kind.noun().to_lowercase(),
                    e
                ));
                None
            }
        }
    }

    pub fn selected_key(&self) -> Option<String> {
        self.selected_item()
            .map(|row| cell_text(row.get(self.kind.key_field())))
            .filter(|key| !key.is_empty())
    }

    /// Build the JSON body from the form, starting from the edited row so
    /// fields the form does not show survive the update.
    pub fn build_body(&self) -> FormResult<Value> {
        let mut body = match (&self.action, &self.editing) {
            (Some(PendingAction::Update), Some(Value::Object(row))) => row.clone(),
            _ => Map::new(),
        };

        for (def, raw) in self.kind.fields().iter().zip(&self.values) {
            let raw = raw.trim();
            if raw.is_empty() {
                if def.required {
                    return Err(FormError::Required(def.label));
                }
                let empty = match def.field_type {
                    FieldType::Text => Value::String(String::new()),
                    _ => Value::Null,
                };
                body.insert(def.name.to_string(), empty);
                continue;
            }

            let value = match def.field_type {
                FieldType::Integer | FieldType::Lookup(_) => raw
                    .parse::<i64>()
                    .map(Value::from)
                    .map_err(|_| FormError::NotANumber(def.label))?,
                FieldType::Decimal => raw
                    .parse::<f64>()
                    .ok()
                    .and_then(Number::from_f64)
                    .map(Value::Number)
                    .ok_or(FormError::NotANumber(def.label))?,
                FieldType::Text => Value::String(raw.to_string()),
                FieldType::YesNo => {
                    Value::String(if raw == "yes" { "yes" } else { "no" }.to_string())
                }
            };
            body.insert(def.name.to_string(), value);
        }

        Ok(Value::Object(body))
    }

    /// Prompt shown in the confirmation modal.
    pub fn confirm_message(&self) -> String {
        let noun = self.kind.noun().to_lowercase();
        match &self.action {
            Some(PendingAction::Submit) => format!("Submit this {}?", noun),
            Some(PendingAction::Update) => format!("Save changes to this {}?", noun),
            Some(PendingAction::Delete { key }) => format!("Delete {} {}?", noun, key),
            None => String::new(),
        }
    }
}

impl Picker for MasterDataScreen {
    type Item = Value;

    fn items(&self) -> &[Value] {
        self.rows.items()
    }

    fn selected_index(&self) -> usize {
        self.selected
    }

    fn set_selected_index(&mut self, index: usize) {
        self.selected = index;
    }
}

fn blank_values(kind: ResourceKind) -> Vec<String> {
    kind.fields()
        .iter()
        .map(|def| match def.field_type {
            FieldType::YesNo => "no".to_string(),
            _ => String::new(),
        })
        .collect()
}

fn yes_no(value: Option<&Value>) -> String {
    match value {
        Some(Value::Bool(true)) => "yes".to_string(),
        Some(Value::String(s)) if s.eq_ignore_ascii_case("yes") => "yes".to_string(),
        _ => "no".to_string(),
    }
}
