//! Wire models for the master-data backend.
//!
//! Field names follow the backend's camelCase JSON. Every record carries an
//! optional database `id` next to its business key.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// A record type served from its own REST collection.
pub trait Resource: Serialize + DeserializeOwned + Send + 'static {
    /// Collection path, relative to the API base URL
    const PATH: &'static str;

    /// Key used in `PUT`/`DELETE` paths
    fn key(&self) -> Option<String>;
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Technology {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub tech_id: Option<i64>,
    #[serde(default, alias = "description", deserialize_with = "nullable_string")]
    pub tech_description: String,
}

impl Resource for Technology {
    const PATH: &'static str = "/api/techs";

    fn key(&self) -> Option<String> {
        self.tech_id.or(self.id).map(|id| id.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct State {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub state_id: i64,
    #[serde(default, deserialize_with = "nullable_string")]
    pub state_name: String,
}

impl Resource for State {
    const PATH: &'static str = "/api/state";

    fn key(&self) -> Option<String> {
        Some(self.state_id.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct District {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub district_id: i64,
    #[serde(default, deserialize_with = "nullable_string")]
    pub district_name: String,
    #[serde(default)]
    pub state_id: Option<i64>,
}

impl Resource for District {
    const PATH: &'static str = "/api/district";

    fn key(&self) -> Option<String> {
        Some(self.district_id.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub city_id: i64,
    #[serde(default, deserialize_with = "nullable_string")]
    pub city_name: String,
    #[serde(default)]
    pub district_id: Option<i64>,
}

impl Resource for City {
    const PATH: &'static str = "/api/city";

    fn key(&self) -> Option<String> {
        Some(self.city_id.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Designation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub designation_id: i64,
    #[serde(default, deserialize_with = "nullable_string")]
    pub designation_name: String,
}

impl Resource for Designation {
    const PATH: &'static str = "/api/designations";

    fn key(&self) -> Option<String> {
        Some(self.designation_id.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub employee_id: Option<i64>,
    #[serde(default, deserialize_with = "nullable_string")]
    pub first_name: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub last_name: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub address1: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub address2: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub address3: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub pincode: Option<i64>,
    #[serde(default)]
    pub joining_date: Option<NaiveDate>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub admin: bool,
    #[serde(default)]
    pub reporting: bool,
    #[serde(default)]
    pub supervisor: bool,
    #[serde(default)]
    pub user: bool,
    #[serde(default)]
    pub designation: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub technologies: Vec<String>,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

impl Resource for Employee {
    const PATH: &'static str = "/api/employees";

    fn key(&self) -> Option<String> {
        self.id.or(self.employee_id).map(|id| id.to_string())
    }
}

/// Link between an employee and one technology.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmpTechStack {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub employee_id: i64,
    pub tech_id: i64,
}

impl Resource for EmpTechStack {
    const PATH: &'static str = "/api/emptechstack";

    fn key(&self) -> Option<String> {
        self.id.map(|id| id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_technology_accepts_backend_and_generic_names() {
        let backend: Technology =
            serde_json::from_str(r#"{"id":7,"techId":3,"techDescription":"Rust"}"#).unwrap();
        assert_eq!(backend.key().as_deref(), Some("3"));
        assert_eq!(backend.tech_description, "Rust");

        let generic: Technology = serde_json::from_str(r#"{"id":4,"description":"Go"}"#).unwrap();
        assert_eq!(generic.key().as_deref(), Some("4"));
        assert_eq!(generic.tech_description, "Go");
    }

    #[test]
    fn test_employee_tolerates_nulls() {
        let json = r#"{
            "id": 12,
            "employeeId": 1001,
            "firstName": "Asha",
            "lastName": null,
            "address1": "1 Main Rd",
            "address2": null,
            "joiningDate": "2024-04-01",
            "admin": true,
            "designation": null
        }"#;
        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.key().as_deref(), Some("12"));
        assert_eq!(employee.last_name, "");
        assert_eq!(employee.full_name(), "Asha");
        assert_eq!(employee.joining_date, NaiveDate::from_ymd_opt(2024, 4, 1));
        assert!(employee.admin);
        assert!(!employee.user);
    }

    #[test]
    fn test_employee_serializes_camel_case() {
        let employee = Employee {
            employee_id: Some(5),
            first_name: "Ravi".to_string(),
            technologies: vec!["1".to_string()],
            ..Default::default()
        };
        let value = serde_json::to_value(&employee).unwrap();
        assert_eq!(value["employeeId"], 5);
        assert_eq!(value["firstName"], "Ravi");
        assert_eq!(value["technologies"][0], "1");
        assert!(value.get("id").is_none());
    }
}
