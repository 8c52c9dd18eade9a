//! Request dispatcher service
//!
//! Screens describe the backend work they need as `ApiRequest`s; the
//! dispatcher runs each one on its own task and reports back through the
//! event channel, so the UI loop never awaits the network.

use serde_json::Value;
use tokio::sync::mpsc;

use crate::api::{
    ApiClient, City, Designation, District, EmpTechStack, Employee, Resource, State, Technology,
};
use crate::error::{ApiError, ApiResult};
use crate::log;
use crate::screens::{FormMode, ResourceKind};

/// Backend work requested by a screen
#[derive(Debug, Clone, PartialEq)]
pub enum ApiRequest {
    LoadTechCatalog,
    LoadStates,
    LoadDistricts,
    LoadCities,
    LoadDesignations,
    LoadRecords(ResourceKind),
    /// Parent records offered by `screen`'s lookup field
    LoadLookup {
        screen: ResourceKind,
        source: ResourceKind,
    },
    SaveRecord {
        kind: ResourceKind,
        key: Option<String>,
        body: Value,
    },
    DeleteRecord {
        kind: ResourceKind,
        key: String,
    },
    LoadEmployees,
    CreateEmployee {
        employee: Employee,
        tech_ids: Vec<String>,
    },
    UpdateEmployee {
        key: String,
        employee: Employee,
    },
    DeleteEmployee {
        key: String,
    },
}

/// Completed backend work
#[derive(Debug)]
pub enum ApiEvent {
    TechCatalog(ApiResult<Vec<Technology>>),
    States(ApiResult<Vec<State>>),
    Districts(ApiResult<Vec<District>>),
    Cities(ApiResult<Vec<City>>),
    Designations(ApiResult<Vec<Designation>>),
    Records(ResourceKind, ApiResult<Vec<Value>>),
    Lookup(ResourceKind, ApiResult<Vec<Value>>),
    RecordSaved(ResourceKind, ApiResult<()>),
    RecordDeleted(ResourceKind, ApiResult<()>),
    Employees(ApiResult<Vec<Employee>>),
    /// `mode` is the form mode the save was submitted from
    EmployeeSaved {
        mode: FormMode,
        result: ApiResult<Employee>,
    },
    EmployeeDeleted(ApiResult<()>),
}

/// Runs requests against the backend
#[derive(Clone)]
pub struct RequestDispatcher {
    client: ApiClient,
    events: mpsc::Sender<ApiEvent>,
}

impl RequestDispatcher {
    pub fn new(client: ApiClient, events: mpsc::Sender<ApiEvent>) -> Self {
        Self { client, events }
    }

    /// Spawn each request; results arrive on the event channel.
    pub fn dispatch_all(&self, requests: Vec<ApiRequest>) {
        for request in requests {
            self.dispatch(request);
        }
    }

    pub fn dispatch(&self, request: ApiRequest) {
        log::log_event(&format!("dispatch {:?}", request));
        let client = self.client.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let event = execute(&client, request).await;
            if events.send(event).await.is_err() {
                log::log("Event channel closed, dropping API result");
            }
        });
    }
}

/// Run one request to completion.
pub async fn execute(client: &ApiClient, request: ApiRequest) -> ApiEvent {
    match request {
        ApiRequest::LoadTechCatalog => ApiEvent::TechCatalog(client.list().await),
        ApiRequest::LoadStates => ApiEvent::States(client.list().await),
        ApiRequest::LoadDistricts => ApiEvent::Districts(client.list().await),
        ApiRequest::LoadCities => ApiEvent::Cities(client.list().await),
        ApiRequest::LoadDesignations => ApiEvent::Designations(client.list().await),
        ApiRequest::LoadRecords(kind) => {
            ApiEvent::Records(kind, client.list_values(kind.path()).await)
        }
        ApiRequest::LoadLookup { screen, source } => {
            ApiEvent::Lookup(screen, client.list_values(source.path()).await)
        }
        ApiRequest::SaveRecord { kind, key, body } => {
            let result = match key {
                Some(key) => client.update_value(kind.path(), &key, &body).await,
                None => client.create_value(kind.path(), &body).await,
            };
            ApiEvent::RecordSaved(kind, result)
        }
        ApiRequest::DeleteRecord { kind, key } => {
            ApiEvent::RecordDeleted(kind, client.delete_value(kind.path(), &key).await)
        }
        ApiRequest::LoadEmployees => ApiEvent::Employees(client.list().await),
        ApiRequest::CreateEmployee { employee, tech_ids } => ApiEvent::EmployeeSaved {
            mode: FormMode::Create,
            result: create_employee(client, &employee, &tech_ids).await,
        },
        ApiRequest::UpdateEmployee { key, employee } => {
            let result = client.update(&key, &employee).await;
            ApiEvent::EmployeeSaved {
                mode: FormMode::Edit { key },
                result: result.map(|()| employee),
            }
        }
        ApiRequest::DeleteEmployee { key } => {
            ApiEvent::EmployeeDeleted(client.delete::<Employee>(&key).await)
        }
    }
}

/// Create the employee, then link each selected technology to it.
async fn create_employee(
    client: &ApiClient,
    employee: &Employee,
    tech_ids: &[String],
) -> ApiResult<Employee> {
    let created = client.create(employee).await?;
    let employee_id = created
        .employee_id
        .ok_or(ApiError::MissingField("employeeId"))?;
    log::log(&format!("Employee {} created", employee_id));

    if tech_ids.is_empty() {
        log::log("No technologies selected, skipping tech stack");
        return Ok(created);
    }

    for tech_id in tech_ids {
        let tech_id: i64 = tech_id
            .parse()
            .map_err(|_| ApiError::Decode(format!("technology id '{}' is not numeric", tech_id)))?;
        let link = EmpTechStack {
            id: None,
            employee_id,
            tech_id,
        };
        client
            .create_value(EmpTechStack::PATH, &serde_json::to_value(&link)?)
            .await?;
    }
    log::log(&format!("Linked {} technologies to employee {}", tech_ids.len(), employee_id));

    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::unreachable_base_url;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn employee() -> Employee {
        Employee {
            employee_id: Some(1001),
            first_name: "Asha".to_string(),
            last_name: "Rao".to_string(),
            ..Default::default()
        }
    }

    async fn mount_created_employee(server: &MockServer, body: Value) {
        Mock::given(method("POST"))
            .and(path("/api/employees"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_create_employee_links_each_technology() {
        let server = MockServer::start().await;
        mount_created_employee(
            &server,
            json!({"id": 5, "employeeId": 1001, "firstName": "Asha", "lastName": "Rao"}),
        )
        .await;
        Mock::given(method("POST"))
            .and(path("/api/emptechstack"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
            .expect(2)
            .mount(&server)
            .await;
        let client = ApiClient::new(&server.uri(), None).unwrap();

        let event = execute(
            &client,
            ApiRequest::CreateEmployee {
                employee: employee(),
                tech_ids: vec!["2".to_string(), "7".to_string()],
            },
        )
        .await;

        match event {
            ApiEvent::EmployeeSaved {
                mode: FormMode::Create,
                result: Ok(created),
            } => assert_eq!(created.id, Some(5)),
            other => panic!("unexpected event: {other:?}"),
        }

        let requests = server.received_requests().await.unwrap();
        let paths: Vec<&str> = requests.iter().map(|r| r.url.path()).collect();
        assert_eq!(paths, ["/api/employees", "/api/emptechstack", "/api/emptechstack"]);

        let first_link = requests[1].body_json::<Value>().unwrap();
        let second_link = requests[2].body_json::<Value>().unwrap();
        assert_eq!(first_link["techId"], 2);
        assert_eq!(second_link["techId"], 7);
        assert_eq!(second_link["employeeId"], 1001);
    }

    #[tokio::test]
    async fn test_create_employee_requires_echoed_id() {
        let server = MockServer::start().await;
        mount_created_employee(&server, json!({"id": 5, "firstName": "Asha"})).await;
        let client = ApiClient::new(&server.uri(), None).unwrap();

        let result = create_employee(&client, &employee(), &["1".to_string()]).await;
        assert!(matches!(result, Err(ApiError::MissingField("employeeId"))));
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_employee_without_technologies_posts_once() {
        let server = MockServer::start().await;
        mount_created_employee(&server, json!({"id": 5, "employeeId": 1001, "firstName": "Asha"}))
            .await;
        let client = ApiClient::new(&server.uri(), None).unwrap();

        let result = create_employee(&client, &employee(), &[]).await;
        assert!(result.is_ok());
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_event_names_edited_key() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/employees/42"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        let client = ApiClient::new(&server.uri(), None).unwrap();

        let event = execute(
            &client,
            ApiRequest::UpdateEmployee {
                key: "42".to_string(),
                employee: employee(),
            },
        )
        .await;
        match event {
            ApiEvent::EmployeeSaved { mode, result } => {
                assert_eq!(mode, FormMode::Edit { key: "42".to_string() });
                assert_eq!(result.unwrap().first_name, "Asha");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_catalog_failure_is_reported_as_event() {
        let client = ApiClient::new(&unreachable_base_url(), None).unwrap();
        let event = execute(&client, ApiRequest::LoadTechCatalog).await;
        assert!(matches!(event, ApiEvent::TechCatalog(Err(_))));
    }

    #[tokio::test]
    async fn test_save_record_routes_by_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/state"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/state/4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;
        let client = ApiClient::new(&server.uri(), None).unwrap();
        let body = json!({"stateId": 4, "stateName": "Goa"});

        let created = execute(
            &client,
            ApiRequest::SaveRecord {
                kind: ResourceKind::States,
                key: None,
                body: body.clone(),
            },
        )
        .await;
        assert!(matches!(created, ApiEvent::RecordSaved(_, Ok(()))));

        let updated = execute(
            &client,
            ApiRequest::SaveRecord {
                kind: ResourceKind::States,
                key: Some("4".to_string()),
                body,
            },
        )
        .await;
        assert!(matches!(updated, ApiEvent::RecordSaved(_, Ok(()))));
    }

    #[tokio::test]
    async fn test_lookup_fetches_source_for_screen() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/state"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{"stateId": 29, "stateName": "Karnataka"}])),
            )
            .expect(1)
            .mount(&server)
            .await;
        let client = ApiClient::new(&server.uri(), None).unwrap();

        let event = execute(
            &client,
            ApiRequest::LoadLookup {
                screen: ResourceKind::Districts,
                source: ResourceKind::States,
            },
        )
        .await;
        match event {
            ApiEvent::Lookup(ResourceKind::Districts, Ok(rows)) => {
                assert_eq!(rows[0]["stateName"], "Karnataka")
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_dispatcher_delivers_events() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/employees"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;
        let client = ApiClient::new(&server.uri(), None).unwrap();
        let (tx, mut rx) = mpsc::channel(4);

        RequestDispatcher::new(client, tx).dispatch(ApiRequest::LoadEmployees);

        match rx.recv().await {
            Some(ApiEvent::Employees(Ok(employees))) => assert!(employees.is_empty()),
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
