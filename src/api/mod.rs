//! REST access to the master-data backend.

mod client;
mod models;

pub use client::ApiClient;
pub use models::{City, District, Designation, EmpTechStack, Employee, Resource, State, Technology};

/// A base URL nothing is listening on.
#[cfg(test)]
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
