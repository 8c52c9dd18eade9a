//! Services module
//!
//! Runs backend requests off the UI loop and feeds their results back as
//! events.

mod requests;

pub use requests::{ApiEvent, ApiRequest, RequestDispatcher};
