//! Domain error types for orgdesk
//!
//! Provides structured error types for different domains:
//! - `ApiError` for calls against the master-data REST backend
//! - `FormError` for form validation
//! - `OrgdeskError` as the top-level error type

use thiserror::Error;

/// Top-level error type for orgdesk
#[derive(Debug, Error)]
pub enum OrgdeskError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Terminal error: {0}")]
    Terminal(String),
}

/// Errors related to the REST backend
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Invalid API base URL '{0}'")]
    InvalidBaseUrl(String),

    #[error("Response is missing '{0}'")]
    MissingField(&'static str),
}

/// Validation errors raised before anything is sent to the backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("{0} must be a number")]
    NotANumber(&'static str),

    #[error("{0} must be a date (YYYY-MM-DD)")]
    InvalidDate(&'static str),

    #[error("{0} is too large to calculate")]
    Overflow(&'static str),
}

/// Result type alias for OrgdeskError
pub type Result<T> = std::result::Result<T, OrgdeskError>;

/// Result type alias for ApiError
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Result type alias for FormError
pub type FormResult<T> = std::result::Result<T, FormError>;

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}
