//! Defines the app level error type and conversions to JSON error responses.
use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::expense::FieldError;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// One or more fields of an expense form are missing or invalid.
    #[error("validation failed: {0:?}")]
    Validation(Vec<FieldError>),

    /// The expense ID in the URL path is not an integer.
    #[error("\"{0}\" is not a valid expense ID")]
    InvalidExpenseId(String),

    /// The request body could not be read as JSON of the expected shape.
    #[error("invalid JSON body: {0}")]
    InvalidJson(String),

    /// The query string could not be parsed or contains invalid values.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// The requested expense was not found.
    ///
    /// For HTTP request handlers, the client should check that the ID is
    /// correct and that the expense has not been deleted.
    #[error("the requested expense could not be found")]
    NotFound,

    /// Could not acquire the expense store lock.
    #[error("could not acquire the expense store lock")]
    StoreLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// A date calculation went outside the supported calendar range.
    #[error("date out of range: {0}")]
    DateOutOfRange(String),
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::InvalidJson(rejection.body_text())
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Error::InvalidQuery(rejection.body_text())
    }
}

/// The JSON body sent to clients when a request fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// A short description of what went wrong.
    pub message: String,
    /// Per-field details for validation failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl ErrorResponse {
    pub(crate) fn new(message: &str) -> Self {
        Self {
            message: message.to_owned(),
            errors: None,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status_code, body) = match self {
            Error::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    message: "Validation failed".to_owned(),
                    errors: Some(errors),
                },
            ),
            Error::InvalidExpenseId(_) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("Invalid expense ID"),
            ),
            Error::InvalidJson(details) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(&format!("Invalid request body: {details}")),
            ),
            Error::InvalidQuery(details) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(&format!("Invalid query: {details}")),
            ),
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new("Expense not found"),
            ),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("An unexpected error occurred"),
                )
            }
        };

        (status_code, Json(body)).into_response()
    }
}
