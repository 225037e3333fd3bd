//! Universal error handling for the API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use contact_storage::contact::ContactStorageError;

/// Application error rendered as a status code with a plain text body
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    code: &'static str,
    message: &'static str,
}

impl AppError {
    /// Create a new application error
    #[must_use]
    pub const fn new(status: StatusCode, code: &'static str, message: &'static str) -> Self {
        Self {
            status,
            code,
            message,
        }
    }

    /// Error for a request body that could not be parsed
    #[must_use]
    pub const fn invalid_body() -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "invalid_body",
            "Invalid request body",
        )
    }

    /// HTTP status of the error
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Machine readable error code
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.code
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}

/// Convert contact storage errors to application errors
///
/// The cause is logged here, where it is still known; the response only carries the status.
impl From<ContactStorageError> for AppError {
    fn from(err: ContactStorageError) -> Self {
        match &err {
            ContactStorageError::NotFound(id) => {
                tracing::debug!("Contact not found: {id}");
                Self::new(StatusCode::NOT_FOUND, "not_found", "Item not found")
            }
            ContactStorageError::Store(store_err) => {
                tracing::error!("Contact store error: {store_err}");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    "Database error",
                )
            }
            ContactStorageError::SerializationError(msg) => {
                tracing::error!("Contact serialization error: {msg}");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    "Database error",
                )
            }
        }
    }
}
