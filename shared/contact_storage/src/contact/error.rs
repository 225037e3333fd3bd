//! Error types for contact storage operations

use thiserror::Error;

use crate::store::StoreError;

/// Result type alias for contact storage operations
pub type ContactStorageResult<T> = Result<T, ContactStorageError>;

/// Errors that can occur during contact storage operations
#[derive(Debug, Error)]
pub enum ContactStorageError {
    /// No contact with the given id exists
    #[error("Contact not found: {0}")]
    NotFound(String),

    /// The backing store failed
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Failed to convert a contact to or from a store item
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_dynamo::Error> for ContactStorageError {
    fn from(err: serde_dynamo::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
