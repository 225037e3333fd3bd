//! Error types for key-value store operations

use aws_sdk_dynamodb::error::{BuildError, SdkError};
use aws_sdk_dynamodb::operation::{
    create_table::CreateTableError, delete_item::DeleteItemError, list_tables::ListTablesError,
    put_item::PutItemError, scan::ScanError,
};
use thiserror::Error;

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors returned by a [`ContactStore`](super::ContactStore)
///
/// `ConditionFailed` is kept apart from every other failure so callers can tell a
/// failed precondition (missing row) from a broken store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The condition attached to a write did not hold
    #[error("Conditional check failed")]
    ConditionFailed,

    /// A table with the requested name already exists
    #[error("Table already exists: {0}")]
    TableAlreadyExists(String),

    /// The addressed table does not exist
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// The table did not reach the `ACTIVE` state in time
    #[error("Table {table_name} did not become active: {reason}")]
    TableNotActive {
        /// Table name
        table_name: String,
        /// Waiter failure
        reason: String,
    },

    /// The key is missing from the item or has the wrong type
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// A request could not be built from the given parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The store could not be reached
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Failed to put item into `DynamoDB`
    #[error("Failed to put item into DynamoDB: {0:?}")]
    DynamoDbPutError(#[from] SdkError<PutItemError>),

    /// Failed to scan table in `DynamoDB`
    #[error("Failed to scan table in DynamoDB: {0:?}")]
    DynamoDbScanError(#[from] SdkError<ScanError>),

    /// Failed to delete item from `DynamoDB`
    #[error("Failed to delete item from DynamoDB: {0:?}")]
    DynamoDbDeleteError(#[from] SdkError<DeleteItemError>),

    /// Failed to list tables in `DynamoDB`
    #[error("Failed to list tables in DynamoDB: {0:?}")]
    DynamoDbListTablesError(#[from] SdkError<ListTablesError>),

    /// Failed to create table in `DynamoDB`
    #[error("Failed to create table in DynamoDB: {0:?}")]
    DynamoDbCreateTableError(#[from] SdkError<CreateTableError>),
}

impl From<BuildError> for StoreError {
    fn from(err: BuildError) -> Self {
        Self::InvalidRequest(err.to_string())
    }
}
