//! Error types for table provisioning

use thiserror::Error;

use crate::store::StoreError;

/// Result type alias for table provisioning
pub type TableSetupResult<T> = Result<T, TableSetupError>;

/// Errors that can occur while provisioning a table
#[derive(Debug, Error)]
pub enum TableSetupError {
    /// Table name is empty or blank
    #[error("Table name must not be empty")]
    EmptyTableName,

    /// Listing or creating the table failed
    #[error("Failed to provision table: {0}")]
    Store(#[from] StoreError),
}
