//! Table provisioning run once at process start

mod error;

use aws_sdk_dynamodb::types::ScalarAttributeType;
pub use error::{TableSetupError, TableSetupResult};
use strum::Display;

use crate::store::{ContactStore, StoreError};

/// Default read and write capacity units for provisioned tables
pub const DEFAULT_CAPACITY_UNITS: i64 = 5;

/// Capacity profile used when a table is created
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Throughput {
    /// Fixed read/write capacity units
    Provisioned {
        /// Read capacity units
        read_capacity_units: i64,
        /// Write capacity units
        write_capacity_units: i64,
    },
    /// Pay-per-request billing
    OnDemand,
}

impl Default for Throughput {
    fn default() -> Self {
        Self::Provisioned {
            read_capacity_units: DEFAULT_CAPACITY_UNITS,
            write_capacity_units: DEFAULT_CAPACITY_UNITS,
        }
    }
}

/// Definition of a single-hash-key table
#[derive(Debug, Clone, PartialEq)]
pub struct TableSpec {
    /// Table name
    pub table_name: String,
    /// Name of the hash key attribute
    pub key_attribute: String,
    /// Scalar type of the hash key
    pub key_type: ScalarAttributeType,
    /// Capacity profile
    pub throughput: Throughput,
}

/// Outcome of [`ensure_table_exists`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum TableStatus {
    /// The table was missing and has been created
    Created,
    /// The table was already there; nothing was changed
    AlreadyExists,
}

/// Makes sure the table described by `spec` exists, creating it if absent
///
/// Idempotent: running it again against the same store finds the table and returns
/// [`TableStatus::AlreadyExists`]. A concurrent creator winning the race is reported
/// the same way.
///
/// # Errors
///
/// Returns `TableSetupError` if the table name is empty or the store fails
pub async fn ensure_table_exists(
    store: &dyn ContactStore,
    spec: &TableSpec,
) -> TableSetupResult<TableStatus> {
    if spec.table_name.trim().is_empty() {
        return Err(TableSetupError::EmptyTableName);
    }

    let table_names = store.list_table_names().await?;
    if table_names.iter().any(|name| name == &spec.table_name) {
        tracing::info!(table = %spec.table_name, "Table already exists");
        return Ok(TableStatus::AlreadyExists);
    }

    match store.create_table(spec).await {
        Ok(()) => {
            tracing::info!(table = %spec.table_name, "Table created");
            Ok(TableStatus::Created)
        }
        Err(StoreError::TableAlreadyExists(_)) => {
            tracing::info!(table = %spec.table_name, "Table created concurrently by another process");
            Ok(TableStatus::AlreadyExists)
        }
        Err(err) => Err(err.into()),
    }
}
