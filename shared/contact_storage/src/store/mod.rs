//! Key-value store capability used by the table initializer and the record service
//!
//! Items are plain `DynamoDB` attribute maps so the `DynamoDB` implementation stays a
//! thin wrapper around the SDK client, while [`InMemoryStore`] mirrors its semantics
//! for tests.

mod dynamodb;
mod error;
mod memory;

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;

pub use dynamodb::DynamoDbStore;
pub use error::{StoreError, StoreResult};
pub use memory::InMemoryStore;

use crate::table::TableSpec;

/// A single row, keyed by attribute name
pub type Item = HashMap<String, AttributeValue>;

/// Operations the contacts service needs from its backing store
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Writes `item`, replacing any row with the same key
    async fn put_item(&self, table_name: &str, item: Item) -> StoreResult<()>;

    /// Reads every row of the table, following pagination until exhausted
    async fn scan_items(&self, table_name: &str) -> StoreResult<Vec<Item>>;

    /// Deletes the row addressed by `key_attribute = key` only if it exists
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ConditionFailed`] when no such row exists.
    async fn delete_item_if_exists(
        &self,
        table_name: &str,
        key_attribute: &str,
        key: AttributeValue,
    ) -> StoreResult<()>;

    /// Lists the names of every table visible to this store
    async fn list_table_names(&self) -> StoreResult<Vec<String>>;

    /// Creates a table and returns once it is ready to serve reads and writes
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TableAlreadyExists`] when the name is taken.
    async fn create_table(&self, spec: &TableSpec) -> StoreResult<()>;
}
