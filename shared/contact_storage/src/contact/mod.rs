//! Contact record service
//!
//! Inserts, lists and deletes contacts in a single table keyed by `id`.

mod error;

use std::sync::Arc;

use aws_sdk_dynamodb::types::{AttributeValue, ScalarAttributeType};
pub use error::{ContactStorageError, ContactStorageResult};
use serde::{Deserialize, Serialize};
use serde_dynamo::{from_items, to_item};
use strum::Display;

use crate::store::{ContactStore, StoreError};
use crate::table::{TableSpec, Throughput};

/// Contact record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Primary key - unique contact ID (UUID v4)
    pub id: String,
    /// Caller supplied name, stored as-is
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// Attribute names for the contacts table
#[derive(Debug, Clone, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ContactAttribute {
    /// Primary key
    Id,
    /// Username
    Username,
}

/// Builds the table definition for a contacts table named `table_name`
#[must_use]
pub fn contacts_table_spec(table_name: &str, throughput: Throughput) -> TableSpec {
    TableSpec {
        table_name: table_name.to_string(),
        key_attribute: ContactAttribute::Id.to_string(),
        key_type: ScalarAttributeType::S,
        throughput,
    }
}

/// Storage client for contact operations
///
/// Holds no mutable state; the store handle is shared between all requests.
pub struct ContactStorage {
    store: Arc<dyn ContactStore>,
    table_name: String,
}

impl ContactStorage {
    /// Creates a new storage instance
    ///
    /// # Arguments
    ///
    /// * `store` - Backing key-value store
    /// * `table_name` - Name of the contacts table
    #[must_use]
    pub fn new(store: Arc<dyn ContactStore>, table_name: String) -> Self {
        Self { store, table_name }
    }

    /// Name of the table this service reads and writes
    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Inserts a new contact under a freshly generated UUID
    ///
    /// The username is not validated. Inserting the same username twice yields two
    /// contacts with different ids.
    ///
    /// # Errors
    ///
    /// Returns `ContactStorageError` if the put operation fails
    pub async fn insert(&self, username: Option<String>) -> ContactStorageResult<Contact> {
        let contact = Contact {
            id: uuid::Uuid::new_v4().to_string(),
            username,
        };

        let item = to_item(&contact)?;
        self.store.put_item(&self.table_name, item).await?;

        Ok(contact)
    }

    /// Returns every contact in the table, in no particular order
    ///
    /// # Errors
    ///
    /// Returns `ContactStorageError` if the scan fails or an item cannot be parsed
    pub async fn list_all(&self) -> ContactStorageResult<Vec<Contact>> {
        let items = self.store.scan_items(&self.table_name).await?;
        let contacts = from_items::<_, Contact>(items)?;

        Ok(contacts)
    }

    /// Deletes the contact with the given id
    ///
    /// Existence is checked by the store atomically with the delete.
    ///
    /// # Errors
    ///
    /// Returns `ContactStorageError::NotFound` if no contact has this id, or
    /// `ContactStorageError::Store` for any other store failure
    pub async fn delete(&self, id: &str) -> ContactStorageResult<()> {
        self.store
            .delete_item_if_exists(
                &self.table_name,
                &ContactAttribute::Id.to_string(),
                AttributeValue::S(id.to_string()),
            )
            .await
            .map_err(|err| match err {
                StoreError::ConditionFailed => ContactStorageError::NotFound(id.to_string()),
                other => other.into(),
            })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Item;

    #[test]
    fn test_contact_serialization() {
        let contact = Contact {
            id: "test-id".to_string(),
            username: Some("alice".to_string()),
        };

        let json = serde_json::to_value(&contact).unwrap();

        assert_eq!(json, serde_json::json!({"id": "test-id", "username": "alice"}));
    }

    #[test]
    fn test_contact_without_username() {
        let contact = Contact {
            id: "test-id".to_string(),
            username: None,
        };

        let item: Item = to_item(&contact).unwrap();
        let json = serde_json::to_value(&contact).unwrap();

        assert!(!item.contains_key("username"));
        assert!(json.get("username").is_none());
    }

    #[test]
    fn test_contacts_table_spec() {
        let spec = contacts_table_spec("Contacts", Throughput::OnDemand);

        assert_eq!(spec.table_name, "Contacts");
        assert_eq!(spec.key_attribute, "id");
        assert_eq!(spec.key_type, ScalarAttributeType::S);
        assert_eq!(spec.throughput, Throughput::OnDemand);
    }
}
