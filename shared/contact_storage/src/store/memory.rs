//! In-memory implementation of [`ContactStore`]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, ScalarAttributeType};
use tokio::sync::RwLock;

use super::{ContactStore, Item, StoreError, StoreResult};
use crate::table::TableSpec;

struct MemoryTable {
    spec: TableSpec,
    rows: HashMap<String, Item>,
}

/// Store keeping every table in process memory
///
/// Follows `DynamoDB` semantics closely enough for the record service: keys are
/// type-checked against the table definition, conditional deletes are atomic under
/// the table lock and unknown tables are rejected.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<HashMap<String, MemoryTable>>,
    unavailable: AtomicBool,
    latency_ms: AtomicU64,
    create_table_calls: AtomicUsize,
}

impl InMemoryStore {
    /// Creates an empty store with no tables
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent operation fail with [`StoreError::Unavailable`] until reset
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Delays every subsequent operation by `latency`
    pub fn set_latency(&self, latency: Duration) {
        let millis = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
        self.latency_ms.store(millis, Ordering::SeqCst);
    }

    /// Number of successful `create_table` calls
    #[must_use]
    pub fn create_table_calls(&self) -> usize {
        self.create_table_calls.load(Ordering::SeqCst)
    }

    async fn check_available(&self) -> StoreResult<()> {
        let latency_ms = self.latency_ms.load(Ordering::SeqCst);
        if latency_ms > 0 {
            tokio::time::sleep(Duration::from_millis(latency_ms)).await;
        }

        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("in-memory store offline".to_string()));
        }
        Ok(())
    }
}

/// Encodes a key value as a map key, rejecting values that don't match the key type
fn encode_key(spec: &TableSpec, value: &AttributeValue) -> StoreResult<String> {
    match (&spec.key_type, value) {
        (ScalarAttributeType::S, AttributeValue::S(s)) if !s.is_empty() => Ok(s.clone()),
        (ScalarAttributeType::N, AttributeValue::N(n)) if n.parse::<f64>().is_ok() => {
            Ok(n.clone())
        }
        _ => Err(StoreError::InvalidKey(format!(
            "key attribute '{}' does not match type {}",
            spec.key_attribute,
            spec.key_type.as_str()
        ))),
    }
}

#[async_trait]
impl ContactStore for InMemoryStore {
    async fn put_item(&self, table_name: &str, item: Item) -> StoreResult<()> {
        self.check_available().await?;

        let mut tables = self.tables.write().await;
        let table = tables
            .get_mut(table_name)
            .ok_or_else(|| StoreError::TableNotFound(table_name.to_string()))?;

        let key_value = item.get(&table.spec.key_attribute).ok_or_else(|| {
            StoreError::InvalidKey(format!(
                "missing key attribute '{}'",
                table.spec.key_attribute
            ))
        })?;
        let key = encode_key(&table.spec, key_value)?;

        table.rows.insert(key, item);
        Ok(())
    }

    async fn scan_items(&self, table_name: &str) -> StoreResult<Vec<Item>> {
        self.check_available().await?;

        let tables = self.tables.read().await;
        let table = tables
            .get(table_name)
            .ok_or_else(|| StoreError::TableNotFound(table_name.to_string()))?;

        Ok(table.rows.values().cloned().collect())
    }

    async fn delete_item_if_exists(
        &self,
        table_name: &str,
        key_attribute: &str,
        key: AttributeValue,
    ) -> StoreResult<()> {
        self.check_available().await?;

        let mut tables = self.tables.write().await;
        let table = tables
            .get_mut(table_name)
            .ok_or_else(|| StoreError::TableNotFound(table_name.to_string()))?;

        if key_attribute != table.spec.key_attribute {
            return Err(StoreError::InvalidKey(format!(
                "'{key_attribute}' is not the key attribute of {table_name}"
            )));
        }
        let key = encode_key(&table.spec, &key)?;

        table
            .rows
            .remove(&key)
            .map(|_| ())
            .ok_or(StoreError::ConditionFailed)
    }

    async fn list_table_names(&self) -> StoreResult<Vec<String>> {
        self.check_available().await?;

        let mut names: Vec<String> = self.tables.read().await.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    async fn create_table(&self, spec: &TableSpec) -> StoreResult<()> {
        self.check_available().await?;

        let mut tables = self.tables.write().await;
        if tables.contains_key(&spec.table_name) {
            return Err(StoreError::TableAlreadyExists(spec.table_name.clone()));
        }

        tables.insert(
            spec.table_name.clone(),
            MemoryTable {
                spec: spec.clone(),
                rows: HashMap::new(),
            },
        );
        self.create_table_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Throughput;

    fn spec(table_name: &str) -> TableSpec {
        TableSpec {
            table_name: table_name.to_string(),
            key_attribute: "id".to_string(),
            key_type: ScalarAttributeType::S,
            throughput: Throughput::default(),
        }
    }

    fn item(id: &str) -> Item {
        HashMap::from([("id".to_string(), AttributeValue::S(id.to_string()))])
    }

    #[tokio::test]
    async fn test_put_into_missing_table_fails() {
        let store = InMemoryStore::new();

        let result = store.put_item("missing", item("a")).await;

        assert!(matches!(result, Err(StoreError::TableNotFound(name)) if name == "missing"));
    }

    #[tokio::test]
    async fn test_put_rejects_wrongly_typed_key() {
        let store = InMemoryStore::new();
        store.create_table(&spec("t")).await.unwrap();

        let bad = HashMap::from([("id".to_string(), AttributeValue::N("1".to_string()))]);
        let result = store.put_item("t", bad).await;

        assert!(matches!(result, Err(StoreError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn test_conditional_delete() {
        let store = InMemoryStore::new();
        store.create_table(&spec("t")).await.unwrap();
        store.put_item("t", item("a")).await.unwrap();

        store
            .delete_item_if_exists("t", "id", AttributeValue::S("a".to_string()))
            .await
            .unwrap();
        let second = store
            .delete_item_if_exists("t", "id", AttributeValue::S("a".to_string()))
            .await;

        assert!(matches!(second, Err(StoreError::ConditionFailed)));
        assert!(store.scan_items("t").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_table_twice() {
        let store = InMemoryStore::new();
        store.create_table(&spec("t")).await.unwrap();

        let second = store.create_table(&spec("t")).await;

        assert!(matches!(second, Err(StoreError::TableAlreadyExists(_))));
        assert_eq!(store.create_table_calls(), 1);
        assert_eq!(store.list_table_names().await.unwrap(), vec!["t".to_string()]);
    }

    #[tokio::test]
    async fn test_latency_delays_operations() {
        let store = InMemoryStore::new();
        store.create_table(&spec("t")).await.unwrap();
        store.set_latency(Duration::from_millis(50));

        let started = tokio::time::Instant::now();
        store.scan_items("t").await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_unavailable_store() {
        let store = InMemoryStore::new();
        store.create_table(&spec("t")).await.unwrap();
        store.set_unavailable(true);

        assert!(matches!(
            store.scan_items("t").await,
            Err(StoreError::Unavailable(_))
        ));

        store.set_unavailable(false);
        assert!(store.scan_items("t").await.unwrap().is_empty());
    }
}
