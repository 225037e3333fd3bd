//! `DynamoDB` implementation of [`ContactStore`]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_dynamodb::{
    client::Waiters,
    error::SdkError,
    types::{
        AttributeDefinition, AttributeValue, BillingMode, KeySchemaElement, KeyType,
        ProvisionedThroughput,
    },
    Client as DynamoDbClient,
};

use super::{ContactStore, Item, StoreError, StoreResult};
use crate::table::{TableSpec, Throughput};

/// Default upper bound on waiting for a new table to become `ACTIVE`
pub const DEFAULT_TABLE_ACTIVE_TIMEOUT: Duration = Duration::from_secs(60);

/// Store backed by a `DynamoDB` client
///
/// The client is created once at startup and shared; every call is independent.
pub struct DynamoDbStore {
    dynamodb_client: Arc<DynamoDbClient>,
    table_active_timeout: Duration,
}

impl DynamoDbStore {
    /// Creates a new store
    ///
    /// # Arguments
    ///
    /// * `dynamodb_client` - Pre-configured `DynamoDB` client
    #[must_use]
    pub const fn new(dynamodb_client: Arc<DynamoDbClient>) -> Self {
        Self {
            dynamodb_client,
            table_active_timeout: DEFAULT_TABLE_ACTIVE_TIMEOUT,
        }
    }

    /// Sets how long `create_table` waits for the table to become `ACTIVE`
    #[must_use]
    pub const fn with_table_active_timeout(mut self, timeout: Duration) -> Self {
        self.table_active_timeout = timeout;
        self
    }

    /// Blocks until `table_name` is `ACTIVE` or the timeout elapses
    async fn wait_until_active(&self, table_name: &str) -> StoreResult<()> {
        self.dynamodb_client
            .wait_until_table_exists()
            .table_name(table_name)
            .wait(self.table_active_timeout)
            .await
            .map_err(|err| StoreError::TableNotActive {
                table_name: table_name.to_string(),
                reason: format!("{err:?}"),
            })?;

        Ok(())
    }
}

#[async_trait]
impl ContactStore for DynamoDbStore {
    async fn put_item(&self, table_name: &str, item: Item) -> StoreResult<()> {
        self.dynamodb_client
            .put_item()
            .table_name(table_name)
            .set_item(Some(item))
            .send()
            .await?;

        Ok(())
    }

    async fn scan_items(&self, table_name: &str) -> StoreResult<Vec<Item>> {
        let mut items = Vec::new();
        let mut exclusive_start_key = None;

        loop {
            let response = self
                .dynamodb_client
                .scan()
                .table_name(table_name)
                .set_exclusive_start_key(exclusive_start_key)
                .send()
                .await?;

            items.extend(response.items.unwrap_or_default());

            match response.last_evaluated_key {
                Some(key) if !key.is_empty() => exclusive_start_key = Some(key),
                _ => break,
            }
        }

        Ok(items)
    }

    async fn delete_item_if_exists(
        &self,
        table_name: &str,
        key_attribute: &str,
        key: AttributeValue,
    ) -> StoreResult<()> {
        self.dynamodb_client
            .delete_item()
            .table_name(table_name)
            .key(key_attribute, key)
            .condition_expression("attribute_exists(#pk)")
            .expression_attribute_names("#pk", key_attribute)
            .send()
            .await
            .map_err(|err| {
                if matches!(
                    err,
                    SdkError::ServiceError(ref svc) if svc.err().is_conditional_check_failed_exception()
                ) {
                    StoreError::ConditionFailed
                } else {
                    err.into()
                }
            })?;

        Ok(())
    }

    async fn list_table_names(&self) -> StoreResult<Vec<String>> {
        let mut table_names = Vec::new();
        let mut exclusive_start_table_name = None;

        loop {
            let response = self
                .dynamodb_client
                .list_tables()
                .set_exclusive_start_table_name(exclusive_start_table_name)
                .send()
                .await?;

            table_names.extend(response.table_names.unwrap_or_default());

            match response.last_evaluated_table_name {
                Some(name) => exclusive_start_table_name = Some(name),
                None => break,
            }
        }

        Ok(table_names)
    }

    async fn create_table(&self, spec: &TableSpec) -> StoreResult<()> {
        let mut request = self
            .dynamodb_client
            .create_table()
            .table_name(&spec.table_name)
            .key_schema(
                KeySchemaElement::builder()
                    .attribute_name(&spec.key_attribute)
                    .key_type(KeyType::Hash)
                    .build()?,
            )
            .attribute_definitions(
                AttributeDefinition::builder()
                    .attribute_name(&spec.key_attribute)
                    .attribute_type(spec.key_type.clone())
                    .build()?,
            );

        request = match spec.throughput {
            Throughput::Provisioned {
                read_capacity_units,
                write_capacity_units,
            } => request.billing_mode(BillingMode::Provisioned).provisioned_throughput(
                ProvisionedThroughput::builder()
                    .read_capacity_units(read_capacity_units)
                    .write_capacity_units(write_capacity_units)
                    .build()?,
            ),
            Throughput::OnDemand => request.billing_mode(BillingMode::PayPerRequest),
        };

        let created = request.send().await.map_err(|err| {
            if matches!(
                err,
                SdkError::ServiceError(ref svc) if svc.err().is_resource_in_use_exception()
            ) {
                StoreError::TableAlreadyExists(spec.table_name.clone())
            } else {
                err.into()
            }
        });

        // CreateTable returns while the table is still CREATING, whoever created it
        match created {
            Ok(_) => self.wait_until_active(&spec.table_name).await,
            Err(StoreError::TableAlreadyExists(table_name)) => {
                self.wait_until_active(&table_name).await?;
                Err(StoreError::TableAlreadyExists(table_name))
            }
            Err(err) => Err(err),
        }
    }
}
