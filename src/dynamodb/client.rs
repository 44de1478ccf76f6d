use async_trait::async_trait;
use aws_sdk_dynamodb::{
    types::{
        AttributeDefinition, AttributeValue, KeySchemaElement, KeyType, ProvisionedThroughput,
        ScalarAttributeType,
    },
    Client,
};
use tracing::{debug, info};

use crate::dynamodb::{Attributes, Store, StoreError, Table, TableInfo};

/// DynamoDB client wrapper implementing [`Store`].
///
/// Built once at startup and shared read-only by every request. Reads are
/// eventually consistent (the service default); writes use `PutItem`'s native
/// replace semantics.
#[derive(Debug, Clone)]
pub struct DynamoDb {
    client: Client,
}

impl DynamoDb {
    /// Creates a new `DynamoDb` instance.
    pub fn new(sdk_config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
        }
    }
}

#[async_trait]
impl Store for DynamoDb {
    async fn list_tables(&self) -> Result<Vec<String>, StoreError> {
        let output = self
            .client
            .list_tables()
            .send()
            .await
            .map_err(|e| StoreError::from_sdk("ListTables", e))?;

        Ok(output.table_names().to_vec())
    }

    async fn describe_table(&self, table_name: &str) -> Result<TableInfo, StoreError> {
        let output = self
            .client
            .describe_table()
            .table_name(table_name)
            .send()
            .await
            .map_err(|e| StoreError::from_sdk("DescribeTable", e))?;

        let Some(table) = output.table() else {
            return Ok(TableInfo {
                name: table_name.to_string(),
                ..TableInfo::default()
            });
        };

        Ok(TableInfo {
            name: table.table_name().unwrap_or(table_name).to_string(),
            status: table.table_status().map(|s| s.as_str().to_string()),
            item_count: table.item_count(),
            key_schema: table
                .key_schema()
                .iter()
                .map(|k| (k.attribute_name().to_string(), k.key_type().as_str().to_string()))
                .collect(),
        })
    }

    async fn create_table(&self, table: &Table<'_>) -> Result<(), StoreError> {
        let invalid = |e: aws_sdk_dynamodb::error::BuildError| {
            StoreError::validation("CreateTable", e.to_string())
        };

        let attribute_definition = AttributeDefinition::builder()
            .attribute_name(table.partition_key())
            .attribute_type(ScalarAttributeType::S)
            .build()
            .map_err(invalid)?;

        let key_schema = KeySchemaElement::builder()
            .attribute_name(table.partition_key())
            .key_type(KeyType::Hash)
            .build()
            .map_err(invalid)?;

        let throughput = ProvisionedThroughput::builder()
            .read_capacity_units(table.capacity_units())
            .write_capacity_units(table.capacity_units())
            .build()
            .map_err(invalid)?;

        self.client
            .create_table()
            .table_name(table.name())
            .attribute_definitions(attribute_definition)
            .key_schema(key_schema)
            .provisioned_throughput(throughput)
            .send()
            .await
            .map_err(|e| StoreError::from_sdk("CreateTable", e))?;

        info!("Table '{}' created", table.name());
        Ok(())
    }

    async fn get_item(
        &self,
        table_name: &str,
        key_attribute: &str,
        key_value: AttributeValue,
    ) -> Result<Option<Attributes>, StoreError> {
        let output = self
            .client
            .get_item()
            .table_name(table_name)
            .key(key_attribute, key_value)
            .send()
            .await
            .map_err(|e| StoreError::from_sdk("GetItem", e))?;

        debug!(found = output.item.is_some(), "GetItem on '{table_name}'");
        Ok(output.item)
    }

    async fn put_item(&self, table_name: &str, item: Attributes) -> Result<(), StoreError> {
        self.client
            .put_item()
            .table_name(table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| StoreError::from_sdk("PutItem", e))?;

        debug!("Item put into '{table_name}'");
        Ok(())
    }
}
