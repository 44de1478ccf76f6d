//! In-memory [`Store`] for tests.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use tokio::sync::RwLock;

use crate::dynamodb::{Attributes, Store, StoreError, Table, TableInfo};

#[derive(Debug, Default)]
struct MemoryTable {
    partition_key: String,
    items: Vec<Attributes>,
}

impl MemoryTable {
    fn position(&self, key_value: &AttributeValue) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.get(&self.partition_key) == Some(key_value))
    }
}

/// Store backed by a map of tables, mirroring DynamoDB's error codes for
/// unknown tables and items without their key attribute.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<BTreeMap<String, MemoryTable>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an empty table. Only usable before the store is shared.
    pub fn with_table(self, name: &str, partition_key: &str) -> Self {
        if let Ok(mut tables) = self.tables.try_write() {
            tables.insert(
                name.to_string(),
                MemoryTable {
                    partition_key: partition_key.to_string(),
                    items: Vec::new(),
                },
            );
        }
        self
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_tables(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.tables.read().await.keys().cloned().collect())
    }

    async fn describe_table(&self, table_name: &str) -> Result<TableInfo, StoreError> {
        let tables = self.tables.read().await;
        let table = tables
            .get(table_name)
            .ok_or_else(|| StoreError::not_found("DescribeTable", table_name))?;

        Ok(TableInfo {
            name: table_name.to_string(),
            status: Some("ACTIVE".to_string()),
            item_count: Some(table.items.len() as i64),
            key_schema: vec![(table.partition_key.clone(), "HASH".to_string())],
        })
    }

    async fn create_table(&self, table: &Table<'_>) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if tables.contains_key(table.name()) {
            return Err(StoreError::service(
                "CreateTable",
                "ResourceInUseException",
                format!("Table already exists: {}", table.name()),
            ));
        }
        tables.insert(
            table.name().to_string(),
            MemoryTable {
                partition_key: table.partition_key().to_string(),
                items: Vec::new(),
            },
        );
        Ok(())
    }

    async fn get_item(
        &self,
        table_name: &str,
        key_attribute: &str,
        key_value: AttributeValue,
    ) -> Result<Option<Attributes>, StoreError> {
        let tables = self.tables.read().await;
        let table = tables
            .get(table_name)
            .ok_or_else(|| StoreError::not_found("GetItem", table_name))?;

        if key_attribute != table.partition_key {
            return Err(StoreError::validation(
                "GetItem",
                "The provided key element does not match the schema",
            ));
        }

        Ok(table.position(&key_value).map(|i| table.items[i].clone()))
    }

    async fn put_item(&self, table_name: &str, item: Attributes) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let table = tables
            .get_mut(table_name)
            .ok_or_else(|| StoreError::not_found("PutItem", table_name))?;

        let Some(key_value) = item.get(&table.partition_key).cloned() else {
            return Err(StoreError::validation(
                "PutItem",
                format!(
                    "One of the required keys was not given a value: missing {}",
                    table.partition_key
                ),
            ));
        };

        match table.position(&key_value) {
            Some(i) => table.items[i] = item,
            None => table.items.push(item),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamodb::Item;

    fn lead(id: &str, name: &str) -> Attributes {
        Item::new()
            .set_string("passport_id", id)
            .set_string("name", name)
            .to_attributes()
            .unwrap()
    }

    #[tokio::test]
    async fn put_replaces_items_with_the_same_key() {
        let store = MemoryStore::new().with_table("leads", "passport_id");

        store.put_item("leads", lead("X123", "Ana")).await.unwrap();
        store.put_item("leads", lead("X123", "Eva")).await.unwrap();

        let key = AttributeValue::S("X123".to_string());
        let item = store.get_item("leads", "passport_id", key).await.unwrap().unwrap();
        assert_eq!(item["name"], AttributeValue::S("Eva".to_string()));
        assert_eq!(store.describe_table("leads").await.unwrap().item_count, Some(1));
    }

    #[tokio::test]
    async fn missing_key_is_empty_not_an_error() {
        let store = MemoryStore::new().with_table("leads", "passport_id");
        let key = AttributeValue::S("NOPE".to_string());
        assert!(store.get_item("leads", "passport_id", key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn rejects_items_without_key_attribute() {
        let store = MemoryStore::new().with_table("leads", "passport_id");
        let item = Item::new().set_string("name", "Ana").to_attributes().unwrap();

        let err = store.put_item("leads", item).await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn unknown_tables_are_not_found() {
        let store = MemoryStore::new();
        let err = store.put_item("ghost", lead("X1", "Ana")).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
