use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;

use crate::dynamodb::{Attributes, StoreError, Table, TableInfo};

/// Gateway to the key-value store.
///
/// Each method is a single round-trip with no retries of its own; whatever the
/// underlying client does (timeouts, SDK retry policy) is all there is. Items
/// cross this boundary in store-native form so that codec failures stay
/// separate from store failures.
#[async_trait]
pub trait Store: Send + Sync {
    /// Table names in the order the service returns them.
    async fn list_tables(&self) -> Result<Vec<String>, StoreError>;

    async fn describe_table(&self, table_name: &str) -> Result<TableInfo, StoreError>;

    async fn create_table(&self, table: &Table<'_>) -> Result<(), StoreError>;

    /// Looks up a single item by its hash key. A missing item is `Ok(None)`.
    async fn get_item(
        &self,
        table_name: &str,
        key_attribute: &str,
        key_value: AttributeValue,
    ) -> Result<Option<Attributes>, StoreError>;

    /// Writes an item, replacing any item with the same primary key.
    async fn put_item(&self, table_name: &str, item: Attributes) -> Result<(), StoreError>;
}
