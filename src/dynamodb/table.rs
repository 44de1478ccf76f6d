use tracing::info;

use crate::dynamodb::{Store, StoreError};

/// Read and write capacity units provisioned for tables created at startup.
pub const DEFAULT_CAPACITY_UNITS: i64 = 10;

/// DynamoDB table definition.
///
/// Tables created by this service have a simple primary key: a single string
/// partition (hash) key and no sort key. Every other attribute is schema-free.
///
/// # Example
///
/// ```ignore
/// let table = Table::new("leads", "passport_id");
/// ensure_table(store, &table).await?;
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Table<'a> {
    name: &'a str,
    partition_key: &'a str,
    capacity_units: i64,
}

impl<'a> Table<'a> {
    /// Creates a new `Table` with the default provisioned capacity.
    pub fn new(name: &'a str, partition_key: &'a str) -> Self {
        Self {
            name,
            partition_key,
            capacity_units: DEFAULT_CAPACITY_UNITS,
        }
    }

    /// Returns the name of the table.
    pub fn name(&self) -> &str {
        self.name
    }

    /// Returns the partition key of the table.
    pub fn partition_key(&self) -> &str {
        self.partition_key
    }

    /// Read and write capacity units, used for both.
    pub fn capacity_units(&self) -> i64 {
        self.capacity_units
    }
}

/// Description of an existing table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableInfo {
    pub name: String,
    pub status: Option<String>,
    pub item_count: Option<i64>,
    /// Key attributes as `(attribute, key type)`, e.g. `("passport_id", "HASH")`.
    pub key_schema: Vec<(String, String)>,
}

/// Creates the table unless the store already knows it.
///
/// Returns `true` when the table had to be created.
pub async fn ensure_table(store: &dyn Store, table: &Table<'_>) -> Result<bool, StoreError> {
    match store.describe_table(table.name()).await {
        Ok(description) => {
            info!(
                "Table '{}' exists (status: {:?})",
                table.name(),
                description.status
            );
            Ok(false)
        }
        Err(err) if err.is_not_found() => {
            store.create_table(table).await?;
            info!(
                "Table '{}' created with hash key '{}'",
                table.name(),
                table.partition_key()
            );
            Ok(true)
        }
        Err(err) => Err(err),
    }
}
