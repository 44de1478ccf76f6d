//! # DynamoDB Module
//!
//! Everything that talks to, or speaks the language of, the key-value store.
//!
//! ## Components
//!
//! - `Value` / `Item`: schema-free items and their conversion to and from the
//!   SDK's attribute maps.
//! - `Store`: the gateway trait used by request handlers.
//! - `DynamoDb`: the `Store` implementation over `aws-sdk-dynamodb`.
//! - `Table` / `ensure_table`: the table bootstrapped at startup.
//! - `StoreError`: service and transport failures.
//!
//! ## Configuration
//!
//! The SDK reads credentials the usual way (`AWS_ACCESS_KEY_ID`,
//! `AWS_SECRET_ACCESS_KEY`, profiles, ...). Region and endpoint come from
//! [`crate::config::Config`], so a local DynamoDB can be targeted with
//! `DYNAMODB_ENDPOINT=http://localhost:8042`.

mod client;
mod error;
mod item;
#[cfg(test)]
mod memory;
mod store;
mod table;

pub use client::DynamoDb;
pub use error::StoreError;
pub use item::{Attributes, Item, Value};
#[cfg(test)]
pub use memory::MemoryStore;
pub use store::Store;
pub use table::{ensure_table, Table, TableInfo};
