//! Document store abstraction.
//!
//! Records are schemaless JSON objects keyed by a single string attribute. The
//! production backend is DynamoDB; `MemoryStore` keeps ordered tables in process for
//! local runs and tests.

mod collection;
mod conversions;
mod dynamo;
mod memory;
#[cfg(test)]
pub mod testing;

pub use collection::{Collection, DEFAULT_KEY_ATTRIBUTE};
pub use dynamo::DynamoStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

/// A stored document.
pub type Item = Map<String, Value>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("item already exists")]
    AlreadyExists,
    #[error("unknown table: {0}")]
    UnknownTable(String),
    #[error("malformed item: {0}")]
    Malformed(String),
    #[error("store request failed: {0}")]
    Backend(String),
}

/// Primary key of a single document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    pub attribute: String,
    pub value: String,
}

impl Key {
    pub fn new(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            value: value.into(),
        }
    }
}

/// String equality filter applied during a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub attribute: String,
    pub equals: String,
}

impl Filter {
    pub fn eq(attribute: impl Into<String>, equals: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            equals: equals.into(),
        }
    }

    pub fn matches(&self, item: &Item) -> bool {
        item.get(&self.attribute).and_then(Value::as_str) == Some(self.equals.as_str())
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, table: &str, key: &Key) -> Result<Option<Item>, StoreError>;

    /// Inserts or replaces the document with the same key.
    async fn put(&self, table: &str, item: Item) -> Result<(), StoreError>;

    /// Inserts only when no document with `key_attribute` exists, else `AlreadyExists`.
    async fn put_if_absent(&self, table: &str, key_attribute: &str, item: Item)
        -> Result<(), StoreError>;

    /// Returns every document of the table, in the store's natural order.
    async fn scan(&self, table: &str, filter: Option<&Filter>) -> Result<Vec<Item>, StoreError>;

    async fn delete(&self, table: &str, key: &Key) -> Result<(), StoreError>;

    /// Deletes all `keys` in one request. Callers keep batches within the backend ceiling.
    async fn batch_delete(&self, table: &str, keys: &[Key]) -> Result<(), StoreError>;
}
