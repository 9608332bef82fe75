//! Test double that records every store call and can fail selected tables.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::{DocumentStore, Filter, Item, Key, MemoryStore, StoreError};
use crate::config::TableNames;

#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    Get { table: String, key: Key },
    Put { table: String },
    Scan { table: String },
    Delete { table: String, key: Key },
    BatchDelete { table: String, keys: Vec<Key> },
}

pub struct RecordingStore {
    inner: MemoryStore,
    calls: Mutex<Vec<StoreCall>>,
    failing: Mutex<HashSet<String>>,
}

impl RecordingStore {
    pub fn new(tables: &TableNames) -> Self {
        Self {
            inner: MemoryStore::new(tables),
            calls: Mutex::new(Vec::new()),
            failing: Mutex::new(HashSet::new()),
        }
    }

    /// Seeds a document without recording a call.
    pub async fn seed(&self, table: &str, item: Value) {
        let Value::Object(item) = item else {
            panic!("seed expects a JSON object");
        };
        self.inner.put(table, item).await.unwrap();
    }

    pub fn fail_table(&self, table: &str) {
        self.failing.lock().unwrap().insert(table.to_string());
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn batch_deletes(&self) -> Vec<(String, Vec<Key>)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                StoreCall::BatchDelete { table, keys } => Some((table, keys)),
                _ => None,
            })
            .collect()
    }

    pub async fn all(&self, table: &str) -> Vec<Item> {
        self.inner.scan(table, None).await.unwrap()
    }

    fn record(&self, table: &str, call: StoreCall) -> Result<(), StoreError> {
        self.calls.lock().unwrap().push(call);
        if self.failing.lock().unwrap().contains(table) {
            return Err(StoreError::Backend(format!("injected failure on {table}")));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for RecordingStore {
    async fn get(&self, table: &str, key: &Key) -> Result<Option<Item>, StoreError> {
        self.record(table, StoreCall::Get { table: table.into(), key: key.clone() })?;
        self.inner.get(table, key).await
    }

    async fn put(&self, table: &str, item: Item) -> Result<(), StoreError> {
        self.record(table, StoreCall::Put { table: table.into() })?;
        self.inner.put(table, item).await
    }

    async fn put_if_absent(
        &self,
        table: &str,
        key_attribute: &str,
        item: Item,
    ) -> Result<(), StoreError> {
        self.record(table, StoreCall::Put { table: table.into() })?;
        self.inner.put_if_absent(table, key_attribute, item).await
    }

    async fn scan(&self, table: &str, filter: Option<&Filter>) -> Result<Vec<Item>, StoreError> {
        self.record(table, StoreCall::Scan { table: table.into() })?;
        self.inner.scan(table, filter).await
    }

    async fn delete(&self, table: &str, key: &Key) -> Result<(), StoreError> {
        self.record(table, StoreCall::Delete { table: table.into(), key: key.clone() })?;
        self.inner.delete(table, key).await
    }

    async fn batch_delete(&self, table: &str, keys: &[Key]) -> Result<(), StoreError> {
        self.record(
            table,
            StoreCall::BatchDelete { table: table.into(), keys: keys.to_vec() },
        )?;
        self.inner.batch_delete(table, keys).await
    }
}
