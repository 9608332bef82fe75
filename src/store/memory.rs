use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{Collection, DocumentStore, Filter, Item, Key, StoreError};
use crate::config::TableNames;

struct Table {
    key_attribute: &'static str,
    items: Vec<Item>,
}

impl Table {
    fn position(&self, value: &str) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.get(self.key_attribute).and_then(Value::as_str) == Some(value))
    }

    fn key_of<'a>(&self, item: &'a Item) -> Result<&'a str, StoreError> {
        item.get(self.key_attribute)
            .and_then(Value::as_str)
            .ok_or_else(|| {
                StoreError::Malformed(format!("missing string key attribute {}", self.key_attribute))
            })
    }
}

/// In-process store that keeps insertion order per table.
pub struct MemoryStore {
    tables: RwLock<HashMap<String, Table>>,
}

impl MemoryStore {
    pub fn new(names: &TableNames) -> Self {
        let tables = Collection::ALL
            .iter()
            .map(|c| {
                (
                    c.table_name(names).to_string(),
                    Table {
                        key_attribute: c.key_attribute(),
                        items: Vec::new(),
                    },
                )
            })
            .collect();
        Self {
            tables: RwLock::new(tables),
        }
    }
}

fn unknown(table: &str) -> StoreError {
    StoreError::UnknownTable(table.to_string())
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, table: &str, key: &Key) -> Result<Option<Item>, StoreError> {
        let tables = self.tables.read().await;
        let table = tables.get(table).ok_or_else(|| unknown(table))?;
        Ok(table.position(&key.value).map(|i| table.items[i].clone()))
    }

    async fn put(&self, table: &str, item: Item) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let table = tables.get_mut(table).ok_or_else(|| unknown(table))?;
        let existing = table.position(table.key_of(&item)?);
        match existing {
            Some(i) => table.items[i] = item,
            None => table.items.push(item),
        }
        Ok(())
    }

    async fn put_if_absent(
        &self,
        table: &str,
        _key_attribute: &str,
        item: Item,
    ) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let table = tables.get_mut(table).ok_or_else(|| unknown(table))?;
        if table.position(table.key_of(&item)?).is_some() {
            return Err(StoreError::AlreadyExists);
        }
        table.items.push(item);
        Ok(())
    }

    async fn scan(&self, table: &str, filter: Option<&Filter>) -> Result<Vec<Item>, StoreError> {
        let tables = self.tables.read().await;
        let table = tables.get(table).ok_or_else(|| unknown(table))?;
        Ok(table
            .items
            .iter()
            .filter(|item| filter.map_or(true, |f| f.matches(item)))
            .cloned()
            .collect())
    }

    async fn delete(&self, table: &str, key: &Key) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let table = tables.get_mut(table).ok_or_else(|| unknown(table))?;
        if let Some(i) = table.position(&key.value) {
            table.items.remove(i);
        }
        Ok(())
    }

    async fn batch_delete(&self, table: &str, keys: &[Key]) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let table = tables.get_mut(table).ok_or_else(|| unknown(table))?;
        for key in keys {
            if key.attribute != table.key_attribute {
                return Err(StoreError::Malformed(format!(
                    "key attribute {} does not match {}",
                    key.attribute, table.key_attribute
                )));
            }
        }
        let doomed: Vec<&str> = keys.iter().map(|k| k.value.as_str()).collect();
        let key_attribute = table.key_attribute;
        table.items.retain(|item| {
            let value = item.get(key_attribute).and_then(Value::as_str);
            !value.is_some_and(|v| doomed.contains(&v))
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use serde_json::json;

    fn item(value: Value) -> Item {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[tokio::test]
    async fn put_replaces_in_place_and_keeps_order() {
        let config = test_config();
        let store = MemoryStore::new(&config.tables);
        let t = &config.tables.contact;

        store.put(t, item(json!({"id": "1", "name": "a"}))).await.unwrap();
        store.put(t, item(json!({"id": "2", "name": "b"}))).await.unwrap();
        store.put(t, item(json!({"id": "1", "name": "c"}))).await.unwrap();

        let names: Vec<_> = store
            .scan(t, None)
            .await
            .unwrap()
            .iter()
            .map(|i| i["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, ["c", "b"]);
    }

    #[tokio::test]
    async fn conditional_put_rejects_duplicates() {
        let config = test_config();
        let store = MemoryStore::new(&config.tables);
        let t = &config.tables.admin;

        store
            .put_if_absent(t, "username", item(json!({"username": "ana"})))
            .await
            .unwrap();
        let err = store
            .put_if_absent(t, "username", item(json!({"username": "ana"})))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists));
    }

    #[tokio::test]
    async fn batch_delete_rejects_wrong_key_attribute() {
        let config = test_config();
        let store = MemoryStore::new(&config.tables);
        let t = &config.tables.product;
        store.put(t, item(json!({"productId": "p1"}))).await.unwrap();

        let err = store.batch_delete(t, &[Key::new("id", "p1")]).await.unwrap_err();
        assert!(matches!(err, StoreError::Malformed(_)));
        assert_eq!(store.scan(t, None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unknown_table_is_an_error() {
        let store = MemoryStore::new(&test_config().tables);
        assert!(matches!(
            store.scan("nope", None).await,
            Err(StoreError::UnknownTable(_))
        ));
    }
}
