//! Admin batch delete: a display name picks the physical table and its key attribute.

use thiserror::Error;
use tracing::{info, instrument};

use crate::config::TableNames;
use crate::store::{Collection, DocumentStore, Key, StoreError, DEFAULT_KEY_ATTRIBUTE};

/// DynamoDB accepts at most 25 write requests per `BatchWriteItem`.
pub const BATCH_WRITE_LIMIT: usize = 25;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("{0}")]
    Validation(&'static str),
    #[error("invalid table name: {0}")]
    InvalidTable(String),
    #[error("batch delete failed: {0}")]
    DeleteFailed(#[source] StoreError),
}

/// Tables the admin console may batch delete from, by display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalTable {
    Products,
    Dealers,
    Admins,
    ContactMessages,
    MediaQueries,
    ProductSurveys,
}

impl LogicalTable {
    pub fn from_display_name(name: &str) -> Option<Self> {
        match name {
            "Products" => Some(LogicalTable::Products),
            "Dealers" => Some(LogicalTable::Dealers),
            "Admins" => Some(LogicalTable::Admins),
            "Contact Messages" => Some(LogicalTable::ContactMessages),
            "Media Queries" => Some(LogicalTable::MediaQueries),
            "Product Surveys" => Some(LogicalTable::ProductSurveys),
            _ => None,
        }
    }

    pub fn collection(self) -> Collection {
        match self {
            LogicalTable::Products => Collection::Products,
            LogicalTable::Dealers => Collection::Dealers,
            LogicalTable::Admins => Collection::Admins,
            LogicalTable::ContactMessages => Collection::Contacts,
            LogicalTable::MediaQueries => Collection::MediaQueries,
            LogicalTable::ProductSurveys => Collection::ProductSurveys,
        }
    }
}

/// Key attribute for a display name. Names without an explicit entry use `id`.
pub fn primary_key_attribute(display_name: &str) -> &'static str {
    match display_name {
        "Products" | "vendorproduct" => "productId",
        "Admins" => "username",
        "Dealers" => "dealerId",
        _ => DEFAULT_KEY_ATTRIBUTE,
    }
}

/// Deletes `ids` from the table behind `display_name` and returns how many were submitted.
///
/// Ids are sent in chunks of [`BATCH_WRITE_LIMIT`]. A failing chunk stops the call; earlier
/// chunks stay deleted and the caller is not told which ones.
#[instrument(skip(store, tables, ids), fields(count = ids.len()))]
pub async fn batch_delete(
    store: &dyn DocumentStore,
    tables: &TableNames,
    display_name: &str,
    ids: &[String],
) -> Result<usize, DispatchError> {
    if display_name.trim().is_empty() || ids.is_empty() {
        return Err(DispatchError::Validation(
            "Table name and a non-empty array of IDs are required.",
        ));
    }
    if ids.iter().any(|id| id.is_empty()) {
        return Err(DispatchError::Validation("IDs must be non-empty strings."));
    }

    let key_attribute = primary_key_attribute(display_name);
    let table = LogicalTable::from_display_name(display_name)
        .ok_or_else(|| DispatchError::InvalidTable(display_name.to_string()))?
        .collection()
        .table_name(tables);

    let keys: Vec<Key> = ids.iter().map(|id| Key::new(key_attribute, id.as_str())).collect();
    for chunk in keys.chunks(BATCH_WRITE_LIMIT) {
        store
            .batch_delete(table, chunk)
            .await
            .map_err(DispatchError::DeleteFailed)?;
    }

    info!(table, key_attribute, "Batch delete submitted");
    Ok(ids.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use crate::store::testing::RecordingStore;
    use serde_json::json;

    fn ids(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn products_resolve_to_product_id() {
        let config = test_config();
        let t = &config.tables;
        let store = RecordingStore::new(t);
        store.seed(&t.product, json!({"productId": "p1"})).await;
        store.seed(&t.product, json!({"productId": "p2"})).await;
        store.seed(&t.product, json!({"productId": "p3"})).await;

        let deleted = batch_delete(&store, t, "Products", &ids(&["p1", "p2"])).await.unwrap();

        assert_eq!(deleted, 2);
        let batches = store.batch_deletes();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].0, t.product);
        assert_eq!(
            batches[0].1,
            vec![Key::new("productId", "p1"), Key::new("productId", "p2")]
        );
        let left = store.all(&t.product).await;
        assert_eq!(left.len(), 1);
        assert_eq!(left[0]["productId"], "p3");
    }

    #[tokio::test]
    async fn contact_messages_use_default_id_key() {
        let config = test_config();
        let t = &config.tables;
        let store = RecordingStore::new(t);

        batch_delete(&store, t, "Contact Messages", &ids(&["c1"])).await.unwrap();

        let batches = store.batch_deletes();
        assert_eq!(batches, vec![(t.contact.clone(), vec![Key::new("id", "c1")])]);
    }

    #[tokio::test]
    async fn unknown_table_fails_without_store_call() {
        let config = test_config();
        let store = RecordingStore::new(&config.tables);

        let err = batch_delete(&store, &config.tables, "NotARealTable", &ids(&["x"]))
            .await
            .unwrap_err();

        assert!(matches!(err, DispatchError::InvalidTable(name) if name == "NotARealTable"));
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn key_only_names_are_still_invalid_tables() {
        let config = test_config();
        let store = RecordingStore::new(&config.tables);

        let err = batch_delete(&store, &config.tables, "vendorproduct", &ids(&["x"]))
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::InvalidTable(_)));
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn empty_id_list_is_rejected_before_the_store() {
        let config = test_config();
        let store = RecordingStore::new(&config.tables);

        let err = batch_delete(&store, &config.tables, "Products", &[]).await.unwrap_err();
        assert!(matches!(err, DispatchError::Validation(_)));
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn large_batches_are_chunked() {
        let config = test_config();
        let t = &config.tables;
        let store = RecordingStore::new(t);
        let many: Vec<String> = (0..60).map(|i| format!("d{i}")).collect();

        let deleted = batch_delete(&store, t, "Dealers", &many).await.unwrap();

        assert_eq!(deleted, 60);
        let sizes: Vec<usize> = store.batch_deletes().iter().map(|(_, k)| k.len()).collect();
        assert_eq!(sizes, [25, 25, 10]);
        assert!(store
            .batch_deletes()
            .iter()
            .all(|(_, keys)| keys.iter().all(|k| k.attribute == "dealerId")));
    }

    #[tokio::test]
    async fn store_failure_is_delete_failed() {
        let config = test_config();
        let t = &config.tables;
        let store = RecordingStore::new(t);
        store.fail_table(&t.admin);

        let err = batch_delete(&store, t, "Admins", &ids(&["root"])).await.unwrap_err();
        assert!(matches!(err, DispatchError::DeleteFailed(_)));
    }

    #[test]
    fn key_map_defaults_to_id() {
        assert_eq!(primary_key_attribute("Products"), "productId");
        assert_eq!(primary_key_attribute("vendorproduct"), "productId");
        assert_eq!(primary_key_attribute("Admins"), "username");
        assert_eq!(primary_key_attribute("Dealers"), "dealerId");
        assert_eq!(primary_key_attribute("Media Queries"), "id");
        assert_eq!(primary_key_attribute("anything else"), "id");
    }

    #[test]
    fn logical_tables_agree_with_collection_keys() {
        for name in [
            "Products",
            "Dealers",
            "Admins",
            "Contact Messages",
            "Media Queries",
            "Product Surveys",
        ] {
            let table = LogicalTable::from_display_name(name).unwrap();
            assert_eq!(table.collection().key_attribute(), primary_key_attribute(name));
        }
    }
}
