//! Public catalog assembled from the admin and vendor product tables.
//!
//! The two tables are independent: ids are unique per table only, and the two scans in
//! [`list_catalog`] are not snapshot-consistent with each other.

use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::TableNames;
use crate::dtos::product::CatalogEntry;
use crate::store::{Collection, DocumentStore, Item, Key, StoreError};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("product {0} not found")]
    NotFound(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSource {
    Admin,
    Vendor,
}

impl ProductSource {
    fn collection(self) -> Collection {
        match self {
            ProductSource::Admin => Collection::Products,
            ProductSource::Vendor => Collection::VendorProducts,
        }
    }
}

/// Lookup order for [`find_product`]. The admin table shadows the vendor table.
const LOOKUP_ORDER: [ProductSource; 2] = [ProductSource::Admin, ProductSource::Vendor];

/// Every admin product followed by every vendor product, each in scan order.
#[instrument(skip(store, tables))]
pub async fn list_catalog(
    store: &dyn DocumentStore,
    tables: &TableNames,
) -> Result<Vec<CatalogEntry>, StoreError> {
    let (admin, vendor) = tokio::try_join!(
        store.scan(Collection::Products.table_name(tables), None),
        store.scan(Collection::VendorProducts.table_name(tables), None),
    )?;
    debug!(admin = admin.len(), vendor = vendor.len(), "Fetched product tables");

    Ok(admin
        .iter()
        .chain(vendor.iter())
        .map(CatalogEntry::from_item)
        .collect())
}

/// Looks `id` up in the admin table, then in the vendor table only on a miss.
pub async fn find_product(
    store: &dyn DocumentStore,
    tables: &TableNames,
    id: &str,
) -> Result<Option<(ProductSource, Item)>, StoreError> {
    for source in LOOKUP_ORDER {
        let collection = source.collection();
        let key = Key::new(collection.key_attribute(), id);
        if let Some(item) = store.get(collection.table_name(tables), &key).await? {
            return Ok(Some((source, item)));
        }
    }
    Ok(None)
}

#[instrument(skip(store, tables))]
pub async fn get_product_by_id(
    store: &dyn DocumentStore,
    tables: &TableNames,
    id: &str,
) -> Result<CatalogEntry, CatalogError> {
    match find_product(store, tables, id).await? {
        Some((source, item)) => {
            debug!(?source, "Resolved product");
            Ok(CatalogEntry::from_item(&item))
        }
        None => Err(CatalogError::NotFound(id.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use crate::store::testing::{RecordingStore, StoreCall};
    use serde_json::json;

    #[tokio::test]
    async fn lists_admin_products_before_vendor_products() {
        let config = test_config();
        let t = &config.tables;
        let store = RecordingStore::new(t);
        store.seed(&t.product, json!({"productId": "a1", "name": "Milk", "price": 2.5, "imageUrl": "u1"})).await;
        store.seed(&t.product, json!({"productId": "a2", "name": "Curd"})).await;
        store.seed(&t.vendor_product, json!({"productId": "v1", "dealerId": "d1", "name": "Cheese"})).await;

        let items = list_catalog(&store, t).await.unwrap();

        let ids: Vec<_> = items.iter().map(|e| e.id.clone().unwrap()).collect();
        assert_eq!(ids, [json!("a1"), json!("a2"), json!("v1")]);
        assert_eq!(items[0].image, Some(json!("u1")));
        assert_eq!(items[0].price, Some(json!(2.5)));
    }

    #[tokio::test]
    async fn duplicate_ids_across_tables_are_kept() {
        let config = test_config();
        let t = &config.tables;
        let store = RecordingStore::new(t);
        store.seed(&t.product, json!({"productId": "same", "name": "Admin"})).await;
        store.seed(&t.vendor_product, json!({"productId": "same", "name": "Vendor"})).await;

        let items = list_catalog(&store, t).await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, Some(json!("Admin")));
        assert_eq!(items[1].name, Some(json!("Vendor")));
    }

    #[tokio::test]
    async fn empty_tables_give_an_empty_catalog() {
        let config = test_config();
        let store = RecordingStore::new(&config.tables);
        assert!(list_catalog(&store, &config.tables).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn one_failing_scan_fails_the_listing() {
        let config = test_config();
        let t = &config.tables;
        let store = RecordingStore::new(t);
        store.seed(&t.product, json!({"productId": "a1"})).await;
        store.fail_table(&t.vendor_product);

        assert!(list_catalog(&store, t).await.is_err());
    }

    #[tokio::test]
    async fn missing_optional_fields_stay_absent_in_json() {
        let config = test_config();
        let t = &config.tables;
        let store = RecordingStore::new(t);
        store.seed(&t.vendor_product, json!({"productId": "v1", "name": "Butter", "price": 3})).await;

        let items = list_catalog(&store, t).await.unwrap();
        let json = serde_json::to_value(&items[0]).unwrap();
        assert_eq!(json, json!({"id": "v1", "name": "Butter", "price": 3}));
    }

    #[tokio::test]
    async fn stored_values_pass_through_whatever_their_type() {
        let config = test_config();
        let t = &config.tables;
        let store = RecordingStore::new(t);
        store
            .seed(&t.product, json!({"productId": "a1", "name": "Milk", "price": "19.99", "brand": 7}))
            .await;

        let items = list_catalog(&store, t).await.unwrap();
        assert_eq!(
            serde_json::to_value(&items).unwrap(),
            json!([{"id": "a1", "name": "Milk", "price": "19.99", "brand": 7}])
        );

        let entry = get_product_by_id(&store, t, "a1").await.unwrap();
        assert_eq!(entry.price, Some(json!("19.99")));
        assert_eq!(entry.brand, Some(json!(7)));
    }

    #[tokio::test]
    async fn admin_product_shadows_vendor_product_with_same_id() {
        let config = test_config();
        let t = &config.tables;
        let store = RecordingStore::new(t);
        store.seed(&t.product, json!({"productId": "42", "name": "Admin"})).await;
        store.seed(&t.vendor_product, json!({"productId": "42", "name": "Vendor"})).await;

        let entry = get_product_by_id(&store, t, "42").await.unwrap();
        assert_eq!(entry.name, Some(json!("Admin")));
        // the vendor table is never consulted
        assert_eq!(store.calls().len(), 1);
    }

    #[tokio::test]
    async fn falls_back_to_vendor_table() {
        let config = test_config();
        let t = &config.tables;
        let store = RecordingStore::new(t);
        store.seed(&t.vendor_product, json!({"productId": "7", "name": "Paneer"})).await;

        let (source, item) = find_product(&store, t, "7").await.unwrap().unwrap();
        assert_eq!(source, ProductSource::Vendor);
        assert_eq!(item["name"], "Paneer");
        assert_eq!(
            store.calls(),
            vec![
                StoreCall::Get { table: t.product.clone(), key: Key::new("productId", "7") },
                StoreCall::Get { table: t.vendor_product.clone(), key: Key::new("productId", "7") },
            ]
        );
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let config = test_config();
        let store = RecordingStore::new(&config.tables);
        let err = get_product_by_id(&store, &config.tables, "nope").await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(id) if id == "nope"));
    }
}
