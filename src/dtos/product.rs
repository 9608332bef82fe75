// src/dtos/product.rs
use serde::Serialize;
use serde_json::Value;

use crate::store::Item;

/// Client-facing projection shared by admin and vendor products.
///
/// Values are copied from the stored document as they are, whatever their type.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct CatalogEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
}

impl CatalogEntry {
    /// Renames `productId` and `imageUrl`; every other field is cloned unchanged.
    pub fn from_item(item: &Item) -> Self {
        let field = |name: &str| item.get(name).cloned();
        Self {
            id: field("productId"),
            name: field("name"),
            price: field("price"),
            image: field("imageUrl"),
            category: field("category"),
            brand: field("brand"),
            description: field("description"),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub success: bool,
    pub items: Vec<CatalogEntry>,
}

#[derive(Debug, Serialize)]
pub struct CatalogItemResponse {
    pub success: bool,
    pub product: CatalogEntry,
}

/// Returned after a create or update; echoes the stored document.
#[derive(Debug, Serialize)]
pub struct ProductSavedResponse<T> {
    pub success: bool,
    pub message: &'static str,
    pub product: T,
}

#[derive(Debug, Serialize)]
pub struct DealerProductsResponse {
    pub success: bool,
    pub products: Vec<Item>,
}
