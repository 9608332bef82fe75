use serde::Serialize;
use serde_json::Value;

use crate::error::AppError;
use crate::store::Item;

/// A product document as stored in either the admin or the vendor product table.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub product_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dealer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Product {
    pub fn into_item(self) -> Result<Item, AppError> {
        match serde_json::to_value(self) {
            Ok(Value::Object(item)) => Ok(item),
            Ok(_) => Err(AppError::internal("Product did not serialize to an object")),
            Err(e) => Err(AppError::internal(format!("Product serialization failed: {e}"))),
        }
    }
}

/// Normalizes a submitted price. The whole string must be a finite, non-negative number.
pub fn parse_price(raw: &str) -> Result<f64, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("Price is required."));
    }
    match trimmed.parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => Ok(price),
        _ => Err(AppError::validation("Invalid price.")),
    }
}

/// Same rules as [`parse_price`] for a price arriving inside a JSON document.
pub fn normalize_price(value: &Value) -> Result<f64, AppError> {
    match value {
        Value::Number(n) => match n.as_f64() {
            Some(price) if price.is_finite() && price >= 0.0 => Ok(price),
            _ => Err(AppError::validation("Invalid price format.")),
        },
        Value::String(s) => {
            parse_price(s).map_err(|_| AppError::validation("Invalid price format."))
        }
        _ => Err(AppError::validation("Invalid price format.")),
    }
}
