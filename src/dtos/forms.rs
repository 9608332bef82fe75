use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::store::Item;

#[derive(Deserialize)]
pub struct ContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessOrderRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub selected_products: Option<Value>,
    pub shipping_address: Option<Value>,
    pub billing_address: Option<Value>,
    pub total: Option<Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyRequest {
    pub product_name: Option<String>,
    pub rating: Option<Value>,
    pub feedback: Option<String>,
}

#[derive(Deserialize)]
pub struct MediaQueryRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub query: Option<String>,
}

/// Acknowledges a stored form submission and echoes the stored document.
#[derive(Serialize)]
pub struct SubmissionResponse {
    pub success: bool,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Item>,
}
