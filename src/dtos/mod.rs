pub mod admin;
pub mod dealer;
pub mod forms;
pub mod product;

use serde::Serialize;

use crate::store::Item;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Raw documents of one table, as listed in the admin console.
#[derive(Debug, Serialize)]
pub struct DataResponse {
    pub success: bool,
    pub data: Vec<Item>,
}

/// Trimmed value of a required text field, `None` when missing or blank.
pub fn required(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
