use serde::{Deserialize, Serialize};

use crate::store::Item;

#[derive(Deserialize)]
pub struct RegisterDealerRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub address: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DealerRegisteredResponse {
    pub success: bool,
    pub message: &'static str,
    pub dealer_id: String,
}

#[derive(Deserialize)]
pub struct DealerLoginRequest {
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DealerLoginResponse {
    pub success: bool,
    pub message: &'static str,
    pub dealer_id: String,
    pub token: String,
}

#[derive(Serialize)]
pub struct DealerResponse {
    pub success: bool,
    pub dealer: Item,
}
