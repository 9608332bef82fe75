//! Public intake forms. Each submission becomes one document with a time-based `id`.

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde_json::{Map, Value};
use tracing::{info, instrument};

use crate::dtos::forms::{
    BusinessOrderRequest, ContactRequest, MediaQueryRequest, SubmissionResponse, SurveyRequest,
};
use crate::dtos::required;
use crate::error::AppError;
use crate::extract::ApiJson;
use crate::models::{created_at, time_id};
use crate::state::AppState;
use crate::store::{Collection, Item};

fn new_submission() -> Item {
    let now = Utc::now();
    let mut item = Map::new();
    item.insert("id".into(), Value::String(time_id(now)));
    item.insert("createdAt".into(), Value::String(created_at(now)));
    item
}

fn text(value: &str) -> Value {
    Value::String(value.to_string())
}

async fn save(
    state: &AppState,
    collection: Collection,
    item: Item,
    failure: &'static str,
) -> Result<(), AppError> {
    state
        .store()
        .put(collection.table_name(&state.config.tables), item)
        .await
        .map_err(AppError::store(failure))
}

// POST /contact
#[instrument(skip(state, payload))]
pub async fn submit_contact(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<ContactRequest>,
) -> Result<Json<SubmissionResponse>, AppError> {
    let (Some(name), Some(email), Some(message)) = (
        required(&payload.name),
        required(&payload.email),
        required(&payload.message),
    ) else {
        return Err(AppError::validation("Missing required fields"));
    };

    let mut item = new_submission();
    item.insert("name".into(), text(name));
    item.insert("email".into(), text(email));
    item.insert("message".into(), text(message));

    save(&state, Collection::Contacts, item.clone(), "Failed to save message").await?;
    Ok(Json(SubmissionResponse { success: true, message: "Message saved", data: Some(item) }))
}

// POST /business-orders
#[instrument(skip(state, payload))]
pub async fn submit_business_order(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<BusinessOrderRequest>,
) -> Result<Json<SubmissionResponse>, AppError> {
    let (Some(name), Some(email), Some(phone)) = (
        required(&payload.name),
        required(&payload.email),
        required(&payload.phone),
    ) else {
        return Err(AppError::validation("Missing required fields"));
    };
    let selected_products = match payload.selected_products {
        Some(Value::Null) | None => return Err(AppError::validation("Missing required fields")),
        Some(products) => products,
    };

    let mut item = new_submission();
    item.insert("name".into(), text(name));
    item.insert("email".into(), text(email));
    item.insert("phone".into(), text(phone));
    item.insert("company".into(), Value::String(payload.company.unwrap_or_default()));
    item.insert("selectedProducts".into(), selected_products);
    for (field, value) in [
        ("shippingAddress", payload.shipping_address),
        ("billingAddress", payload.billing_address),
        ("total", payload.total),
    ] {
        if let Some(value) = value {
            item.insert(field.into(), value);
        }
    }

    save(&state, Collection::BusinessOrders, item.clone(), "Failed to save business order").await?;
    info!("Business order saved");
    Ok(Json(SubmissionResponse { success: true, message: "Business order saved", data: Some(item) }))
}

// POST /product-survey
#[instrument(skip(state, payload))]
pub async fn submit_survey(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<SurveyRequest>,
) -> Result<(StatusCode, Json<SubmissionResponse>), AppError> {
    let rating = payload.rating.filter(|r| match r {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    });
    let (Some(product_name), Some(rating)) = (required(&payload.product_name), rating) else {
        return Err(AppError::validation(
            "Missing required fields: productName and rating are required.",
        ));
    };

    let mut item = new_submission();
    item.insert("productName".into(), text(product_name));
    item.insert("rating".into(), rating);
    item.insert("feedback".into(), Value::String(payload.feedback.unwrap_or_default()));

    save(&state, Collection::ProductSurveys, item, "Failed to save survey.").await?;
    Ok((
        StatusCode::CREATED,
        Json(SubmissionResponse { success: true, message: "Survey saved successfully", data: None }),
    ))
}

// POST /media-queries
#[instrument(skip(state, payload))]
pub async fn submit_media_query(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<MediaQueryRequest>,
) -> Result<Json<SubmissionResponse>, AppError> {
    let (Some(name), Some(email), Some(query)) = (
        required(&payload.name),
        required(&payload.email),
        required(&payload.query),
    ) else {
        return Err(AppError::validation("Missing required fields"));
    };

    let mut item = new_submission();
    item.insert("name".into(), text(name));
    item.insert("email".into(), text(email));
    item.insert("query".into(), text(query));

    save(&state, Collection::MediaQueries, item, "Failed to save media query").await?;
    Ok(Json(SubmissionResponse { success: true, message: "Media query saved", data: None }))
}
