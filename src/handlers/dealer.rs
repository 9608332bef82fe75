use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use serde_json::{Map, Value};
use tracing::{info, instrument, warn};

use crate::auth::jwt::{sign_token, Role};
use crate::dtos::dealer::{
    DealerLoginRequest, DealerLoginResponse, DealerRegisteredResponse, DealerResponse,
    RegisterDealerRequest,
};
use crate::dtos::product::{DealerProductsResponse, ProductSavedResponse};
use crate::dtos::{required, MessageResponse};
use crate::error::AppError;
use crate::extract::ApiJson;
use crate::handlers::upload::read_product_form;
use crate::middleware::auth::AuthContext;
use crate::models::product::{normalize_price, parse_price, Product};
use crate::models::{created_at, time_id};
use crate::state::AppState;
use crate::storage::object_key;
use crate::store::{Collection, Filter, Item, Key};

// POST /dealers - Dealer registration
#[instrument(skip(state, payload))]
pub async fn register_dealer(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterDealerRequest>,
) -> Result<Json<DealerRegisteredResponse>, AppError> {
    let (Some(name), Some(email), Some(phone)) = (
        required(&payload.name),
        required(&payload.email),
        required(&payload.phone),
    ) else {
        return Err(AppError::validation("Missing required fields"));
    };

    let now = Utc::now();
    let dealer_id = time_id(now);
    let mut item = Map::new();
    item.insert("dealerId".into(), Value::String(dealer_id.clone()));
    item.insert("name".into(), Value::String(name.to_string()));
    item.insert("email".into(), Value::String(email.to_lowercase()));
    item.insert("phone".into(), Value::String(phone.to_string()));
    item.insert("company".into(), Value::String(payload.company.unwrap_or_default()));
    item.insert("address".into(), Value::String(payload.address.unwrap_or_default()));
    item.insert("createdAt".into(), Value::String(created_at(now)));

    state
        .store()
        .put(Collection::Dealers.table_name(&state.config.tables), item)
        .await
        .map_err(AppError::store("Failed to register dealer"))?;

    info!(%dealer_id, "Dealer registered");
    Ok(Json(DealerRegisteredResponse {
        success: true,
        message: "Dealer registered successfully",
        dealer_id,
    }))
}

// POST /dealers/login - Email lookup, phone as the shared secret
#[instrument(skip(state, payload))]
pub async fn login_dealer(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<DealerLoginRequest>,
) -> Result<Json<DealerLoginResponse>, AppError> {
    let (Some(email), Some(phone)) = (required(&payload.email), required(&payload.phone)) else {
        return Err(AppError::validation("Email and Phone Number are required."));
    };

    let filter = Filter::eq("email", email.to_lowercase());
    let dealers = state
        .store()
        .scan(Collection::Dealers.table_name(&state.config.tables), Some(&filter))
        .await
        .map_err(AppError::store("Server error during login."))?;

    let dealer = dealers
        .first()
        .ok_or_else(|| AppError::not_found("No dealer found with that email."))?;

    if dealer.get("phone").and_then(Value::as_str).map(str::trim) != Some(phone) {
        warn!("Rejected dealer login");
        return Err(AppError::unauthorized("Invalid email or phone number."));
    }

    let dealer_id = dealer
        .get("dealerId")
        .and_then(Value::as_str)
        .ok_or_else(|| AppError::internal("Dealer record without dealerId"))?
        .to_string();
    let token = sign_token(&dealer_id, Role::Dealer, &state.config.jwt_secret)?;

    Ok(Json(DealerLoginResponse {
        success: true,
        message: "Login successful!",
        dealer_id,
        token,
    }))
}

// GET /dealers/{dealerId}
#[instrument(skip(state))]
pub async fn get_dealer(
    State(state): State<AppState>,
    Path(dealer_id): Path<String>,
) -> Result<Json<DealerResponse>, AppError> {
    let dealers = Collection::Dealers;
    let dealer = state
        .store()
        .get(dealers.table_name(&state.config.tables), &Key::new(dealers.key_attribute(), dealer_id))
        .await
        .map_err(AppError::store("Failed to fetch dealer details"))?
        .ok_or_else(|| AppError::not_found("Dealer not found"))?;

    Ok(Json(DealerResponse { success: true, dealer }))
}

// POST /dealer/products - Multipart create into the vendor table
#[instrument(skip(state, auth, multipart), fields(dealer = %auth.subject))]
pub async fn create_dealer_product(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ProductSavedResponse<Product>>), AppError> {
    let mut form = read_product_form(multipart, state.config.max_image_bytes).await?;

    let dealer_id = form.required("dealerId").unwrap_or_else(|| auth.subject.clone());
    if dealer_id != auth.subject {
        return Err(AppError::forbidden("Dealers can only add their own products."));
    }
    let (Some(name), Some(raw_price)) = (form.required("name"), form.required("price")) else {
        return Err(AppError::validation("Missing required fields."));
    };
    let price = parse_price(&raw_price)?;
    // Unlike admin products, absent text fields stay absent
    let description = form.optional("description");
    let category = form.optional("category");
    let brand = form.optional("brand");
    let image = form
        .image
        .take()
        .ok_or_else(|| AppError::validation("Missing required fields."))?;

    let now = Utc::now();
    let key = object_key("", now.timestamp_millis(), &image.file_name);
    let image_url = state
        .images
        .upload(&state.config.buckets.vendor_products, &key, image.content_type.as_deref(), image.bytes)
        .await?;

    let product = Product {
        product_id: time_id(now),
        dealer_id: Some(dealer_id),
        name: Some(name),
        price: Some(price),
        description,
        category,
        brand,
        image_url: Some(image_url),
        created_at: Some(created_at(now)),
    };

    state
        .store()
        .put(Collection::VendorProducts.table_name(&state.config.tables), product.clone().into_item()?)
        .await
        .map_err(AppError::store("Failed to upload product."))?;

    info!(product_id = %product.product_id, "Dealer product added");
    Ok((
        StatusCode::CREATED,
        Json(ProductSavedResponse {
            success: true,
            message: "Product uploaded successfully by dealer",
            product,
        }),
    ))
}

// GET /dealer/products/{dealerId}
#[instrument(skip(state))]
pub async fn list_dealer_products(
    State(state): State<AppState>,
    Path(dealer_id): Path<String>,
) -> Result<Json<DealerProductsResponse>, AppError> {
    let filter = Filter::eq("dealerId", dealer_id);
    let products = state
        .store()
        .scan(Collection::VendorProducts.table_name(&state.config.tables), Some(&filter))
        .await
        .map_err(AppError::store("Failed to fetch products."))?;

    Ok(Json(DealerProductsResponse { success: true, products }))
}

/// Loads a vendor product and checks it belongs to the calling dealer.
async fn owned_product(state: &AppState, auth: &AuthContext, product_id: &str) -> Result<Item, AppError> {
    let vendor = Collection::VendorProducts;
    let product = state
        .store()
        .get(vendor.table_name(&state.config.tables), &Key::new(vendor.key_attribute(), product_id))
        .await
        .map_err(AppError::store("Failed to fetch product."))?
        .ok_or_else(|| AppError::not_found("Product not found"))?;

    if product.get("dealerId").and_then(Value::as_str) != Some(auth.subject.as_str()) {
        return Err(AppError::forbidden("Product belongs to another dealer."));
    }
    Ok(product)
}

// PUT /dealer/products/{productId} - Replaces the document, owner and key preserved
#[instrument(skip(state, auth, body), fields(dealer = %auth.subject))]
pub async fn update_dealer_product(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(product_id): Path<String>,
    ApiJson(body): ApiJson<Value>,
) -> Result<Json<ProductSavedResponse<Item>>, AppError> {
    let Value::Object(mut item) = body else {
        return Err(AppError::validation("Request body must be a JSON object"));
    };
    if let Some(price) = item.get("price") {
        let price = normalize_price(price)?;
        item.insert("price".into(), Value::from(price));
    }

    owned_product(&state, &auth, &product_id).await?;

    item.insert("productId".into(), Value::String(product_id));
    item.insert("dealerId".into(), Value::String(auth.subject.clone()));

    state
        .store()
        .put(Collection::VendorProducts.table_name(&state.config.tables), item.clone())
        .await
        .map_err(AppError::store("Failed to update product."))?;

    Ok(Json(ProductSavedResponse {
        success: true,
        message: "Product updated successfully.",
        product: item,
    }))
}

// DELETE /dealer/products/{productId}
#[instrument(skip(state, auth), fields(dealer = %auth.subject))]
pub async fn delete_dealer_product(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(product_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    owned_product(&state, &auth, &product_id).await?;

    let vendor = Collection::VendorProducts;
    state
        .store()
        .delete(vendor.table_name(&state.config.tables), &Key::new(vendor.key_attribute(), product_id))
        .await
        .map_err(AppError::store("Failed to delete product."))?;

    Ok(Json(MessageResponse::ok("Product deleted successfully.")))
}
