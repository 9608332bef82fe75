// src/handlers/product.rs
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use crate::catalog::{self, CatalogError};
use crate::dtos::product::{CatalogItemResponse, CatalogResponse, ProductSavedResponse};
use crate::handlers::upload::read_product_form;
use crate::models::{created_at, time_id};
use crate::models::product::{parse_price, Product};
use crate::state::AppState;
use crate::storage::object_key;
use crate::store::Collection;
use crate::error::AppError;
use tracing::{error, info, instrument};

// GET /products - Admin and dealer products in one list
#[instrument(skip(state))]
pub async fn list_products(State(state): State<AppState>) -> Result<Json<CatalogResponse>, AppError> {
    match catalog::list_catalog(state.store(), &state.config.tables).await {
        Ok(items) => Ok(Json(CatalogResponse { success: true, items })),
        Err(e) => {
            error!(?e, "Failed to fetch products");
            Err(AppError::store("Failed to fetch products")(e))
        }
    }
}

// GET /products/{id} - Single product, admin table first
#[instrument(skip(state))]
pub async fn get_product(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<CatalogItemResponse>, AppError> {
    let product = catalog::get_product_by_id(state.store(), &state.config.tables, &id)
        .await
        .map_err(|e| match e {
            CatalogError::NotFound(_) => AppError::not_found("Product not found"),
            CatalogError::Store(e) => AppError::store("Failed to fetch product")(e),
        })?;

    Ok(Json(CatalogItemResponse { success: true, product }))
}

// POST /admin/products - Multipart create with image
#[instrument(skip(state, multipart))]
pub async fn create_admin_product(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ProductSavedResponse<Product>>), AppError> {
    let mut form = read_product_form(multipart, state.config.max_image_bytes).await?;

    let (Some(name), Some(raw_price)) = (form.required("name"), form.required("price")) else {
        return Err(AppError::validation("Product name and price are required."));
    };
    let price = parse_price(&raw_price)?;
    let description = form.optional("description").unwrap_or_default();
    let category = form.optional("category").unwrap_or_default();
    let brand = form.optional("brand").unwrap_or_default();
    let image = form
        .image
        .take()
        .ok_or_else(|| AppError::validation("Product image is required."))?;

    let now = Utc::now();
    let key = object_key("products/", now.timestamp_millis(), &image.file_name);
    // Not removed again if the put below fails
    let image_url = state
        .images
        .upload(&state.config.buckets.products, &key, image.content_type.as_deref(), image.bytes)
        .await?;

    let product = Product {
        product_id: time_id(now),
        dealer_id: None,
        name: Some(name),
        price: Some(price),
        description: Some(description),
        category: Some(category),
        brand: Some(brand),
        image_url: Some(image_url),
        created_at: Some(created_at(now)),
    };

    state
        .store()
        .put(Collection::Products.table_name(&state.config.tables), product.clone().into_item()?)
        .await
        .map_err(AppError::store("Failed to add product."))?;

    info!(product_id = %product.product_id, "Admin product added");
    Ok((
        StatusCode::CREATED,
        Json(ProductSavedResponse {
            success: true,
            message: "Product added successfully",
            product,
        }),
    ))
}
