use axum::{extract::{Path, State}, http::StatusCode, Extension, Json};
use bcrypt::{hash, verify, DEFAULT_COST};
use serde_json::{Map, Value};
use tracing::{info, instrument, warn};

use crate::auth::jwt::{sign_token, Role};
use crate::dispatch::{self, DispatchError};
use crate::dtos::admin::{AddUserRequest, BatchDeleteRequest, LoginRequest, LoginResponse, LoginUser};
use crate::dtos::{required, DataResponse, MessageResponse};
use crate::error::AppError;
use crate::extract::ApiJson;
use crate::middleware::auth::AuthContext;
use crate::models::product::normalize_price;
use crate::state::AppState;
use crate::store::{Collection, Key, StoreError};

const PASSWORD_FIELD: &str = "password";

// POST /admin/login
#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let (Some(username), Some(password)) = (required(&payload.username), payload.password.as_deref().filter(|p| !p.is_empty())) else {
        return Err(AppError::validation("Username and password are required"));
    };
    let secret = &state.config.jwt_secret;

    if let Some(root) = &state.config.super_admin {
        if username == root.username && password == root.password {
            let token = sign_token(username, Role::SuperAdmin, secret)?;
            info!("Super admin logged in");
            return Ok(Json(LoginResponse {
                success: true,
                message: "Super admin login successful",
                token,
                user: LoginUser { name: "Super Admin".to_string() },
            }));
        }
    }

    let username = username.to_lowercase();
    let key = Key::new(Collection::Admins.key_attribute(), username.as_str());
    let admin = state
        .store()
        .get(Collection::Admins.table_name(&state.config.tables), &key)
        .await
        .map_err(AppError::store("Login failed"))?;

    let stored_hash = admin
        .as_ref()
        .and_then(|a| a.get(PASSWORD_FIELD))
        .and_then(Value::as_str);
    let ok = match stored_hash {
        Some(h) => verify(password, h)
            .map_err(|e| AppError::internal(format!("Password verify error: {e}")))?,
        None => false,
    };
    if !ok {
        warn!(%username, "Rejected admin login");
        return Err(AppError::unauthorized("Invalid credentials"));
    }

    let token = sign_token(&username, Role::Admin, secret)?;
    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful",
        token,
        user: LoginUser { name: username },
    }))
}

// POST /admin/add-user
#[instrument(skip(state, auth, payload), fields(by = %auth.subject, role = ?auth.role))]
pub async fn add_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ApiJson(payload): ApiJson<AddUserRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let (Some(username), Some(password)) = (required(&payload.username), payload.password.as_deref().filter(|p| !p.is_empty())) else {
        return Err(AppError::validation("Username and password are required"));
    };

    let password_hash = hash(password, DEFAULT_COST)
        .map_err(|e| AppError::internal(format!("Hash error: {e}")))?;

    let mut item = Map::new();
    item.insert("username".into(), Value::String(username.to_lowercase()));
    item.insert(PASSWORD_FIELD.into(), Value::String(password_hash));

    let admins = Collection::Admins;
    state
        .store()
        .put_if_absent(admins.table_name(&state.config.tables), admins.key_attribute(), item)
        .await
        .map_err(|e| match e {
            StoreError::AlreadyExists => AppError::conflict("Username already exists."),
            other => AppError::store("Failed to create admin user.")(other),
        })?;

    info!(%username, "Admin user created");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::ok(format!("Admin user '{username}' created."))),
    ))
}

// GET /admin/{table} - Raw table contents
#[instrument(skip(state))]
pub async fn list_records(
    State(state): State<AppState>,
    collection: Collection,
) -> Result<Json<DataResponse>, AppError> {
    let mut data = state
        .store()
        .scan(collection.table_name(&state.config.tables), None)
        .await
        .map_err(AppError::store("Failed to fetch records"))?;

    // Hashes never leave the server
    if collection == Collection::Admins {
        for admin in &mut data {
            admin.remove(PASSWORD_FIELD);
        }
    }

    Ok(Json(DataResponse { success: true, data }))
}

// DELETE /admin/{table}/{key}
#[instrument(skip(state))]
pub async fn delete_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
    collection: Collection,
) -> Result<Json<MessageResponse>, AppError> {
    let key = Key::new(collection.key_attribute(), id);
    state
        .store()
        .delete(collection.table_name(&state.config.tables), &key)
        .await
        .map_err(AppError::store("Failed to delete item."))?;

    Ok(Json(MessageResponse::ok("Item deleted successfully.")))
}

// PUT /admin/{table}/{key} - Replaces the document, key taken from the path
#[instrument(skip(state, body))]
pub async fn update_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<Value>,
    collection: Collection,
) -> Result<Json<MessageResponse>, AppError> {
    let Value::Object(mut item) = body else {
        return Err(AppError::validation("Request body must be a JSON object"));
    };

    if collection.is_product_table() {
        if let Some(price) = item.get("price") {
            let price = normalize_price(price)?;
            item.insert("price".into(), Value::from(price));
        }
    }
    item.insert(collection.key_attribute().into(), Value::String(id));

    state
        .store()
        .put(collection.table_name(&state.config.tables), item)
        .await
        .map_err(AppError::store("Failed to update item."))?;

    Ok(Json(MessageResponse::ok("Item updated successfully.")))
}

// POST /admin/batch-delete
#[instrument(skip(state, payload))]
pub async fn batch_delete(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<BatchDeleteRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let table_name = payload.table_name.unwrap_or_default();
    let ids = payload.ids.unwrap_or_default();

    let deleted = dispatch::batch_delete(state.store(), &state.config.tables, &table_name, &ids)
        .await
        .map_err(|e| match e {
            DispatchError::Validation(msg) => AppError::validation(msg),
            DispatchError::InvalidTable(_) => AppError::InvalidTable("Invalid table name specified.".into()),
            DispatchError::DeleteFailed(e) => AppError::store("Failed to delete items.")(e),
        })?;

    Ok(Json(MessageResponse::ok(format!("{deleted} items deleted successfully."))))
}
