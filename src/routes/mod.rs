pub mod admin;
pub mod dealers;
pub mod forms;
pub mod products;

use axum::{http::Method, routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use crate::state::AppState;

pub fn create_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(products::routes())
        .merge(forms::routes())
        .merge(dealers::routes(state))
        .merge(admin::routes(state))
}

/// Room for the text fields next to the largest accepted image.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn upload_body_limit(state: &AppState) -> usize {
    state.config.max_image_bytes + FORM_OVERHEAD_BYTES
}

/// Full application: API under `/api`, health check, CORS for the storefront origin.
pub fn build_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(state.config.cors_origin.clone())
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
        ]);

    let api = create_router(&state);

    Router::new()
        .nest("/api", api)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
