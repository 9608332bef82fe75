use axum::{routing::post, Router};
use crate::handlers::forms::{submit_business_order, submit_contact, submit_media_query, submit_survey};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/contact", post(submit_contact))
        .route("/business-orders", post(submit_business_order))
        .route("/product-survey", post(submit_survey))
        .route("/media-queries", post(submit_media_query))
}
