use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post, put},
    Router,
};
use crate::handlers::dealer::{
    create_dealer_product, delete_dealer_product, get_dealer, list_dealer_products, login_dealer,
    register_dealer, update_dealer_product,
};
use crate::middleware::auth::require_dealer;
use crate::routes::upload_body_limit;
use crate::state::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    let dealer_only = || middleware::from_fn_with_state(state.clone(), require_dealer);

    Router::new()
        .route("/dealers", post(register_dealer))
        .route("/dealers/login", post(login_dealer))
        .route("/dealers/{dealer_id}", get(get_dealer))
        .route(
            "/dealer/products",
            post(create_dealer_product)
                .layer(DefaultBodyLimit::max(upload_body_limit(state)))
                .route_layer(dealer_only()),
        )
        // GET takes a dealer id, PUT and DELETE a product id
        .route(
            "/dealer/products/{id}",
            get(list_dealer_products).merge(
                put(update_dealer_product)
                    .delete(delete_dealer_product)
                    .route_layer(dealer_only()),
            ),
        )
}
