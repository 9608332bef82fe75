use axum::{
    extract::{DefaultBodyLimit, Path, State},
    middleware,
    routing::{delete, get, post, MethodRouter},
    Router,
};
use serde_json::Value;
use crate::extract::ApiJson;
use crate::handlers::admin::{self, add_user, batch_delete, login};
use crate::handlers::product::create_admin_product;
use crate::middleware::auth::require_admin;
use crate::routes::upload_body_limit;
use crate::state::AppState;
use crate::store::Collection;

fn listing(collection: Collection) -> MethodRouter<AppState> {
    get(move |state: State<AppState>| admin::list_records(state, collection))
}

fn deletion(collection: Collection) -> MethodRouter<AppState> {
    delete(move |state: State<AppState>, id: Path<String>| {
        admin::delete_record(state, id, collection)
    })
}

fn editable(collection: Collection) -> MethodRouter<AppState> {
    deletion(collection).put(
        move |state: State<AppState>, id: Path<String>, body: ApiJson<Value>| {
            admin::update_record(state, id, body, collection)
        },
    )
}

pub fn routes(state: &AppState) -> Router<AppState> {
    let open = Router::new()
        .route("/admin/login", post(login));

    let protected = Router::new()
        .route("/admin/add-user", post(add_user))
        .route("/admin/batch-delete", post(batch_delete))
        .route(
            "/admin/products",
            listing(Collection::Products).merge(
                post(create_admin_product).layer(DefaultBodyLimit::max(upload_body_limit(state))),
            ),
        )
        .route("/admin/products/{product_id}", editable(Collection::Products))
        .route("/admin/contacts", listing(Collection::Contacts))
        .route("/admin/contacts/{id}", editable(Collection::Contacts))
        .route("/admin/dealers", listing(Collection::Dealers))
        .route("/admin/dealers/{dealer_id}", editable(Collection::Dealers))
        .route("/admin/media-queries", listing(Collection::MediaQueries))
        .route("/admin/media-queries/{id}", editable(Collection::MediaQueries))
        .route("/admin/product-surveys", listing(Collection::ProductSurveys))
        .route("/admin/product-surveys/{id}", editable(Collection::ProductSurveys))
        .route("/admin/business-orders", listing(Collection::BusinessOrders))
        .route("/admin/admins", listing(Collection::Admins))
        .route("/admin/admins/{username}", deletion(Collection::Admins))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    open.merge(protected)
}
