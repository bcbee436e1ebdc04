//! Route definitions for the Stockroom inventory API

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Login (public)
        .route("/login/access-token", post(handlers::login_access_token))
        .nest("/users", user_routes())
        .nest("/items", item_routes())
        .nest("/warehouses", warehouse_routes())
        .nest("/stores", store_routes())
}

/// User account routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::create_user))
        .route("/me", get(handlers::read_user_me))
}

/// Item catalog routes; `total-units` is public
fn item_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_items).post(handlers::create_item))
        .route("/total-units", get(handlers::total_units))
        .route(
            "/:item_id",
            get(handlers::get_item)
                .put(handlers::update_item)
                .delete(handlers::delete_item),
        )
}

/// Warehouse routes; `items-per-warehouse` is public
fn warehouse_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_warehouses).post(handlers::create_warehouse),
        )
        .route("/items-per-warehouse", get(handlers::items_per_warehouse))
        .route(
            "/:warehouse_id",
            get(handlers::get_warehouse)
                .put(handlers::update_warehouse)
                .delete(handlers::delete_warehouse),
        )
        .route("/:warehouse_id/receive", post(handlers::receive_item))
        .route("/:warehouse_id/ship", post(handlers::ship_item))
}

/// Store routes; `items-per-store` and `revenues` are public
fn store_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_stores).post(handlers::create_store))
        .route("/items-per-store", get(handlers::items_per_store))
        .route("/revenues", get(handlers::store_revenues))
        .route(
            "/:store_id",
            get(handlers::get_store)
                .put(handlers::update_store)
                .delete(handlers::delete_store),
        )
        .route("/:store_id/purchase", post(handlers::purchase_item))
}
