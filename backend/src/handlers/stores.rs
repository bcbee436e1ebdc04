//! HTTP handlers for store endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use axum_extra::extract::WithRejection;
use shared::{
    ListResponse, LocationCreate, LocationUpdate, Message, Pagination, PurchaseRequest, Store,
    StoreInventory, StoreItem, StoreRevenue,
};

use crate::error::{AppError, AppResult};
use crate::middleware::{CurrentUser, Superuser};
use crate::services::{CatalogService, ReportingService, TransferService};
use crate::AppState;

/// List stores with their item links
pub async fn list_stores(
    State(state): State<AppState>,
    _admin: Superuser,
    WithRejection(Query(page), _): WithRejection<Query<Pagination>, AppError>,
) -> AppResult<Json<ListResponse<Store>>> {
    let service = CatalogService::new(state.ledger);
    let stores = service.list_stores(page).await?;
    Ok(Json(stores))
}

/// Create a store
pub async fn create_store(
    State(state): State<AppState>,
    _admin: Superuser,
    WithRejection(Json(input), _): WithRejection<Json<LocationCreate>, AppError>,
) -> AppResult<Json<Store>> {
    let service = CatalogService::new(state.ledger);
    let store = service.create_store(input).await?;
    Ok(Json(store))
}

/// Get a store by id
pub async fn get_store(
    State(state): State<AppState>,
    _user: CurrentUser,
    WithRejection(Path(store_id), _): WithRejection<Path<i64>, AppError>,
) -> AppResult<Json<Store>> {
    let service = CatalogService::new(state.ledger);
    let store = service.get_store(store_id).await?;
    Ok(Json(store))
}

/// Rename a store
pub async fn update_store(
    State(state): State<AppState>,
    _admin: Superuser,
    WithRejection(Path(store_id), _): WithRejection<Path<i64>, AppError>,
    WithRejection(Json(input), _): WithRejection<Json<LocationUpdate>, AppError>,
) -> AppResult<Json<Store>> {
    let service = CatalogService::new(state.ledger);
    let store = service.update_store(store_id, input).await?;
    Ok(Json(store))
}

/// Delete a store with its item links and purchases
pub async fn delete_store(
    State(state): State<AppState>,
    _admin: Superuser,
    WithRejection(Path(store_id), _): WithRejection<Path<i64>, AppError>,
) -> AppResult<Json<Message>> {
    let service = CatalogService::new(state.ledger);
    service.delete_store(store_id).await?;
    Ok(Json(Message::new("Store deleted successfully")))
}

/// Record a sale at a store
pub async fn purchase_item(
    State(state): State<AppState>,
    _admin: Superuser,
    WithRejection(Path(store_id), _): WithRejection<Path<i64>, AppError>,
    WithRejection(Json(input), _): WithRejection<Json<PurchaseRequest>, AppError>,
) -> AppResult<Json<StoreItem>> {
    let service = TransferService::new(state.ledger);
    let link = service.purchase(store_id, input).await?;
    Ok(Json(link))
}

/// Units and value per item at every store
pub async fn items_per_store(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<StoreInventory>>> {
    let service = ReportingService::new(state.ledger);
    let rows = service.items_per_store().await?;
    Ok(Json(rows))
}

/// Revenue, cost and profit per store
pub async fn store_revenues(State(state): State<AppState>) -> AppResult<Json<Vec<StoreRevenue>>> {
    let service = ReportingService::new(state.ledger);
    let rows = service.store_revenues().await?;
    Ok(Json(rows))
}
