//! HTTP handlers for item catalog endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use axum_extra::extract::WithRejection;
use shared::{Item, ItemCreate, ItemUnits, ItemUpdate, ListResponse, Message, Pagination};

use crate::error::{AppError, AppResult};
use crate::middleware::{CurrentUser, Superuser};
use crate::services::{CatalogService, ReportingService};
use crate::AppState;

/// List catalog items
pub async fn list_items(
    State(state): State<AppState>,
    _user: CurrentUser,
    WithRejection(Query(page), _): WithRejection<Query<Pagination>, AppError>,
) -> AppResult<Json<ListResponse<Item>>> {
    let service = CatalogService::new(state.ledger);
    let items = service.list_items(page).await?;
    Ok(Json(items))
}

/// Create a catalog item
pub async fn create_item(
    State(state): State<AppState>,
    _admin: Superuser,
    WithRejection(Json(input), _): WithRejection<Json<ItemCreate>, AppError>,
) -> AppResult<Json<Item>> {
    let service = CatalogService::new(state.ledger);
    let item = service.create_item(input).await?;
    Ok(Json(item))
}

/// Get an item by id
pub async fn get_item(
    State(state): State<AppState>,
    _user: CurrentUser,
    WithRejection(Path(item_id), _): WithRejection<Path<i64>, AppError>,
) -> AppResult<Json<Item>> {
    let service = CatalogService::new(state.ledger);
    let item = service.get_item(item_id).await?;
    Ok(Json(item))
}

/// Update an item's title, description or prices
pub async fn update_item(
    State(state): State<AppState>,
    _admin: Superuser,
    WithRejection(Path(item_id), _): WithRejection<Path<i64>, AppError>,
    WithRejection(Json(input), _): WithRejection<Json<ItemUpdate>, AppError>,
) -> AppResult<Json<Item>> {
    let service = CatalogService::new(state.ledger);
    let item = service.update_item(item_id, input).await?;
    Ok(Json(item))
}

/// Delete an item with its stock links and purchases
pub async fn delete_item(
    State(state): State<AppState>,
    _admin: Superuser,
    WithRejection(Path(item_id), _): WithRejection<Path<i64>, AppError>,
) -> AppResult<Json<Message>> {
    let service = CatalogService::new(state.ledger);
    service.delete_item(item_id).await?;
    Ok(Json(Message::new("Item deleted successfully")))
}

/// Total units per item across all locations
pub async fn total_units(State(state): State<AppState>) -> AppResult<Json<Vec<ItemUnits>>> {
    let service = ReportingService::new(state.ledger);
    let rows = service.units_per_item().await?;
    Ok(Json(rows))
}
