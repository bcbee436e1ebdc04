//! HTTP handlers for warehouse endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use axum_extra::extract::WithRejection;
use shared::{
    ListResponse, LocationCreate, LocationUpdate, Message, Pagination, ReceiveRequest,
    ShipRequest, Warehouse, WarehouseInventory,
};

use crate::error::{AppError, AppResult};
use crate::middleware::Superuser;
use crate::services::{CatalogService, ReportingService, TransferService};
use crate::AppState;

/// List warehouses with their item links
pub async fn list_warehouses(
    State(state): State<AppState>,
    _admin: Superuser,
    WithRejection(Query(page), _): WithRejection<Query<Pagination>, AppError>,
) -> AppResult<Json<ListResponse<Warehouse>>> {
    let service = CatalogService::new(state.ledger);
    let warehouses = service.list_warehouses(page).await?;
    Ok(Json(warehouses))
}

/// Create a warehouse
pub async fn create_warehouse(
    State(state): State<AppState>,
    _admin: Superuser,
    WithRejection(Json(input), _): WithRejection<Json<LocationCreate>, AppError>,
) -> AppResult<Json<Warehouse>> {
    let service = CatalogService::new(state.ledger);
    let warehouse = service.create_warehouse(input).await?;
    Ok(Json(warehouse))
}

/// Get a warehouse by id
pub async fn get_warehouse(
    State(state): State<AppState>,
    _admin: Superuser,
    WithRejection(Path(warehouse_id), _): WithRejection<Path<i64>, AppError>,
) -> AppResult<Json<Warehouse>> {
    let service = CatalogService::new(state.ledger);
    let warehouse = service.get_warehouse(warehouse_id).await?;
    Ok(Json(warehouse))
}

/// Rename a warehouse
pub async fn update_warehouse(
    State(state): State<AppState>,
    _admin: Superuser,
    WithRejection(Path(warehouse_id), _): WithRejection<Path<i64>, AppError>,
    WithRejection(Json(input), _): WithRejection<Json<LocationUpdate>, AppError>,
) -> AppResult<Json<Warehouse>> {
    let service = CatalogService::new(state.ledger);
    let warehouse = service.update_warehouse(warehouse_id, input).await?;
    Ok(Json(warehouse))
}

/// Delete a warehouse with its item links
pub async fn delete_warehouse(
    State(state): State<AppState>,
    _admin: Superuser,
    WithRejection(Path(warehouse_id), _): WithRejection<Path<i64>, AppError>,
) -> AppResult<Json<Message>> {
    let service = CatalogService::new(state.ledger);
    service.delete_warehouse(warehouse_id).await?;
    Ok(Json(Message::new("Warehouse deleted successfully")))
}

/// Receive stock into a warehouse
pub async fn receive_item(
    State(state): State<AppState>,
    _admin: Superuser,
    WithRejection(Path(warehouse_id), _): WithRejection<Path<i64>, AppError>,
    WithRejection(Json(input), _): WithRejection<Json<ReceiveRequest>, AppError>,
) -> AppResult<Json<Warehouse>> {
    let service = TransferService::new(state.ledger);
    let warehouse = service.receive(warehouse_id, input).await?;
    Ok(Json(warehouse))
}

/// Ship stock from a warehouse to a store
pub async fn ship_item(
    State(state): State<AppState>,
    _admin: Superuser,
    WithRejection(Path(warehouse_id), _): WithRejection<Path<i64>, AppError>,
    WithRejection(Json(input), _): WithRejection<Json<ShipRequest>, AppError>,
) -> AppResult<Json<Warehouse>> {
    let service = TransferService::new(state.ledger);
    let warehouse = service.ship(warehouse_id, input).await?;
    Ok(Json(warehouse))
}

/// Units and value per item at every warehouse
pub async fn items_per_warehouse(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<WarehouseInventory>>> {
    let service = ReportingService::new(state.ledger);
    let rows = service.items_per_warehouse().await?;
    Ok(Json(rows))
}
