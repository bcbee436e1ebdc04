//! Stock transfer service: receive into a warehouse, ship to a store,
//! record a sale
//!
//! Each operation validates first and mutates last, under a single write
//! lock. A rejected transfer leaves the ledger untouched.

use chrono::Utc;
use shared::{
    has_sufficient_stock, validate_quantity, Purchase, PurchaseRequest, ReceiveRequest,
    ShipRequest, StoreItem, Warehouse,
};

use crate::error::{AppError, AppResult};
use crate::ledger::SharedLedger;

/// Service for moving stock through warehouses and stores
#[derive(Clone)]
pub struct TransferService {
    ledger: SharedLedger,
}

impl TransferService {
    pub fn new(ledger: SharedLedger) -> Self {
        Self { ledger }
    }

    /// Add `quantity` units of an item to a warehouse, creating the link if needed
    pub async fn receive(&self, warehouse_id: i64, input: ReceiveRequest) -> AppResult<Warehouse> {
        validate_quantity(input.quantity).map_err(|e| AppError::invalid_field("quantity", e))?;

        let mut ledger = self.ledger.write().await;
        if !ledger.warehouses.contains_key(&warehouse_id) {
            return Err(AppError::not_found("warehouse"));
        }
        if !ledger.items.contains_key(&input.item_id) {
            return Err(AppError::not_found("item"));
        }

        let key = (warehouse_id, input.item_id);
        let balance = add_units(
            ledger.warehouse_stock.get(&key).copied().unwrap_or(0),
            input.quantity,
        )?;
        ledger.warehouse_stock.insert(key, balance);

        tracing::info!(
            warehouse_id,
            item_id = input.item_id,
            quantity = input.quantity,
            balance,
            "Received stock into warehouse"
        );

        ledger
            .warehouse(warehouse_id)
            .ok_or_else(|| AppError::not_found("warehouse"))
    }

    /// Move `quantity` units of an item from a warehouse to a store
    pub async fn ship(&self, warehouse_id: i64, input: ShipRequest) -> AppResult<Warehouse> {
        validate_quantity(input.quantity).map_err(|e| AppError::invalid_field("quantity", e))?;

        let mut ledger = self.ledger.write().await;
        if !ledger.warehouses.contains_key(&warehouse_id) {
            return Err(AppError::not_found("warehouse"));
        }
        let available = ledger
            .warehouse_stock
            .get(&(warehouse_id, input.item_id))
            .copied()
            .ok_or_else(|| AppError::not_found("warehouse item"))?;
        if !ledger.stores.contains_key(&input.store_id) {
            return Err(AppError::not_found("store"));
        }
        if !has_sufficient_stock(available, input.quantity) {
            tracing::warn!(
                warehouse_id,
                item_id = input.item_id,
                available,
                requested = input.quantity,
                "Ship rejected: insufficient warehouse stock"
            );
            return Err(AppError::InsufficientStock(
                "Not enough items in warehouse".to_string(),
            ));
        }

        let store_key = (input.store_id, input.item_id);
        let store_balance = add_units(
            ledger.store_stock.get(&store_key).copied().unwrap_or(0),
            input.quantity,
        )?;

        // All checks passed; both sides are applied under the same lock
        ledger
            .warehouse_stock
            .insert((warehouse_id, input.item_id), available - input.quantity);
        ledger.store_stock.insert(store_key, store_balance);

        tracing::info!(
            warehouse_id,
            store_id = input.store_id,
            item_id = input.item_id,
            quantity = input.quantity,
            "Shipped stock to store"
        );

        ledger
            .warehouse(warehouse_id)
            .ok_or_else(|| AppError::not_found("warehouse"))
    }

    /// Sell `quantity` units of an item at a store and log the purchase
    pub async fn purchase(&self, store_id: i64, input: PurchaseRequest) -> AppResult<StoreItem> {
        validate_quantity(input.quantity).map_err(|e| AppError::invalid_field("quantity", e))?;

        let mut ledger = self.ledger.write().await;
        if !ledger.stores.contains_key(&store_id) {
            return Err(AppError::not_found("store"));
        }
        let available = ledger
            .store_stock
            .get(&(store_id, input.item_id))
            .copied()
            .ok_or_else(|| AppError::NotFound("Item in store".to_string()))?;
        if !has_sufficient_stock(available, input.quantity) {
            tracing::warn!(
                store_id,
                item_id = input.item_id,
                available,
                requested = input.quantity,
                "Purchase rejected: insufficient store stock"
            );
            return Err(AppError::InsufficientStock(
                "Not enough items in stock".to_string(),
            ));
        }

        let remaining = available - input.quantity;
        ledger
            .store_stock
            .insert((store_id, input.item_id), remaining);

        let purchase = Purchase {
            id: ledger.next_purchase_id(),
            store_id,
            item_id: input.item_id,
            quantity: input.quantity,
            created_at: Utc::now(),
        };
        tracing::info!(
            purchase_id = purchase.id,
            store_id,
            item_id = input.item_id,
            quantity = input.quantity,
            "Recorded purchase"
        );
        ledger.purchases.push(purchase);

        Ok(StoreItem {
            store_id,
            item_id: input.item_id,
            quantity: remaining,
        })
    }
}

/// New balance after adding `quantity` units, rejected if it would not fit
fn add_units(balance: i64, quantity: i64) -> AppResult<i64> {
    balance.checked_add(quantity).ok_or_else(|| {
        AppError::invalid_field("quantity", "Quantity exceeds the maximum stock level")
    })
}
