//! Reporting service for the dashboard aggregates
//! Units per item, units and value per location, revenue and profit per store

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use shared::{ItemTotals, ItemUnits, StoreInventory, StoreRevenue, WarehouseInventory};

use crate::error::AppResult;
use crate::ledger::{Ledger, SharedLedger};

/// Reporting service
#[derive(Clone)]
pub struct ReportingService {
    ledger: SharedLedger,
}

impl ReportingService {
    pub fn new(ledger: SharedLedger) -> Self {
        Self { ledger }
    }

    /// Total units per item across all warehouses and stores, ordered by item id
    pub async fn units_per_item(&self) -> AppResult<Vec<ItemUnits>> {
        let ledger = self.ledger.read().await;

        let mut totals: BTreeMap<i64, i64> = BTreeMap::new();
        for (&(_, item_id), &quantity) in ledger
            .warehouse_stock
            .iter()
            .chain(ledger.store_stock.iter())
        {
            let total = totals.entry(item_id).or_insert(0);
            *total = total.saturating_add(quantity);
        }

        Ok(totals
            .into_iter()
            .filter_map(|(item_id, total_units)| {
                ledger.items.get(&item_id).map(|item| ItemUnits {
                    item_id,
                    title: item.title.clone(),
                    total_units,
                })
            })
            .collect())
    }

    /// Units and value per item at every warehouse
    pub async fn items_per_warehouse(&self) -> AppResult<Vec<WarehouseInventory>> {
        let ledger = self.ledger.read().await;
        Ok(ledger
            .warehouses
            .iter()
            .map(|(&warehouse_id, name)| WarehouseInventory {
                name: name.clone(),
                warehouse_id,
                items: item_totals(&ledger, &ledger.warehouse_stock, warehouse_id),
            })
            .collect())
    }

    /// Units and value per item at every store
    pub async fn items_per_store(&self) -> AppResult<Vec<StoreInventory>> {
        let ledger = self.ledger.read().await;
        Ok(ledger
            .stores
            .iter()
            .map(|(&store_id, name)| StoreInventory {
                name: name.clone(),
                store_id,
                items: item_totals(&ledger, &ledger.store_stock, store_id),
            })
            .collect())
    }

    /// Revenue, cost and profit of every store's purchases at current prices
    pub async fn store_revenues(&self) -> AppResult<Vec<StoreRevenue>> {
        let ledger = self.ledger.read().await;

        let mut sums: BTreeMap<i64, (Decimal, Decimal)> = BTreeMap::new();
        for purchase in &ledger.purchases {
            let Some(item) = ledger.items.get(&purchase.item_id) else {
                continue;
            };
            let units = Decimal::from(purchase.quantity);
            let entry = sums
                .entry(purchase.store_id)
                .or_insert((Decimal::ZERO, Decimal::ZERO));
            entry.0 = entry.0.saturating_add(units.saturating_mul(item.retail_price));
            entry.1 = entry.1.saturating_add(units.saturating_mul(item.wholesale_price));
        }

        Ok(ledger
            .stores
            .iter()
            .map(|(&store_id, name)| {
                let (total_revenue, total_cost) = sums
                    .get(&store_id)
                    .copied()
                    .unwrap_or((Decimal::ZERO, Decimal::ZERO));
                StoreRevenue {
                    store: name.clone(),
                    store_id,
                    total_revenue,
                    total_cost,
                    total_profit: total_revenue.saturating_sub(total_cost),
                }
            })
            .collect())
    }
}

fn item_totals(
    ledger: &Ledger,
    stock: &BTreeMap<(i64, i64), i64>,
    location_id: i64,
) -> Vec<ItemTotals> {
    stock
        .range((location_id, i64::MIN)..=(location_id, i64::MAX))
        .filter_map(|(&(_, item_id), &quantity)| {
            ledger
                .items
                .get(&item_id)
                .map(|item| ItemTotals::from_quantity(item.clone(), quantity))
        })
        .collect()
}
