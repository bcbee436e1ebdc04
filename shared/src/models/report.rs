//! Aggregate rows returned by the reporting endpoints
//!
//! These are read-only projections over the ledger at query time. They are
//! shaped for direct charting and are never written back.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Item;

/// Total units of one item across every warehouse and store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemUnits {
    pub item_id: i64,
    pub title: String,
    pub total_units: i64,
}

/// Per-item totals at a single location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemTotals {
    #[serde(rename = "Item")]
    pub item: Item,
    pub total_units: i64,
    pub total_wholesale_value: Decimal,
    pub total_retail_value: Decimal,
}

impl ItemTotals {
    /// Build totals for `quantity` units of `item` at its current prices.
    /// Values beyond the `Decimal` range saturate.
    pub fn from_quantity(item: Item, quantity: i64) -> Self {
        let units = Decimal::from(quantity);
        Self {
            total_wholesale_value: units.saturating_mul(item.wholesale_price),
            total_retail_value: units.saturating_mul(item.retail_price),
            total_units: quantity,
            item,
        }
    }

    /// Read the numeric field named by `key`
    pub fn value(&self, key: ValueKey) -> Decimal {
        match key {
            ValueKey::TotalUnits => Decimal::from(self.total_units),
            ValueKey::TotalWholesaleValue => self.total_wholesale_value,
            ValueKey::TotalRetailValue => self.total_retail_value,
        }
    }
}

/// Numeric fields of [`ItemTotals`] that a chart can pivot on
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ValueKey {
    TotalUnits,
    TotalWholesaleValue,
    TotalRetailValue,
}

impl ValueKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKey::TotalUnits => "total_units",
            ValueKey::TotalWholesaleValue => "total_wholesale_value",
            ValueKey::TotalRetailValue => "total_retail_value",
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown value key: {0}")]
pub struct ValueKeyError(pub String);

impl std::str::FromStr for ValueKey {
    type Err = ValueKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "total_units" => Ok(ValueKey::TotalUnits),
            "total_wholesale_value" => Ok(ValueKey::TotalWholesaleValue),
            "total_retail_value" => Ok(ValueKey::TotalRetailValue),
            other => Err(ValueKeyError(other.to_string())),
        }
    }
}

/// A location row with its nested per-item totals
pub trait Location {
    fn name(&self) -> &str;
    fn items(&self) -> &[ItemTotals];
}

/// Units and value per item at one warehouse
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WarehouseInventory {
    pub name: String,
    pub warehouse_id: i64,
    pub items: Vec<ItemTotals>,
}

impl Location for WarehouseInventory {
    fn name(&self) -> &str {
        &self.name
    }

    fn items(&self) -> &[ItemTotals] {
        &self.items
    }
}

/// Units and value per item at one store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreInventory {
    pub name: String,
    pub store_id: i64,
    pub items: Vec<ItemTotals>,
}

impl Location for StoreInventory {
    fn name(&self) -> &str {
        &self.name
    }

    fn items(&self) -> &[ItemTotals] {
        &self.items
    }
}

/// Revenue and profit from all purchases recorded at a store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreRevenue {
    pub store: String,
    pub store_id: i64,
    pub total_revenue: Decimal,
    pub total_cost: Decimal,
    pub total_profit: Decimal,
}

impl StoreRevenue {
    /// Read a numeric field by its wire name (`total_revenue`, `total_cost`, `total_profit`)
    pub fn field(&self, name: &str) -> Option<Decimal> {
        match name {
            "total_revenue" => Some(self.total_revenue),
            "total_cost" => Some(self.total_cost),
            "total_profit" => Some(self.total_profit),
            _ => None,
        }
    }
}
