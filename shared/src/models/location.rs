//! Warehouse and store models
//!
//! Warehouses and stores are both "locations": named entities holding a
//! ledger of item links, each link recording how many units of one item
//! are physically present there.

use serde::{Deserialize, Serialize};

/// The two kinds of location holding stock
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum LocationKind {
    Warehouse,
    Store,
}

impl LocationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationKind::Warehouse => "warehouse",
            LocationKind::Store => "store",
        }
    }
}

impl std::fmt::Display for LocationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Units of one item held at a warehouse. Unique per (warehouse_id, item_id).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WarehouseItem {
    pub warehouse_id: i64,
    pub item_id: i64,
    pub quantity: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Warehouse {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub item_links: Vec<WarehouseItem>,
}

impl Warehouse {
    /// Quantity of an item at this warehouse, zero when there is no link
    pub fn quantity_of(&self, item_id: i64) -> i64 {
        self.item_links
            .iter()
            .find(|link| link.item_id == item_id)
            .map(|link| link.quantity)
            .unwrap_or(0)
    }
}

/// Units of one item held at a store. Unique per (store_id, item_id).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreItem {
    pub store_id: i64,
    pub item_id: i64,
    pub quantity: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Store {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub item_links: Vec<StoreItem>,
}

impl Store {
    /// Quantity of an item at this store, zero when there is no link
    pub fn quantity_of(&self, item_id: i64) -> i64 {
        self.item_links
            .iter()
            .find(|link| link.item_id == item_id)
            .map(|link| link.quantity)
            .unwrap_or(0)
    }
}

/// Input for creating a warehouse or store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationCreate {
    pub name: String,
}

impl LocationCreate {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Partial update of a warehouse or store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_of_missing_link_is_zero() {
        let warehouse = Warehouse {
            id: 1,
            name: "North Depot".to_string(),
            item_links: vec![WarehouseItem {
                warehouse_id: 1,
                item_id: 7,
                quantity: 12,
            }],
        };

        assert_eq!(warehouse.quantity_of(7), 12);
        assert_eq!(warehouse.quantity_of(8), 0);
    }

    #[test]
    fn test_location_without_links_deserializes() {
        let store: Store = serde_json::from_str(r#"{"id": 3, "name": "Store A"}"#).unwrap();
        assert!(store.item_links.is_empty());
        assert_eq!(store.quantity_of(1), 0);
    }
}
