//! Sale records and transfer request bodies

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A customer buying `quantity` units of an item from a store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Purchase {
    pub id: i64,
    pub store_id: i64,
    pub item_id: i64,
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /warehouses/{id}/receive`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReceiveRequest {
    pub item_id: i64,
    pub quantity: i64,
}

/// Body of `POST /warehouses/{id}/ship`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShipRequest {
    pub item_id: i64,
    pub store_id: i64,
    pub quantity: i64,
}

/// Body of `POST /stores/{id}/purchase`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PurchaseRequest {
    pub item_id: i64,
    pub quantity: i64,
}
