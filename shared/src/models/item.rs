//! Item catalog models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A catalog entry. Items carry prices but no quantity of their own;
/// stock lives on warehouse and store item links.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    pub id: i64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub wholesale_price: Decimal,
    pub retail_price: Decimal,
}

/// Input for creating a catalog item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCreate {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub wholesale_price: Decimal,
    #[serde(default)]
    pub retail_price: Decimal,
}

impl ItemCreate {
    pub fn new(title: impl Into<String>, wholesale_price: Decimal, retail_price: Decimal) -> Self {
        Self {
            title: title.into(),
            description: None,
            wholesale_price,
            retail_price,
        }
    }
}

/// Partial update of a catalog item; absent fields are left as they are
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wholesale_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retail_price: Option<Decimal>,
}
