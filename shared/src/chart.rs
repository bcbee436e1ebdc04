//! Chart-ready shapes built from aggregate rows
//!
//! The stacked-bar pivot turns per-location nested item lists into flat rows
//! with one column per item title. Every row carries the full column set:
//! a location that does not stock an item gets 0 in that column, never a
//! missing key.

use std::collections::HashMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::models::{ItemUnits, Location, StoreRevenue, ValueKey};

/// Currency symbol used for money labels
pub const CURRENCY_SYMBOL: &str = "₹";

/// One pivoted row: a location label plus one value per column
#[derive(Debug, Clone, PartialEq)]
pub struct StackedRow {
    pub label: String,
    /// Aligned with [`StackedBarData::columns`]
    pub values: Vec<Decimal>,
}

/// Output of the stacked-bar pivot
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StackedBarData {
    /// Key under which each row's location label is emitted
    pub stack_label: String,
    /// Distinct item titles, in first-seen order
    pub columns: Vec<String>,
    pub rows: Vec<StackedRow>,
}

impl StackedBarData {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Value of `column` in row `row`
    pub fn value(&self, row: usize, column: &str) -> Option<Decimal> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row).and_then(|r| r.values.get(idx)).copied()
    }

    /// Flat JSON records: `{ <stack_label>: label, <title>: value, ... }`
    pub fn records(&self) -> Vec<Map<String, Value>> {
        self.rows
            .iter()
            .map(|row| {
                let mut record = Map::new();
                record.insert(self.stack_label.clone(), Value::String(row.label.clone()));
                // Item columns are written after the label, so a title equal to
                // the stack label wins.
                for (column, value) in self.columns.iter().zip(&row.values) {
                    record.insert(column.clone(), decimal_to_json(*value));
                }
                record
            })
            .collect()
    }
}

impl Serialize for StackedBarData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.records())
    }
}

/// Pivot location rows into uniform stacked-bar rows.
///
/// Yields empty data when `locations` is empty or `data_key` is unset.
pub fn stacked_bar<L: Location>(
    stack_label: &str,
    data_key: Option<ValueKey>,
    locations: &[L],
) -> StackedBarData {
    let key = match data_key {
        Some(key) if !locations.is_empty() => key,
        _ => {
            return StackedBarData {
                stack_label: stack_label.to_string(),
                ..Default::default()
            }
        }
    };

    let columns = distinct_titles(locations);
    let index: HashMap<&str, usize> = columns
        .iter()
        .enumerate()
        .map(|(i, title)| (title.as_str(), i))
        .collect();

    let rows = locations
        .iter()
        .map(|location| {
            let mut values = zero_fill(columns.len());
            for totals in location.items() {
                if let Some(&i) = index.get(totals.item.title.as_str()) {
                    values[i] = totals.value(key);
                }
            }
            StackedRow {
                label: first_word(location.name()).to_string(),
                values,
            }
        })
        .collect();

    StackedBarData {
        stack_label: stack_label.to_string(),
        columns,
        rows,
    }
}

/// Distinct item titles across every location, in first-seen order
pub fn distinct_titles<L: Location>(locations: &[L]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut titles = Vec::new();
    for location in locations {
        for totals in location.items() {
            if seen.insert(totals.item.title.as_str()) {
                titles.push(totals.item.title.clone());
            }
        }
    }
    titles
}

fn zero_fill(len: usize) -> Vec<Decimal> {
    vec![Decimal::ZERO; len]
}

/// Leading word of a location name ("Store A" -> "Store")
pub fn first_word(name: &str) -> &str {
    name.split(' ').next().unwrap_or("")
}

/// Integral decimals become JSON integers, everything else a float
pub fn decimal_to_json(value: Decimal) -> Value {
    if value.is_integer() {
        if let Some(i) = value.to_i64() {
            return Value::from(i);
        }
    }
    Value::from(value.to_f64().unwrap_or(0.0))
}

/// Money label as shown on bar charts; zero renders as an empty label
pub fn format_currency(value: Decimal) -> String {
    if value.is_zero() {
        return String::new();
    }
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    format!("{} {}", CURRENCY_SYMBOL, rounded)
}

// ============================================================================
// Bar and pie payloads
// ============================================================================

/// One bar of a per-store bar chart
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BarPoint {
    pub label: String,
    pub value: Decimal,
    pub formatted: String,
}

/// Bar chart over a revenue field (`total_revenue`, `total_profit`, ...).
/// An unknown field yields no bars.
pub fn revenue_bars(rows: &[StoreRevenue], data_key: &str) -> Vec<BarPoint> {
    rows.iter()
        .filter_map(|row| {
            let value = row.field(data_key)?;
            Some(BarPoint {
                label: row.store.clone(),
                value,
                formatted: format_currency(value),
            })
        })
        .collect()
}

/// One slice of the units-per-item pie
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PieSlice {
    pub title: String,
    pub total_units: i64,
    pub legend: String,
}

pub fn unit_slices(rows: &[ItemUnits]) -> Vec<PieSlice> {
    rows.iter()
        .map(|row| PieSlice {
            title: row.title.clone(),
            total_units: row.total_units,
            legend: format!("{} ({})", row.title, row.total_units),
        })
        .collect()
}
