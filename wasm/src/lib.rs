//! WebAssembly module for the Stockroom inventory dashboard
//!
//! Provides client-side computation for:
//! - Stacked-bar pivots over the per-location aggregates
//! - Section gating by role
//! - Rendering a whole dashboard from a fetched snapshot
//! - Currency labels for revenue bars

use rust_decimal::Decimal;
use serde::Deserialize;
use wasm_bindgen::prelude::*;

use shared::{ItemTotals, Location, Role, ValueKey};

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::log_1(&"stockroom-wasm loaded".into());
}

/// Location row as the aggregate endpoints return it; ids are ignored
#[derive(Debug, Deserialize)]
struct JsLocation {
    name: String,
    #[serde(default)]
    items: Vec<ItemTotals>,
}

impl Location for JsLocation {
    fn name(&self) -> &str {
        &self.name
    }

    fn items(&self) -> &[ItemTotals] {
        &self.items
    }
}

fn role_of(is_superuser: bool) -> Role {
    if is_superuser {
        Role::Admin
    } else {
        Role::Regular
    }
}

fn pivot(
    stack_label: &str,
    data_key: Option<&str>,
    locations_json: &str,
) -> Result<String, String> {
    let locations: Vec<JsLocation> = serde_json::from_str(locations_json)
        .map_err(|e| format!("Invalid locations JSON: {}", e))?;
    // An unknown key pivots to nothing rather than failing
    let key = data_key.and_then(|k| k.parse::<ValueKey>().ok());

    let data = shared::stacked_bar(stack_label, key, &locations);
    serde_json::to_string(&data).map_err(|e| e.to_string())
}

fn section_names(is_superuser: bool) -> Vec<&'static str> {
    shared::sections(role_of(is_superuser))
        .into_iter()
        .map(|section| section.as_str())
        .collect()
}

fn render_json(is_superuser: bool, snapshot_json: &str) -> Result<String, String> {
    let snapshot: shared::DashboardSnapshot = serde_json::from_str(snapshot_json)
        .map_err(|e| format!("Invalid snapshot JSON: {}", e))?;
    let rendered = shared::render(role_of(is_superuser), &snapshot);
    serde_json::to_string(&rendered).map_err(|e| e.to_string())
}

fn currency_label(value: f64) -> String {
    Decimal::try_from(value)
        .map(shared::format_currency)
        .unwrap_or_default()
}

/// Pivot `[{name, items: [...]}]` into flat stacked-bar rows, returned as JSON
#[wasm_bindgen]
pub fn stacked_bar_chart(
    stack_label: &str,
    data_key: Option<String>,
    locations_json: &str,
) -> Result<String, JsValue> {
    pivot(stack_label, data_key.as_deref(), locations_json).map_err(|e| JsValue::from_str(&e))
}

/// Section names visible to the caller, in display order
#[wasm_bindgen]
pub fn dashboard_sections(is_superuser: bool) -> js_sys::Array {
    section_names(is_superuser)
        .into_iter()
        .map(JsValue::from_str)
        .collect()
}

/// Render every visible section from a `DashboardSnapshot` JSON document
#[wasm_bindgen]
pub fn render_dashboard(is_superuser: bool, snapshot_json: &str) -> Result<String, JsValue> {
    render_json(is_superuser, snapshot_json).map_err(|e| JsValue::from_str(&e))
}

/// Money label for a revenue bar ("₹ 12.00", empty for zero)
#[wasm_bindgen]
pub fn format_currency(value: f64) -> String {
    currency_label(value)
}
