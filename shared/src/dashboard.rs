//! Dashboard composition
//!
//! Which sections a caller sees is a pure function of their role. Admins
//! additionally get the transfer forms. This gating is display-only: the
//! API enforces its own permissions and this module is not a security
//! boundary.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::chart::{revenue_bars, stacked_bar, unit_slices, BarPoint, PieSlice, StackedBarData};
use crate::models::{
    ItemUnits, LocationKind, Role, StoreInventory, StoreRevenue, ValueKey, WarehouseInventory,
};

/// Dashboard sections, in display order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Sales,
    Inventory,
    Value,
    Admin,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Sales => "sales",
            Section::Inventory => "inventory",
            Section::Value => "value",
            Section::Admin => "admin",
        }
    }
}

/// The three transfer forms shown to admins
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TransferForm {
    ReceiveWarehouse,
    ShipStore,
    RecordPurchase,
}

/// What a widget draws and which aggregate feeds it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    /// Bar per store over a revenue field
    RevenueBar { data_key: &'static str },
    /// Pie of total units per item
    UnitsPie,
    /// Stacked bar per location, one stack segment per item title
    StackedBar {
        source: LocationKind,
        data_key: ValueKey,
    },
    Form(TransferForm),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Widget {
    pub title: &'static str,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub kind: WidgetKind,
}

impl Widget {
    const fn chart(title: &'static str, height: u32, kind: WidgetKind) -> Self {
        Self {
            title,
            width: Some(400),
            height: Some(height),
            kind,
        }
    }

    const fn form(title: &'static str, form: TransferForm) -> Self {
        Self {
            title,
            width: None,
            height: None,
            kind: WidgetKind::Form(form),
        }
    }

    /// Map the aggregates in `snapshot` into this widget's chart payload
    pub fn render(&self, snapshot: &DashboardSnapshot) -> WidgetData {
        match self.kind {
            WidgetKind::RevenueBar { data_key } => {
                WidgetData::Bar(revenue_bars(&snapshot.store_revenues, data_key))
            }
            WidgetKind::UnitsPie => WidgetData::Pie(unit_slices(&snapshot.units_per_item)),
            WidgetKind::StackedBar { source, data_key } => {
                let label = source.as_str();
                let data = match source {
                    LocationKind::Warehouse => {
                        stacked_bar(label, Some(data_key), &snapshot.items_per_warehouse)
                    }
                    LocationKind::Store => {
                        stacked_bar(label, Some(data_key), &snapshot.items_per_store)
                    }
                };
                WidgetData::StackedBar(data)
            }
            WidgetKind::Form(form) => WidgetData::Form(form),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSection {
    pub section: Section,
    pub widgets: Vec<Widget>,
}

/// Everything the read-only widgets need, fetched in one go
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DashboardSnapshot {
    pub units_per_item: Vec<ItemUnits>,
    pub items_per_warehouse: Vec<WarehouseInventory>,
    pub items_per_store: Vec<StoreInventory>,
    pub store_revenues: Vec<StoreRevenue>,
}

/// Chart payload for a single widget
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum WidgetData {
    Bar(Vec<BarPoint>),
    Pie(Vec<PieSlice>),
    StackedBar(StackedBarData),
    Form(TransferForm),
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RenderedWidget {
    pub title: &'static str,
    pub data: WidgetData,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RenderedSection {
    pub section: Section,
    pub widgets: Vec<RenderedWidget>,
}

fn read_only_sections() -> Vec<DashboardSection> {
    use LocationKind::{Store, Warehouse};
    use ValueKey::{TotalRetailValue, TotalUnits, TotalWholesaleValue};

    let stacked = |source, data_key| WidgetKind::StackedBar { source, data_key };

    vec![
        DashboardSection {
            section: Section::Sales,
            widgets: vec![
                Widget::chart(
                    "Revenue Per Store",
                    450,
                    WidgetKind::RevenueBar {
                        data_key: "total_revenue",
                    },
                ),
                Widget::chart(
                    "Profit Per Store",
                    350,
                    WidgetKind::RevenueBar {
                        data_key: "total_profit",
                    },
                ),
            ],
        },
        DashboardSection {
            section: Section::Inventory,
            widgets: vec![
                Widget::chart("Units Per Item", 350, WidgetKind::UnitsPie),
                Widget::chart("Units Per Item (Storewise)", 350, stacked(Store, TotalUnits)),
                Widget::chart("Units Per Item (Warehouse)", 350, stacked(Warehouse, TotalUnits)),
            ],
        },
        DashboardSection {
            section: Section::Value,
            widgets: vec![
                Widget::chart(
                    "Wholesale Value (Storewise)",
                    350,
                    stacked(Store, TotalWholesaleValue),
                ),
                Widget::chart("Retail Value (Storewise)", 350, stacked(Store, TotalRetailValue)),
                Widget::chart(
                    "Wholesale Value (Warehouse)",
                    350,
                    stacked(Warehouse, TotalWholesaleValue),
                ),
                Widget::chart(
                    "Retail Value (Warehouse)",
                    350,
                    stacked(Warehouse, TotalRetailValue),
                ),
            ],
        },
    ]
}

fn admin_section() -> DashboardSection {
    DashboardSection {
        section: Section::Admin,
        widgets: vec![
            Widget::form("Receive Item in Warehouse", TransferForm::ReceiveWarehouse),
            Widget::form("Ship Item to Store", TransferForm::ShipStore),
            Widget::form("Record Purchase", TransferForm::RecordPurchase),
        ],
    }
}

/// Sections and widgets visible to `role`, in display order
pub fn compose(role: Role) -> Vec<DashboardSection> {
    let mut sections = read_only_sections();
    if role.is_admin() {
        sections.push(admin_section());
    }
    sections
}

/// Section tags visible to `role`
pub fn sections(role: Role) -> BTreeSet<Section> {
    compose(role).into_iter().map(|s| s.section).collect()
}

/// Compose the dashboard for `role` and fill every widget from `snapshot`
pub fn render(role: Role, snapshot: &DashboardSnapshot) -> Vec<RenderedSection> {
    compose(role)
        .into_iter()
        .map(|section| RenderedSection {
            section: section.section,
            widgets: section
                .widgets
                .iter()
                .map(|widget| RenderedWidget {
                    title: widget.title,
                    data: widget.render(snapshot),
                })
                .collect(),
        })
        .collect()
}
