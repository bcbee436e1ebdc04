//! In-memory inventory ledger
//!
//! Holds the catalog, the warehouse/store item links and the purchase log.
//! The whole ledger sits behind one `RwLock`: a transfer takes the write
//! lock for its entire check-then-apply sequence, so a ship either moves
//! stock at both locations or at neither.

use std::collections::BTreeMap;
use std::sync::Arc;

use shared::{Item, Purchase, Store, StoreItem, UserPublic, Warehouse, WarehouseItem};
use tokio::sync::RwLock;

pub type SharedLedger = Arc<RwLock<Ledger>>;

/// Monotonic id generator, one per table
#[derive(Debug)]
struct Sequence(i64);

impl Default for Sequence {
    fn default() -> Self {
        Sequence(1)
    }
}

impl Sequence {
    fn next(&mut self) -> i64 {
        let id = self.0;
        self.0 += 1;
        id
    }
}

/// A stored user account with its password hash
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub user: UserPublic,
    pub password_hash: String,
}

#[derive(Debug, Default)]
pub struct Ledger {
    pub(crate) items: BTreeMap<i64, Item>,
    pub(crate) warehouses: BTreeMap<i64, String>,
    pub(crate) stores: BTreeMap<i64, String>,
    /// (warehouse_id, item_id) -> quantity
    pub(crate) warehouse_stock: BTreeMap<(i64, i64), i64>,
    /// (store_id, item_id) -> quantity
    pub(crate) store_stock: BTreeMap<(i64, i64), i64>,
    pub(crate) purchases: Vec<Purchase>,
    pub(crate) users: BTreeMap<i64, UserRecord>,
    item_ids: Sequence,
    warehouse_ids: Sequence,
    store_ids: Sequence,
    purchase_ids: Sequence,
    user_ids: Sequence,
}

impl Ledger {
    pub fn shared() -> SharedLedger {
        Arc::new(RwLock::new(Ledger::default()))
    }

    pub(crate) fn next_item_id(&mut self) -> i64 {
        self.item_ids.next()
    }

    pub(crate) fn next_warehouse_id(&mut self) -> i64 {
        self.warehouse_ids.next()
    }

    pub(crate) fn next_store_id(&mut self) -> i64 {
        self.store_ids.next()
    }

    pub(crate) fn next_purchase_id(&mut self) -> i64 {
        self.purchase_ids.next()
    }

    pub(crate) fn next_user_id(&mut self) -> i64 {
        self.user_ids.next()
    }

    /// Item links of a warehouse, ordered by item id
    pub fn warehouse_links(&self, warehouse_id: i64) -> Vec<WarehouseItem> {
        links_of(&self.warehouse_stock, warehouse_id)
            .map(|(item_id, quantity)| WarehouseItem {
                warehouse_id,
                item_id,
                quantity,
            })
            .collect()
    }

    /// Item links of a store, ordered by item id
    pub fn store_links(&self, store_id: i64) -> Vec<StoreItem> {
        links_of(&self.store_stock, store_id)
            .map(|(item_id, quantity)| StoreItem {
                store_id,
                item_id,
                quantity,
            })
            .collect()
    }

    pub fn warehouse(&self, id: i64) -> Option<Warehouse> {
        self.warehouses.get(&id).map(|name| Warehouse {
            id,
            name: name.clone(),
            item_links: self.warehouse_links(id),
        })
    }

    pub fn store(&self, id: i64) -> Option<Store> {
        self.stores.get(&id).map(|name| Store {
            id,
            name: name.clone(),
            item_links: self.store_links(id),
        })
    }

    pub fn user_by_email(&self, email: &str) -> Option<&UserRecord> {
        self.users
            .values()
            .find(|record| record.user.email.eq_ignore_ascii_case(email))
    }

    /// Drop an item with every link and purchase referencing it
    pub(crate) fn remove_item(&mut self, item_id: i64) -> Option<Item> {
        let item = self.items.remove(&item_id)?;
        self.warehouse_stock.retain(|(_, i), _| *i != item_id);
        self.store_stock.retain(|(_, i), _| *i != item_id);
        self.purchases.retain(|p| p.item_id != item_id);
        Some(item)
    }

    /// Drop a warehouse with its item links
    pub(crate) fn remove_warehouse(&mut self, warehouse_id: i64) -> Option<String> {
        let name = self.warehouses.remove(&warehouse_id)?;
        self.warehouse_stock.retain(|(w, _), _| *w != warehouse_id);
        Some(name)
    }

    /// Drop a store with its item links and purchases
    pub(crate) fn remove_store(&mut self, store_id: i64) -> Option<String> {
        let name = self.stores.remove(&store_id)?;
        self.store_stock.retain(|(s, _), _| *s != store_id);
        self.purchases.retain(|p| p.store_id != store_id);
        Some(name)
    }
}

fn links_of(
    stock: &BTreeMap<(i64, i64), i64>,
    location_id: i64,
) -> impl Iterator<Item = (i64, i64)> + '_ {
    stock
        .range((location_id, i64::MIN)..=(location_id, i64::MAX))
        .map(|(&(_, item_id), &quantity)| (item_id, quantity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn item(id: i64, title: &str) -> Item {
        Item {
            id,
            title: title.to_string(),
            description: None,
            wholesale_price: Decimal::ONE,
            retail_price: Decimal::TWO,
        }
    }

    #[test]
    fn test_sequences_are_independent() {
        let mut ledger = Ledger::default();
        assert_eq!(ledger.next_item_id(), 1);
        assert_eq!(ledger.next_item_id(), 2);
        assert_eq!(ledger.next_store_id(), 1);
        assert_eq!(ledger.next_warehouse_id(), 1);
    }

    #[test]
    fn test_links_are_scoped_to_location() {
        let mut ledger = Ledger::default();
        ledger.warehouses.insert(1, "North".to_string());
        ledger.warehouses.insert(2, "South".to_string());
        ledger.warehouse_stock.insert((1, 5), 10);
        ledger.warehouse_stock.insert((1, 3), 4);
        ledger.warehouse_stock.insert((2, 5), 7);

        let north = ledger.warehouse(1).unwrap();
        assert_eq!(
            north.item_links,
            vec![
                WarehouseItem {
                    warehouse_id: 1,
                    item_id: 3,
                    quantity: 4
                },
                WarehouseItem {
                    warehouse_id: 1,
                    item_id: 5,
                    quantity: 10
                },
            ]
        );
        assert_eq!(ledger.warehouse(2).unwrap().quantity_of(5), 7);
        assert!(ledger.warehouse(3).is_none());
    }

    #[test]
    fn test_remove_item_cascades() {
        let mut ledger = Ledger::default();
        ledger.items.insert(1, item(1, "Pen"));
        ledger.items.insert(2, item(2, "Ink"));
        ledger.warehouse_stock.insert((1, 1), 3);
        ledger.store_stock.insert((1, 1), 2);
        ledger.store_stock.insert((1, 2), 6);

        assert!(ledger.remove_item(1).is_some());
        assert!(ledger.warehouse_stock.is_empty());
        assert_eq!(ledger.store_stock.len(), 1);
        assert!(ledger.remove_item(1).is_none());
    }

    #[test]
    fn test_user_lookup_ignores_case() {
        let mut ledger = Ledger::default();
        ledger.users.insert(
            1,
            UserRecord {
                user: UserPublic {
                    id: 1,
                    email: "Admin@Example.com".to_string(),
                    full_name: None,
                    is_active: true,
                    is_superuser: true,
                },
                password_hash: String::new(),
            },
        );
        assert!(ledger.user_by_email("admin@example.com").is_some());
        assert!(ledger.user_by_email("clerk@example.com").is_none());
    }
}
