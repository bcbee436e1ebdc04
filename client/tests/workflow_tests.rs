//! End-to-end transfer workflow tests
//!
//! Each test binds a fresh in-memory server on 127.0.0.1:0 and drives it
//! through the public client API:
//! - receive -> ship -> sell and the aggregates they move
//! - Error classification (validation, not found, insufficient stock, auth)
//! - Dashboard session caching and role gating

use rust_decimal::Decimal;
use shared::{
    ItemCreate, ItemUpdate, Pagination, Role, Section, TransferForm, UserCreate, WidgetData,
};
use stockroom_backend::{serve, AppState, Config};
use stockroom_client::{
    ClientError, DashboardSession, InventoryClient, TransferFormInput, TransferOutcome,
};
use tokio_test::{assert_err, assert_ok};

// ============================================================================
// Helpers
// ============================================================================

async fn spawn_server() -> String {
    let state = AppState::bootstrap(Config::for_tests()).await.unwrap();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(serve(listener, state));
    format!("http://{}", addr)
}

struct Fixture {
    base_url: String,
    admin: InventoryClient,
    item_id: i64,
    warehouse_id: i64,
    store_id: i64,
}

/// Server with one item "Pen" (wholesale 2, retail 5), one warehouse, one store
async fn fixture() -> Fixture {
    let base_url = spawn_server().await;
    let mut admin = InventoryClient::new(base_url.clone());
    admin.login("admin@example.com", "changethis").await.unwrap();

    let item = admin
        .create_item(&ItemCreate::new("Pen", Decimal::from(2), Decimal::from(5)))
        .await
        .unwrap();
    let warehouse = admin.create_warehouse("Main Warehouse").await.unwrap();
    let store = admin.create_store("Store A").await.unwrap();

    Fixture {
        base_url,
        admin,
        item_id: item.id,
        warehouse_id: warehouse.id,
        store_id: store.id,
    }
}

impl Fixture {
    async fn warehouse_units(&self) -> i64 {
        let rows = self.admin.items_per_warehouse().await.unwrap();
        rows.iter()
            .find(|row| row.warehouse_id == self.warehouse_id)
            .and_then(|row| row.items.iter().find(|t| t.item.id == self.item_id))
            .map(|t| t.total_units)
            .unwrap_or(0)
    }

    async fn store_units(&self) -> i64 {
        let rows = self.admin.items_per_store().await.unwrap();
        rows.iter()
            .find(|row| row.store_id == self.store_id)
            .and_then(|row| row.items.iter().find(|t| t.item.id == self.item_id))
            .map(|t| t.total_units)
            .unwrap_or(0)
    }

    async fn clerk(&self) -> InventoryClient {
        self.admin
            .create_user(&UserCreate {
                email: "clerk@example.com".to_string(),
                password: "password123".to_string(),
                full_name: None,
                is_active: true,
                is_superuser: false,
            })
            .await
            .unwrap();
        let mut clerk = InventoryClient::new(self.base_url.clone());
        clerk.login("clerk@example.com", "password123").await.unwrap();
        clerk
    }
}

// ============================================================================
// Transfer Operations
// ============================================================================

#[tokio::test]
async fn test_receive_raises_warehouse_units_by_exactly_q() {
    let f = fixture().await;

    for q in [0, 7, 13] {
        let before = f.warehouse_units().await;
        let warehouse = assert_ok!(f.admin.receive(f.warehouse_id, f.item_id, q).await);
        assert_eq!(warehouse.quantity_of(f.item_id), before + q);
        assert_eq!(f.warehouse_units().await, before + q);
    }
}

#[tokio::test]
async fn test_ship_moves_units_between_locations() {
    let f = fixture().await;
    assert_ok!(f.admin.receive(f.warehouse_id, f.item_id, 10).await);

    let warehouse = assert_ok!(f.admin.ship(f.warehouse_id, f.store_id, f.item_id, 4).await);
    assert_eq!(warehouse.quantity_of(f.item_id), 6);
    assert_eq!(f.warehouse_units().await, 6);
    assert_eq!(f.store_units().await, 4);
}

#[tokio::test]
async fn test_over_quantity_ship_fails_and_changes_nothing() {
    let f = fixture().await;
    assert_ok!(f.admin.receive(f.warehouse_id, f.item_id, 3).await);

    let err = assert_err!(f.admin.ship(f.warehouse_id, f.store_id, f.item_id, 4).await);
    assert!(err.is_insufficient_stock());
    assert_eq!(err.to_string(), "Not enough items in warehouse");

    assert_eq!(f.warehouse_units().await, 3);
    assert_eq!(f.store_units().await, 0);
}

#[tokio::test]
async fn test_over_quantity_sell_fails_and_changes_nothing() {
    let f = fixture().await;
    assert_ok!(f.admin.receive(f.warehouse_id, f.item_id, 5).await);
    assert_ok!(f.admin.ship(f.warehouse_id, f.store_id, f.item_id, 2).await);

    let err = assert_err!(f.admin.sell(f.store_id, f.item_id, 3).await);
    assert!(err.is_insufficient_stock());
    assert_eq!(f.store_units().await, 2);

    let revenues = f.admin.store_revenues().await.unwrap();
    assert_eq!(revenues[0].total_revenue, Decimal::ZERO);
}

#[tokio::test]
async fn test_sell_records_revenue_and_profit() {
    let f = fixture().await;
    assert_ok!(f.admin.receive(f.warehouse_id, f.item_id, 10).await);
    assert_ok!(f.admin.ship(f.warehouse_id, f.store_id, f.item_id, 8).await);

    let link = assert_ok!(f.admin.sell(f.store_id, f.item_id, 3).await);
    assert_eq!(link.quantity, 5);
    assert_ok!(f.admin.sell(f.store_id, f.item_id, 2).await);

    let revenue = &f.admin.store_revenues().await.unwrap()[0];
    assert_eq!(revenue.total_revenue, Decimal::from(25));
    assert_eq!(revenue.total_cost, Decimal::from(10));
    assert_eq!(revenue.total_profit, Decimal::from(15));
}

// ============================================================================
// Error Classification
// ============================================================================

#[tokio::test]
async fn test_negative_quantity_is_validation_error() {
    let f = fixture().await;

    let err = assert_err!(f.admin.receive(f.warehouse_id, f.item_id, -1).await);
    assert!(err.is_validation());
    match err {
        ClientError::Validation { issues, .. } => {
            assert_eq!(issues[0].to_string(), "body.quantity: Quantity cannot be negative");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(f.warehouse_units().await, 0);
}

#[tokio::test]
async fn test_unknown_ids_are_validation_errors() {
    let f = fixture().await;

    let err = assert_err!(f.admin.receive(999, f.item_id, 1).await);
    assert!(matches!(err, ClientError::NotFound(_)));
    assert!(err.is_validation());
    assert_eq!(err.to_string(), "Warehouse not found");

    let err = assert_err!(f.admin.receive(f.warehouse_id, 999, 1).await);
    assert_eq!(err.to_string(), "Item not found");

    // No link for the item yet
    let err = assert_err!(f.admin.ship(f.warehouse_id, f.store_id, f.item_id, 1).await);
    assert!(err.is_validation());
    assert!(!err.is_insufficient_stock());
}

#[tokio::test]
async fn test_transfers_need_a_superuser() {
    let f = fixture().await;

    let anonymous = InventoryClient::new(f.base_url.clone());
    let err = assert_err!(anonymous.receive(f.warehouse_id, f.item_id, 5).await);
    assert!(matches!(err, ClientError::Unauthorized(_)));

    let clerk = f.clerk().await;
    let err = assert_err!(clerk.receive(f.warehouse_id, f.item_id, 5).await);
    assert!(matches!(err, ClientError::Forbidden(_)));

    assert_eq!(f.warehouse_units().await, 0);
}

#[tokio::test]
async fn test_bad_login_is_unauthorized() {
    let base_url = spawn_server().await;
    let mut client = InventoryClient::new(base_url);

    let err = assert_err!(client.login("admin@example.com", "wrong").await);
    assert!(matches!(err, ClientError::Unauthorized(_)));
    assert!(client.token().is_none());
}

// ============================================================================
// Aggregations
// ============================================================================

#[tokio::test]
async fn test_aggregations_are_public_and_idempotent() {
    let f = fixture().await;
    assert_ok!(f.admin.receive(f.warehouse_id, f.item_id, 4).await);

    let anonymous = InventoryClient::new(f.base_url.clone());
    let first = assert_ok!(anonymous.dashboard_snapshot().await);
    let second = assert_ok!(anonymous.dashboard_snapshot().await);
    assert_eq!(first, second);

    assert_eq!(first.units_per_item.len(), 1);
    assert_eq!(first.units_per_item[0].title, "Pen");
    assert_eq!(first.units_per_item[0].total_units, 4);
}

#[tokio::test]
async fn test_catalog_listing_and_delete() {
    let f = fixture().await;
    assert_ok!(f.admin.create_warehouse("Overflow Warehouse").await);

    let page = assert_ok!(f.admin.list_warehouses(Pagination::default()).await);
    assert_eq!(page.count, 2);

    let message = assert_ok!(f.admin.delete_warehouse(f.warehouse_id).await);
    assert_eq!(message.message, "Warehouse deleted successfully");

    let err = assert_err!(f.admin.get_warehouse(f.warehouse_id).await);
    assert!(matches!(err, ClientError::NotFound(_)));
}

#[tokio::test]
async fn test_catalog_updates_flow_into_aggregates() {
    let f = fixture().await;
    assert_ok!(f.admin.receive(f.warehouse_id, f.item_id, 5).await);
    assert_ok!(f.admin.ship(f.warehouse_id, f.store_id, f.item_id, 5).await);
    assert_ok!(f.admin.sell(f.store_id, f.item_id, 2).await);

    let update = ItemUpdate {
        retail_price: Some(Decimal::from(7)),
        ..Default::default()
    };
    let item = assert_ok!(f.admin.update_item(f.item_id, &update).await);
    assert_eq!(item.title, "Pen");
    assert_eq!(item.retail_price, Decimal::from(7));

    let store = assert_ok!(f.admin.rename_store(f.store_id, "Outlet North").await);
    assert_eq!(store.name, "Outlet North");
    assert_eq!(store.quantity_of(f.item_id), 3);
    let warehouse = assert_ok!(f.admin.rename_warehouse(f.warehouse_id, "Depot").await);
    assert_eq!(warehouse.name, "Depot");

    // Revenue is priced at query time
    let revenues = assert_ok!(f.admin.store_revenues().await);
    assert_eq!(revenues[0].store, "Outlet North");
    assert_eq!(revenues[0].total_revenue, Decimal::from(14));

    let err = assert_err!(f.admin.rename_store(f.store_id, " ").await);
    assert!(matches!(err, ClientError::Validation { .. }));
    let err = assert_err!(f.admin.rename_warehouse(99, "Nowhere").await);
    assert!(matches!(err, ClientError::NotFound(_)));
}

// ============================================================================
// Dashboard Session
// ============================================================================

#[tokio::test]
async fn test_session_sections_follow_role() {
    let f = fixture().await;

    let admin = assert_ok!(DashboardSession::connect(f.admin.clone()).await);
    assert_eq!(admin.role(), Role::Admin);
    assert_eq!(
        admin.sections().into_iter().collect::<Vec<_>>(),
        vec![Section::Sales, Section::Inventory, Section::Value, Section::Admin]
    );

    let clerk = assert_ok!(DashboardSession::connect(f.clerk().await).await);
    assert_eq!(clerk.role(), Role::Regular);
    assert!(!clerk.sections().contains(&Section::Admin));
}

#[tokio::test]
async fn test_session_invalidates_only_on_success() {
    let f = fixture().await;
    let mut session = DashboardSession::new(f.admin.clone(), Role::Admin);

    assert_ok!(session.snapshot().await);
    assert!(!session.is_stale());

    // Rejected: cache kept
    assert_err!(session.ship(f.warehouse_id, f.store_id, f.item_id, 1).await);
    assert!(!session.is_stale());

    // Accepted: cache dropped, next read sees the new units
    assert_ok!(session.receive(f.warehouse_id, f.item_id, 9).await);
    assert!(session.is_stale());
    let snapshot = assert_ok!(session.snapshot().await);
    assert_eq!(snapshot.units_per_item[0].total_units, 9);
}

#[tokio::test]
async fn test_form_submission_forwards_raw_values() {
    let f = fixture().await;
    let mut session = DashboardSession::new(f.admin.clone(), Role::Admin);
    assert_ok!(session.snapshot().await);

    let input = TransferFormInput {
        location_id: f.warehouse_id.to_string(),
        item_id: f.item_id.to_string(),
        store_id: None,
        quantity: "ten".to_string(),
    };
    let err = assert_err!(session.submit(TransferForm::ReceiveWarehouse, &input).await);
    assert!(matches!(err, ClientError::Validation { .. }));
    assert!(!session.is_stale());

    // A location id that would rewrite the route never leaves the client
    let rerouted = TransferFormInput {
        location_id: format!("{}/ship", f.warehouse_id),
        quantity: "10".to_string(),
        ..input.clone()
    };
    let err = assert_err!(session.submit(TransferForm::ReceiveWarehouse, &rerouted).await);
    assert!(err.is_validation());
    assert_eq!(err.status(), Some(422));
    assert!(!session.is_stale());
    assert_eq!(f.warehouse_units().await, 0);

    let input = TransferFormInput {
        quantity: "10".to_string(),
        ..input
    };
    let outcome = assert_ok!(session.submit(TransferForm::ReceiveWarehouse, &input).await);
    match outcome {
        TransferOutcome::Warehouse(warehouse) => assert_eq!(warehouse.quantity_of(f.item_id), 10),
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert!(session.is_stale());

    let ship = TransferFormInput {
        location_id: f.warehouse_id.to_string(),
        item_id: f.item_id.to_string(),
        store_id: Some(f.store_id.to_string()),
        quantity: "4".to_string(),
    };
    assert_ok!(session.submit(TransferForm::ShipStore, &ship).await);

    let sale = TransferFormInput {
        location_id: f.store_id.to_string(),
        item_id: f.item_id.to_string(),
        store_id: None,
        quantity: "1".to_string(),
    };
    let outcome = assert_ok!(session.submit(TransferForm::RecordPurchase, &sale).await);
    assert!(matches!(outcome, TransferOutcome::StoreItem(link) if link.quantity == 3));
}

#[tokio::test]
async fn test_rendered_dashboard_pivots_live_data() {
    let f = fixture().await;
    assert_ok!(f.admin.receive(f.warehouse_id, f.item_id, 5).await);
    let second_store = assert_ok!(f.admin.create_store("Store B").await);

    let mut session = DashboardSession::new(f.admin.clone(), Role::Regular);
    let rendered = assert_ok!(session.render().await);
    assert_eq!(rendered.len(), 3);

    let inventory = rendered
        .iter()
        .find(|s| s.section == Section::Inventory)
        .unwrap();
    let storewise = inventory
        .widgets
        .iter()
        .find(|w| w.title == "Units Per Item (Storewise)")
        .unwrap();

    // Neither store holds any Pen, so there are no item columns
    match &storewise.data {
        WidgetData::StackedBar(data) => {
            assert_eq!(data.rows.len(), 2);
            assert!(data.columns.is_empty());
        }
        other => panic!("unexpected widget data: {:?}", other),
    }

    assert_ok!(f.admin.ship(f.warehouse_id, f.store_id, f.item_id, 5).await);
    let rendered = assert_ok!(session.refresh().await.map(|s| shared::render(Role::Regular, s)));
    let storewise = rendered
        .iter()
        .flat_map(|s| s.widgets.iter())
        .find(|w| w.title == "Units Per Item (Storewise)")
        .unwrap();

    let json = serde_json::to_value(&storewise.data).unwrap();
    assert_eq!(
        json["data"],
        serde_json::json!([{"store": "Store", "Pen": 5}, {"store": "Store", "Pen": 0}])
    );
    assert!(second_store.item_links.is_empty());
}
