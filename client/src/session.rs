//! Dashboard session
//!
//! Owns a client, the caller's role and the last fetched aggregate
//! snapshot. A successful transfer drops the snapshot so the next render
//! refetches; a failed one leaves it untouched, since nothing changed
//! server-side.

use std::collections::BTreeSet;

use serde_json::{Map, Value};
use shared::{
    render, sections, DashboardSnapshot, LocSegment, RenderedSection, Role, Section, StoreItem,
    TransferForm, ValidationIssue, Warehouse,
};

use crate::api::InventoryClient;
use crate::error::{ClientError, ClientResult};

/// Raw values typed into a transfer form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferFormInput {
    /// Warehouse id for receive/ship, store id for a purchase
    pub location_id: String,
    pub item_id: String,
    /// Destination store, ship only
    pub store_id: Option<String>,
    pub quantity: String,
}

/// What a submitted transfer form returns
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferOutcome {
    Warehouse(Warehouse),
    StoreItem(StoreItem),
}

pub struct DashboardSession {
    client: InventoryClient,
    role: Role,
    snapshot: Option<DashboardSnapshot>,
}

impl DashboardSession {
    pub fn new(client: InventoryClient, role: Role) -> Self {
        Self {
            client,
            role,
            snapshot: None,
        }
    }

    /// Start a session for whoever the client's token belongs to
    pub async fn connect(client: InventoryClient) -> ClientResult<Self> {
        let user = client.me().await?;
        let role = Role::from(&user);
        tracing::info!(user_id = user.id, ?role, "Dashboard session started");
        Ok(Self::new(client, role))
    }

    pub fn client(&self) -> &InventoryClient {
        &self.client
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn sections(&self) -> BTreeSet<Section> {
        sections(self.role)
    }

    /// True when the next read will hit the server
    pub fn is_stale(&self) -> bool {
        self.snapshot.is_none()
    }

    /// Cached aggregates, fetched on first use and after each transfer
    pub async fn snapshot(&mut self) -> ClientResult<&DashboardSnapshot> {
        let snapshot = match self.snapshot.take() {
            Some(snapshot) => snapshot,
            None => self.client.dashboard_snapshot().await?,
        };
        let snapshot: &DashboardSnapshot = self.snapshot.insert(snapshot);
        Ok(snapshot)
    }

    /// Drop the cache and fetch again
    pub async fn refresh(&mut self) -> ClientResult<&DashboardSnapshot> {
        self.snapshot = None;
        self.snapshot().await
    }

    /// Every visible section with its widgets filled in
    pub async fn render(&mut self) -> ClientResult<Vec<RenderedSection>> {
        let role = self.role;
        let snapshot = self.snapshot().await?;
        Ok(render(role, snapshot))
    }

    // ========================================================================
    // Transfers
    // ========================================================================

    pub async fn receive(
        &mut self,
        warehouse_id: i64,
        item_id: i64,
        quantity: i64,
    ) -> ClientResult<Warehouse> {
        let result = self.client.receive(warehouse_id, item_id, quantity).await;
        self.settle("receive", result)
    }

    pub async fn ship(
        &mut self,
        warehouse_id: i64,
        store_id: i64,
        item_id: i64,
        quantity: i64,
    ) -> ClientResult<Warehouse> {
        let result = self
            .client
            .ship(warehouse_id, store_id, item_id, quantity)
            .await;
        self.settle("ship", result)
    }

    pub async fn sell(
        &mut self,
        store_id: i64,
        item_id: i64,
        quantity: i64,
    ) -> ClientResult<StoreItem> {
        let result = self.client.sell(store_id, item_id, quantity).await;
        self.settle("sell", result)
    }

    /// Submit one of the admin transfer forms with the values as typed.
    /// Numeric body fields are sent as numbers; anything else is sent as
    /// text and left for the server to reject. The location id becomes part
    /// of the URL, so it must be an integer.
    pub async fn submit(
        &mut self,
        form: TransferForm,
        input: &TransferFormInput,
    ) -> ClientResult<TransferOutcome> {
        let mut body = Map::new();
        body.insert("item_id".to_string(), form_value(&input.item_id));
        body.insert("quantity".to_string(), form_value(&input.quantity));
        if let Some(store_id) = &input.store_id {
            body.insert("store_id".to_string(), form_value(store_id));
        }
        let body = Value::Object(body);
        let location = match location_id(&input.location_id) {
            Ok(id) => id,
            Err(err) => return self.settle(form_name(form), Err(err)),
        };

        let result = match form {
            TransferForm::ReceiveWarehouse => self
                .client
                .post_raw(&format!("/warehouses/{}/receive", location), &body)
                .await
                .map(TransferOutcome::Warehouse),
            TransferForm::ShipStore => self
                .client
                .post_raw(&format!("/warehouses/{}/ship", location), &body)
                .await
                .map(TransferOutcome::Warehouse),
            TransferForm::RecordPurchase => self
                .client
                .post_raw(&format!("/stores/{}/purchase", location), &body)
                .await
                .map(TransferOutcome::StoreItem),
        };
        self.settle(form_name(form), result)
    }

    fn settle<T>(&mut self, operation: &str, result: ClientResult<T>) -> ClientResult<T> {
        match &result {
            Ok(_) => {
                self.snapshot = None;
                tracing::info!(operation, "Transfer succeeded; aggregates invalidated");
            }
            Err(err) => {
                tracing::warn!(operation, error = %err, "Transfer rejected");
            }
        }
        result
    }
}

fn form_value(raw: &str) -> Value {
    let raw = raw.trim();
    match raw.parse::<i64>() {
        Ok(number) => Value::from(number),
        Err(_) => Value::from(raw),
    }
}

fn location_id(raw: &str) -> ClientResult<i64> {
    raw.trim().parse::<i64>().map_err(|_| {
        let issue = ValidationIssue {
            loc: vec![
                LocSegment::Field("path".to_string()),
                LocSegment::Field("id".to_string()),
            ],
            msg: "Location id must be an integer".to_string(),
            kind: "path_error".to_string(),
        };
        ClientError::Validation {
            message: issue.to_string(),
            issues: vec![issue],
        }
    })
}

fn form_name(form: TransferForm) -> &'static str {
    match form {
        TransferForm::ReceiveWarehouse => "receive",
        TransferForm::ShipStore => "ship",
        TransferForm::RecordPurchase => "sell",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_values_keep_non_numeric_text() {
        assert_eq!(form_value(" 12 "), Value::from(12));
        assert_eq!(form_value("-3"), Value::from(-3));
        assert_eq!(form_value("ten"), Value::from("ten"));
        assert_eq!(form_value(""), Value::from(""));
    }

    #[test]
    fn test_location_id_must_be_an_integer() {
        assert_eq!(location_id(" 7 ").unwrap(), 7);
        for raw in ["1/ship", "1?x=2", "", "one"] {
            let err = location_id(raw).unwrap_err();
            assert!(err.is_validation());
            assert_eq!(err.to_string(), "path.id: Location id must be an integer");
        }
    }

    #[test]
    fn test_new_session_starts_stale() {
        let client = InventoryClient::new("http://localhost:8000");
        let session = DashboardSession::new(client, Role::Regular);
        assert!(session.is_stale());
        assert!(!session.sections().contains(&Section::Admin));
    }

    #[test]
    fn test_admin_session_sees_forms() {
        let client = InventoryClient::new("http://localhost:8000");
        let session = DashboardSession::new(client, Role::Admin);
        assert_eq!(session.sections().len(), 4);
    }
}
