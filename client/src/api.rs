//! Typed client for the inventory REST API
//!
//! One method per endpoint. Every call is a single request: no retries,
//! no local validation, no caching. Rejections come back as [`ClientError`]
//! with the server's message.

use reqwest::{Client, Method, RequestBuilder};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use shared::{
    DashboardSnapshot, Item, ItemCreate, ItemUnits, ItemUpdate, ListResponse, LocationCreate,
    LocationUpdate, Message, Pagination, PurchaseRequest, ReceiveRequest, ShipRequest, Store,
    StoreInventory, StoreItem, StoreRevenue, Token, UserCreate, UserPublic, Warehouse,
    WarehouseInventory,
};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

const API_PREFIX: &str = "/api/v1";

/// Inventory API client
#[derive(Clone)]
pub struct InventoryClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

/// Server health report
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
}

impl InventoryClient {
    /// Create a client for the server at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        let client = Self::new(config.api.base_url.clone());
        match &config.api.token {
            Some(token) => client.with_token(token.clone()),
            None => client,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}{}", self.base_url, API_PREFIX, path);
        tracing::debug!(%method, %url, "Sending request");

        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ClientResult<T> {
        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = ClientError::from_response(status, &body);
            tracing::debug!(%status, error = %err, "Request rejected");
            return Err(err);
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send(self.request(Method::GET, path)).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send(self.request(Method::PUT, path).json(body)).await
    }

    async fn delete(&self, path: &str) -> ClientResult<Message> {
        self.send(self.request(Method::DELETE, path)).await
    }

    async fn list<T: DeserializeOwned>(
        &self,
        path: &str,
        page: Pagination,
    ) -> ClientResult<ListResponse<T>> {
        self.send(self.request(Method::GET, path).query(&page)).await
    }

    // ========================================================================
    // Auth
    // ========================================================================

    /// Exchange credentials for a token and use it for subsequent calls
    pub async fn login(&mut self, email: &str, password: &str) -> ClientResult<Token> {
        let builder = self
            .request(Method::POST, "/login/access-token")
            .form(&[("username", email), ("password", password)]);
        let token: Token = self.send(builder).await?;
        self.token = Some(token.access_token.clone());
        Ok(token)
    }

    pub async fn me(&self) -> ClientResult<UserPublic> {
        self.get("/users/me").await
    }

    pub async fn create_user(&self, input: &UserCreate) -> ClientResult<UserPublic> {
        self.post("/users", input).await
    }

    pub async fn health(&self) -> ClientResult<HealthStatus> {
        self.get("/health").await
    }

    // ========================================================================
    // Catalog
    // ========================================================================

    pub async fn list_items(&self, page: Pagination) -> ClientResult<ListResponse<Item>> {
        self.list("/items", page).await
    }

    pub async fn create_item(&self, input: &ItemCreate) -> ClientResult<Item> {
        self.post("/items", input).await
    }

    pub async fn get_item(&self, id: i64) -> ClientResult<Item> {
        self.get(&format!("/items/{}", id)).await
    }

    pub async fn update_item(&self, id: i64, input: &ItemUpdate) -> ClientResult<Item> {
        self.put(&format!("/items/{}", id), input).await
    }

    pub async fn delete_item(&self, id: i64) -> ClientResult<Message> {
        self.delete(&format!("/items/{}", id)).await
    }

    pub async fn list_warehouses(&self, page: Pagination) -> ClientResult<ListResponse<Warehouse>> {
        self.list("/warehouses", page).await
    }

    pub async fn create_warehouse(&self, name: &str) -> ClientResult<Warehouse> {
        self.post("/warehouses", &LocationCreate::new(name)).await
    }

    pub async fn get_warehouse(&self, id: i64) -> ClientResult<Warehouse> {
        self.get(&format!("/warehouses/{}", id)).await
    }

    pub async fn rename_warehouse(&self, id: i64, name: &str) -> ClientResult<Warehouse> {
        let input = LocationUpdate {
            name: Some(name.to_string()),
        };
        self.put(&format!("/warehouses/{}", id), &input).await
    }

    pub async fn delete_warehouse(&self, id: i64) -> ClientResult<Message> {
        self.delete(&format!("/warehouses/{}", id)).await
    }

    pub async fn list_stores(&self, page: Pagination) -> ClientResult<ListResponse<Store>> {
        self.list("/stores", page).await
    }

    pub async fn create_store(&self, name: &str) -> ClientResult<Store> {
        self.post("/stores", &LocationCreate::new(name)).await
    }

    pub async fn get_store(&self, id: i64) -> ClientResult<Store> {
        self.get(&format!("/stores/{}", id)).await
    }

    pub async fn rename_store(&self, id: i64, name: &str) -> ClientResult<Store> {
        let input = LocationUpdate {
            name: Some(name.to_string()),
        };
        self.put(&format!("/stores/{}", id), &input).await
    }

    pub async fn delete_store(&self, id: i64) -> ClientResult<Message> {
        self.delete(&format!("/stores/{}", id)).await
    }

    // ========================================================================
    // Transfers
    // ========================================================================

    /// Add `quantity` units of an item to a warehouse
    pub async fn receive(
        &self,
        warehouse_id: i64,
        item_id: i64,
        quantity: i64,
    ) -> ClientResult<Warehouse> {
        self.post(
            &format!("/warehouses/{}/receive", warehouse_id),
            &ReceiveRequest { item_id, quantity },
        )
        .await
    }

    /// Move `quantity` units of an item from a warehouse to a store
    pub async fn ship(
        &self,
        warehouse_id: i64,
        store_id: i64,
        item_id: i64,
        quantity: i64,
    ) -> ClientResult<Warehouse> {
        self.post(
            &format!("/warehouses/{}/ship", warehouse_id),
            &ShipRequest {
                item_id,
                store_id,
                quantity,
            },
        )
        .await
    }

    /// Record a sale of `quantity` units at a store
    pub async fn sell(
        &self,
        store_id: i64,
        item_id: i64,
        quantity: i64,
    ) -> ClientResult<StoreItem> {
        self.post(
            &format!("/stores/{}/purchase", store_id),
            &PurchaseRequest { item_id, quantity },
        )
        .await
    }

    /// Post a transfer body exactly as given, for form input that may not be numeric
    pub(crate) async fn post_raw<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> ClientResult<T> {
        self.post(path, body).await
    }

    // ========================================================================
    // Aggregations
    // ========================================================================

    pub async fn units_per_item(&self) -> ClientResult<Vec<ItemUnits>> {
        self.get("/items/total-units").await
    }

    pub async fn items_per_warehouse(&self) -> ClientResult<Vec<WarehouseInventory>> {
        self.get("/warehouses/items-per-warehouse").await
    }

    pub async fn items_per_store(&self) -> ClientResult<Vec<StoreInventory>> {
        self.get("/stores/items-per-store").await
    }

    pub async fn store_revenues(&self) -> ClientResult<Vec<StoreRevenue>> {
        self.get("/stores/revenues").await
    }

    /// Fetch all four aggregates concurrently
    pub async fn dashboard_snapshot(&self) -> ClientResult<DashboardSnapshot> {
        let (units_per_item, items_per_warehouse, items_per_store, store_revenues) =
            tokio::try_join!(
                self.units_per_item(),
                self.items_per_warehouse(),
                self.items_per_store(),
                self.store_revenues(),
            )?;

        Ok(DashboardSnapshot {
            units_per_item,
            items_per_warehouse,
            items_per_store,
            store_revenues,
        })
    }
}
