//! Catalog service for items, warehouses and stores

use shared::{
    validate_location_name, validate_price, validate_title, Item, ItemCreate, ItemUpdate,
    ListResponse, LocationCreate, LocationUpdate, Pagination, Store, Warehouse,
};

use crate::error::{AppError, AppResult};
use crate::ledger::SharedLedger;

/// Service for creating, listing and removing catalog entities
#[derive(Clone)]
pub struct CatalogService {
    ledger: SharedLedger,
}

impl CatalogService {
    pub fn new(ledger: SharedLedger) -> Self {
        Self { ledger }
    }

    // ========================================================================
    // Items
    // ========================================================================

    pub async fn list_items(&self, page: Pagination) -> AppResult<ListResponse<Item>> {
        let ledger = self.ledger.read().await;
        Ok(paginate(ledger.items.values().cloned(), page))
    }

    pub async fn get_item(&self, id: i64) -> AppResult<Item> {
        let ledger = self.ledger.read().await;
        ledger
            .items
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::not_found("item"))
    }

    pub async fn create_item(&self, input: ItemCreate) -> AppResult<Item> {
        validate_title(&input.title).map_err(|e| AppError::invalid_field("title", e))?;
        validate_price(input.wholesale_price)
            .map_err(|e| AppError::invalid_field("wholesale_price", e))?;
        validate_price(input.retail_price)
            .map_err(|e| AppError::invalid_field("retail_price", e))?;

        let mut ledger = self.ledger.write().await;
        let item = Item {
            id: ledger.next_item_id(),
            title: input.title.trim().to_string(),
            description: input.description,
            wholesale_price: input.wholesale_price,
            retail_price: input.retail_price,
        };
        ledger.items.insert(item.id, item.clone());

        tracing::info!(item_id = item.id, title = %item.title, "Created item");
        Ok(item)
    }

    /// Apply the fields present in `input`, with the same checks as create
    pub async fn update_item(&self, id: i64, input: ItemUpdate) -> AppResult<Item> {
        if let Some(title) = &input.title {
            validate_title(title).map_err(|e| AppError::invalid_field("title", e))?;
        }
        if let Some(price) = input.wholesale_price {
            validate_price(price).map_err(|e| AppError::invalid_field("wholesale_price", e))?;
        }
        if let Some(price) = input.retail_price {
            validate_price(price).map_err(|e| AppError::invalid_field("retail_price", e))?;
        }

        let mut ledger = self.ledger.write().await;
        let item = ledger
            .items
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("item"))?;
        if let Some(title) = input.title {
            item.title = title.trim().to_string();
        }
        if let Some(description) = input.description {
            item.description = Some(description);
        }
        if let Some(price) = input.wholesale_price {
            item.wholesale_price = price;
        }
        if let Some(price) = input.retail_price {
            item.retail_price = price;
        }

        tracing::info!(item_id = id, "Updated item");
        Ok(item.clone())
    }

    pub async fn delete_item(&self, id: i64) -> AppResult<()> {
        let mut ledger = self.ledger.write().await;
        ledger
            .remove_item(id)
            .ok_or_else(|| AppError::not_found("item"))?;
        tracing::info!(item_id = id, "Deleted item");
        Ok(())
    }

    // ========================================================================
    // Warehouses
    // ========================================================================

    pub async fn list_warehouses(&self, page: Pagination) -> AppResult<ListResponse<Warehouse>> {
        let ledger = self.ledger.read().await;
        let rows = ledger
            .warehouses
            .keys()
            .filter_map(|&id| ledger.warehouse(id));
        Ok(paginate(rows, page))
    }

    pub async fn get_warehouse(&self, id: i64) -> AppResult<Warehouse> {
        let ledger = self.ledger.read().await;
        ledger
            .warehouse(id)
            .ok_or_else(|| AppError::not_found("warehouse"))
    }

    pub async fn create_warehouse(&self, input: LocationCreate) -> AppResult<Warehouse> {
        validate_location_name(&input.name).map_err(|e| AppError::invalid_field("name", e))?;

        let mut ledger = self.ledger.write().await;
        let id = ledger.next_warehouse_id();
        ledger.warehouses.insert(id, input.name.trim().to_string());

        tracing::info!(warehouse_id = id, "Created warehouse");
        ledger
            .warehouse(id)
            .ok_or_else(|| AppError::Internal("warehouse vanished after insert".into()))
    }

    pub async fn update_warehouse(&self, id: i64, input: LocationUpdate) -> AppResult<Warehouse> {
        let name = validated_name(input)?;

        let mut ledger = self.ledger.write().await;
        let current = ledger
            .warehouses
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("warehouse"))?;
        if let Some(name) = name {
            *current = name;
        }

        tracing::info!(warehouse_id = id, "Updated warehouse");
        ledger
            .warehouse(id)
            .ok_or_else(|| AppError::not_found("warehouse"))
    }

    pub async fn delete_warehouse(&self, id: i64) -> AppResult<()> {
        let mut ledger = self.ledger.write().await;
        ledger
            .remove_warehouse(id)
            .ok_or_else(|| AppError::not_found("warehouse"))?;
        tracing::info!(warehouse_id = id, "Deleted warehouse");
        Ok(())
    }

    // ========================================================================
    // Stores
    // ========================================================================

    pub async fn list_stores(&self, page: Pagination) -> AppResult<ListResponse<Store>> {
        let ledger = self.ledger.read().await;
        let rows = ledger.stores.keys().filter_map(|&id| ledger.store(id));
        Ok(paginate(rows, page))
    }

    pub async fn get_store(&self, id: i64) -> AppResult<Store> {
        let ledger = self.ledger.read().await;
        ledger.store(id).ok_or_else(|| AppError::not_found("store"))
    }

    pub async fn create_store(&self, input: LocationCreate) -> AppResult<Store> {
        validate_location_name(&input.name).map_err(|e| AppError::invalid_field("name", e))?;

        let mut ledger = self.ledger.write().await;
        let id = ledger.next_store_id();
        ledger.stores.insert(id, input.name.trim().to_string());

        tracing::info!(store_id = id, "Created store");
        ledger
            .store(id)
            .ok_or_else(|| AppError::Internal("store vanished after insert".into()))
    }

    pub async fn update_store(&self, id: i64, input: LocationUpdate) -> AppResult<Store> {
        let name = validated_name(input)?;

        let mut ledger = self.ledger.write().await;
        let current = ledger
            .stores
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("store"))?;
        if let Some(name) = name {
            *current = name;
        }

        tracing::info!(store_id = id, "Updated store");
        ledger.store(id).ok_or_else(|| AppError::not_found("store"))
    }

    pub async fn delete_store(&self, id: i64) -> AppResult<()> {
        let mut ledger = self.ledger.write().await;
        ledger
            .remove_store(id)
            .ok_or_else(|| AppError::not_found("store"))?;
        tracing::info!(store_id = id, "Deleted store");
        Ok(())
    }
}

/// Trimmed new name, if the update carries one
fn validated_name(input: LocationUpdate) -> AppResult<Option<String>> {
    match input.name {
        Some(name) => {
            validate_location_name(&name).map_err(|e| AppError::invalid_field("name", e))?;
            Ok(Some(name.trim().to_string()))
        }
        None => Ok(None),
    }
}

/// Slice one page out of an id-ordered iterator; `count` is the full total
fn paginate<T>(rows: impl Iterator<Item = T>, page: Pagination) -> ListResponse<T> {
    let all: Vec<T> = rows.collect();
    let count = all.len();
    let data = all.into_iter().skip(page.skip).take(page.limit).collect();
    ListResponse { data, count }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Ledger;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_create_and_get_item() {
        let service = CatalogService::new(Ledger::shared());
        let item = service
            .create_item(ItemCreate::new("  Pen ", Decimal::new(150, 2), Decimal::new(225, 2)))
            .await
            .unwrap();

        assert_eq!(item.id, 1);
        assert_eq!(item.title, "Pen");
        assert_eq!(service.get_item(1).await.unwrap(), item);
    }

    #[tokio::test]
    async fn test_create_item_rejects_blank_title_and_negative_price() {
        let service = CatalogService::new(Ledger::shared());

        let err = service
            .create_item(ItemCreate::new("   ", Decimal::ONE, Decimal::TWO))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = service
            .create_item(ItemCreate::new("Pen", Decimal::NEGATIVE_ONE, Decimal::TWO))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_list_pages_keep_total_count() {
        let service = CatalogService::new(Ledger::shared());
        for name in ["North", "South", "East"] {
            service
                .create_warehouse(LocationCreate::new(name))
                .await
                .unwrap();
        }

        let page = service
            .list_warehouses(Pagination { skip: 1, limit: 1 })
            .await
            .unwrap();
        assert_eq!(page.count, 3);
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].name, "South");
    }

    #[tokio::test]
    async fn test_delete_unknown_store_is_not_found() {
        let service = CatalogService::new(Ledger::shared());
        let err = service.delete_store(7).await.unwrap_err();
        assert_eq!(err.to_string(), "Store not found");
    }

    #[tokio::test]
    async fn test_new_locations_have_no_links() {
        let service = CatalogService::new(Ledger::shared());
        let store = service
            .create_store(LocationCreate::new("Store A"))
            .await
            .unwrap();
        assert!(store.item_links.is_empty());
    }

    #[tokio::test]
    async fn test_update_item_changes_only_given_fields() {
        let service = CatalogService::new(Ledger::shared());
        service
            .create_item(ItemCreate::new("Pen", Decimal::ONE, Decimal::TWO))
            .await
            .unwrap();

        let update = ItemUpdate {
            retail_price: Some(Decimal::new(350, 2)),
            ..Default::default()
        };
        let item = service.update_item(1, update).await.unwrap();
        assert_eq!(item.title, "Pen");
        assert_eq!(item.wholesale_price, Decimal::ONE);
        assert_eq!(item.retail_price, Decimal::new(350, 2));
    }

    #[tokio::test]
    async fn test_update_item_validates_and_leaves_item_alone() {
        let service = CatalogService::new(Ledger::shared());
        service
            .create_item(ItemCreate::new("Pen", Decimal::ONE, Decimal::TWO))
            .await
            .unwrap();

        let update = ItemUpdate {
            title: Some("  ".to_string()),
            ..Default::default()
        };
        let err = service.update_item(1, update).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(service.get_item(1).await.unwrap().title, "Pen");

        let err = service
            .update_item(9, ItemUpdate::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Item not found");
    }

    #[tokio::test]
    async fn test_rename_locations() {
        let service = CatalogService::new(Ledger::shared());
        service
            .create_warehouse(LocationCreate::new("North"))
            .await
            .unwrap();
        service
            .create_store(LocationCreate::new("Store A"))
            .await
            .unwrap();

        let rename = |name: &str| LocationUpdate {
            name: Some(name.to_string()),
        };
        let warehouse = service.update_warehouse(1, rename(" South ")).await.unwrap();
        assert_eq!(warehouse.name, "South");
        let store = service.update_store(1, rename("Store B")).await.unwrap();
        assert_eq!(store.name, "Store B");

        let unchanged = service
            .update_store(1, LocationUpdate::default())
            .await
            .unwrap();
        assert_eq!(unchanged.name, "Store B");

        let err = service.update_warehouse(1, rename("")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        let err = service.update_store(5, rename("Store C")).await.unwrap_err();
        assert_eq!(err.to_string(), "Store not found");
    }
}
