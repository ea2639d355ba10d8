use async_trait::async_trait;
use resource_query::{FilterRequest, ListQuery, UpdateManyRequest};

use crate::error::InventoryResult;
use crate::models::{InventoryFilter, InventoryRecord, InventoryUpdate};

/// Repository trait for inventory persistence
///
/// Records are addressed by the id of the product they count.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    async fn get(&self, product_id: &str) -> InventoryResult<Option<InventoryRecord>>;

    async fn get_many(
        &self,
        query: &ListQuery<InventoryFilter>,
    ) -> InventoryResult<Vec<InventoryRecord>>;

    async fn count(&self, request: &FilterRequest<InventoryFilter>) -> InventoryResult<u64>;

    async fn create(&self, record: InventoryRecord) -> InventoryResult<InventoryRecord>;

    /// Apply an update and return the record as stored afterwards
    async fn update(
        &self,
        product_id: &str,
        fields: &InventoryUpdate,
    ) -> InventoryResult<Option<InventoryRecord>>;

    async fn update_many(
        &self,
        request: &UpdateManyRequest<InventoryFilter, InventoryUpdate>,
    ) -> InventoryResult<u64>;

    async fn delete(&self, product_id: &str) -> InventoryResult<u64>;

    async fn delete_many(&self, request: &FilterRequest<InventoryFilter>) -> InventoryResult<u64>;

    async fn exists(&self, product_id: &str) -> InventoryResult<bool>;
}
