use async_trait::async_trait;
use resource_query::{FilterRequest, ListQuery, UpdateManyRequest};

use crate::error::OrderResult;
use crate::models::{Order, OrderFilter, OrderUpdate};

/// Repository trait for Order persistence
///
/// Write methods return the number of orders affected.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Get an order by ID
    async fn get(&self, id: &str) -> OrderResult<Option<Order>>;

    /// Orders matching the query, sorted and paged
    async fn get_many(&self, query: &ListQuery<OrderFilter>) -> OrderResult<Vec<Order>>;

    /// Count orders matching a filter, ignoring paging
    async fn count(&self, request: &FilterRequest<OrderFilter>) -> OrderResult<u64>;

    /// Store a new order
    async fn create(&self, order: Order) -> OrderResult<Order>;

    /// Apply an update and return the order as stored afterwards
    async fn update(&self, id: &str, fields: &OrderUpdate) -> OrderResult<Option<Order>>;

    /// Apply the same update to every match
    async fn update_many(
        &self,
        request: &UpdateManyRequest<OrderFilter, OrderUpdate>,
    ) -> OrderResult<u64>;

    /// Delete an order by ID
    async fn delete(&self, id: &str) -> OrderResult<u64>;

    /// Delete every match
    async fn delete_many(&self, request: &FilterRequest<OrderFilter>) -> OrderResult<u64>;

    /// Check if an order exists
    async fn exists(&self, id: &str) -> OrderResult<bool>;
}
