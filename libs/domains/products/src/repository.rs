use async_trait::async_trait;
use resource_query::{FilterRequest, ListQuery, UpdateManyRequest};

use crate::error::ProductResult;
use crate::models::{Product, ProductFilter, ProductUpdate};

/// Repository trait for Product persistence
///
/// Queries arrive validated; implementations only translate them into store
/// operations. Write methods return the number of records affected.
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Get a product by ID
    async fn get(&self, id: &str) -> ProductResult<Option<Product>>;

    /// Products matching the query, sorted and paged
    async fn get_many(&self, query: &ListQuery<ProductFilter>) -> ProductResult<Vec<Product>>;

    /// Count products matching a filter, ignoring paging
    async fn count(&self, request: &FilterRequest<ProductFilter>) -> ProductResult<u64>;

    /// Store a new product
    async fn create(&self, product: Product) -> ProductResult<Product>;

    /// Apply an update and return the product as stored afterwards
    async fn update(&self, id: &str, fields: &ProductUpdate) -> ProductResult<Option<Product>>;

    /// Apply the same update to every match
    async fn update_many(
        &self,
        request: &UpdateManyRequest<ProductFilter, ProductUpdate>,
    ) -> ProductResult<u64>;

    /// Delete a product by ID
    async fn delete(&self, id: &str) -> ProductResult<u64>;

    /// Delete every match
    async fn delete_many(&self, request: &FilterRequest<ProductFilter>) -> ProductResult<u64>;

    /// Check if a product exists
    async fn exists(&self, id: &str) -> ProductResult<bool>;
}
