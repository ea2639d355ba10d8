//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use axum_helpers::errors::validation_message;
use resource_query::{
    CollectionResponse, CommandResult, FilterRequest, ListQuery, Page, UpdateManyRequest,
    UpdateRequest, ValidationError, require_id, validate_count_delta,
};

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, ProductFilter, ProductUpdate};
use crate::repository::ProductRepository;
use crate::validation;

/// Product service providing business logic operations
///
/// Every operation validates its request before the repository sees it.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Unfiltered listing, optionally paged
    #[instrument(skip(self))]
    pub async fn list_products(&self, page: Page) -> ProductResult<CollectionResponse<Product>> {
        self.query_products(ListQuery::paged(Some(page))).await
    }

    /// Products matching a filter, with the total match count
    #[instrument(skip(self, query))]
    pub async fn query_products(
        &self,
        query: ListQuery<ProductFilter>,
    ) -> ProductResult<CollectionResponse<Product>> {
        validation::validate_list_query(&query)?;

        let products = self.repository.get_many(&query).await?;
        let count = self.repository.count(&FilterRequest::from(&query)).await?;

        Ok(CollectionResponse::ok(products, count, query.page.as_ref()))
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: &str) -> ProductResult<CollectionResponse<Product>> {
        let id = require_id(Some(id))?;
        let product = self
            .repository
            .get(id)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))?;

        Ok(CollectionResponse::single(product))
    }

    /// Create a new product
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(
        &self,
        input: CreateProduct,
    ) -> ProductResult<CollectionResponse<Product>> {
        input
            .validate()
            .map_err(|e| ValidationError::bad_request(validation_message(&e)))?;

        let product = self.repository.create(Product::new(input)).await?;
        Ok(CollectionResponse::created(product))
    }

    /// Update one product; a count delta may not take the count below zero
    #[instrument(skip(self, request))]
    pub async fn update_product(
        &self,
        id: &str,
        request: UpdateRequest<ProductUpdate>,
    ) -> ProductResult<CollectionResponse<Product>> {
        let id = require_id(Some(id))?;
        let fields = validation::validate_update_request(&request)?;
        validation::require_product(self.repository.as_ref(), id).await?;

        if let Some(delta) = fields.count_delta {
            let current = self
                .repository
                .get(id)
                .await?
                .ok_or_else(|| ProductError::NotFound(id.to_string()))?;
            validate_count_delta(current.count, delta)?;
        }

        let product = self
            .repository
            .update(id, fields)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))?;

        Ok(CollectionResponse::single(product))
    }

    /// Update every product matching a filter
    #[instrument(skip(self, request))]
    pub async fn update_products(
        &self,
        request: UpdateManyRequest<ProductFilter, ProductUpdate>,
    ) -> ProductResult<CommandResult> {
        validation::validate_update_many(&request)?;

        let modified = self.repository.update_many(&request).await?;
        Ok(CommandResult::affected(modified))
    }

    /// Delete a product
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &str) -> ProductResult<CommandResult> {
        let id = validation::require_product(self.repository.as_ref(), id).await?;

        let deleted = self.repository.delete(id).await?;
        Ok(CommandResult::affected(deleted))
    }

    /// Delete every product matching a filter
    #[instrument(skip(self, request))]
    pub async fn delete_products(
        &self,
        request: FilterRequest<ProductFilter>,
    ) -> ProductResult<CommandResult> {
        validation::validate_filter_request(&request)?;

        let deleted = self.repository.delete_many(&request).await?;
        Ok(CommandResult::affected(deleted))
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
