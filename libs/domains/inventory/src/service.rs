//! Inventory Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;

use domain_products::ProductRepository;
use resource_query::{
    CollectionResponse, CommandResult, FilterRequest, ListQuery, Page, UpdateManyRequest,
    UpdateRequest, require_id,
};

use crate::error::{InventoryError, InventoryResult};
use crate::models::{CreateInventoryRecord, InventoryFilter, InventoryRecord, InventoryUpdate};
use crate::repository::InventoryRepository;
use crate::validation;

/// Inventory service; consults the product catalogue when records are created.
pub struct InventoryService<R: InventoryRepository, P: ProductRepository> {
    repository: Arc<R>,
    products: Arc<P>,
}

impl<R: InventoryRepository, P: ProductRepository> InventoryService<R, P> {
    pub fn new(repository: R, products: P) -> Self {
        Self {
            repository: Arc::new(repository),
            products: Arc::new(products),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_records(
        &self,
        page: Page,
    ) -> InventoryResult<CollectionResponse<InventoryRecord>> {
        self.query_records(ListQuery::paged(Some(page))).await
    }

    #[instrument(skip(self, query))]
    pub async fn query_records(
        &self,
        query: ListQuery<InventoryFilter>,
    ) -> InventoryResult<CollectionResponse<InventoryRecord>> {
        validation::validate_list_query(&query)?;

        let records = self.repository.get_many(&query).await?;
        let count = self.repository.count(&FilterRequest::from(&query)).await?;

        Ok(CollectionResponse::ok(records, count, query.page.as_ref()))
    }

    #[instrument(skip(self))]
    pub async fn get_record(
        &self,
        product_id: &str,
    ) -> InventoryResult<CollectionResponse<InventoryRecord>> {
        let product_id = require_id(Some(product_id))?;
        let record = self
            .repository
            .get(product_id)
            .await?
            .ok_or_else(|| InventoryError::NotFound(product_id.to_string()))?;

        Ok(CollectionResponse::single(record))
    }

    #[instrument(skip(self, input), fields(product_id = %input.product_id))]
    pub async fn create_record(
        &self,
        input: CreateInventoryRecord,
    ) -> InventoryResult<CollectionResponse<InventoryRecord>> {
        validation::validate_create(self.repository.as_ref(), self.products.as_ref(), &input)
            .await?;

        let record = self.repository.create(InventoryRecord::new(input)).await?;
        Ok(CollectionResponse::created(record))
    }

    /// Update one record; a count delta is checked against the stored count
    #[instrument(skip(self, request))]
    pub async fn update_record(
        &self,
        product_id: &str,
        request: UpdateRequest<InventoryUpdate>,
    ) -> InventoryResult<CollectionResponse<InventoryRecord>> {
        let product_id = require_id(Some(product_id))?;
        let fields = validation::validate_update_request(&request)?;
        validation::require_record(self.repository.as_ref(), product_id).await?;

        if let Some(delta) = fields.count_delta {
            validation::validate_count_delta(self.repository.as_ref(), product_id, delta).await?;
        }

        let record = self
            .repository
            .update(product_id, fields)
            .await?
            .ok_or_else(|| InventoryError::NotFound(product_id.to_string()))?;

        Ok(CollectionResponse::single(record))
    }

    #[instrument(skip(self, request))]
    pub async fn update_records(
        &self,
        request: UpdateManyRequest<InventoryFilter, InventoryUpdate>,
    ) -> InventoryResult<CommandResult> {
        validation::validate_update_many(&request)?;

        let modified = self.repository.update_many(&request).await?;
        Ok(CommandResult::affected(modified))
    }

    #[instrument(skip(self))]
    pub async fn delete_record(&self, product_id: &str) -> InventoryResult<CommandResult> {
        let product_id = validation::require_record(self.repository.as_ref(), product_id).await?;

        let deleted = self.repository.delete(product_id).await?;
        Ok(CommandResult::affected(deleted))
    }

    #[instrument(skip(self, request))]
    pub async fn delete_records(
        &self,
        request: FilterRequest<InventoryFilter>,
    ) -> InventoryResult<CommandResult> {
        validation::validate_filter_request(&request)?;

        let deleted = self.repository.delete_many(&request).await?;
        Ok(CommandResult::affected(deleted))
    }
}

impl<R: InventoryRepository, P: ProductRepository> Clone for InventoryService<R, P> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            products: Arc::clone(&self.products),
        }
    }
}
