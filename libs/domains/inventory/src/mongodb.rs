//! MongoDB implementation of InventoryRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Document, doc},
    options::{IndexOptions, ReturnDocument},
};
use resource_query::{FilterRequest, ListQuery, UpdateManyRequest, build_update, require_update_fields};
use tracing::instrument;

use crate::error::InventoryResult;
use crate::models::{InventoryFilter, InventoryRecord, InventoryUpdate};
use crate::repository::InventoryRepository;

pub const COLLECTION: &str = "inventory";

#[derive(Clone)]
pub struct MongoInventoryRepository {
    collection: Collection<InventoryRecord>,
}

impl MongoInventoryRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, COLLECTION)
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<InventoryRecord>(collection_name);
        Self { collection }
    }

    /// One record per product
    pub async fn init_indexes(&self) -> InventoryResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "productId": 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name("idx_product_id_unique".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "location": 1 })
                .options(IndexOptions::builder().name("idx_location".to_string()).build())
                .build(),
            IndexModel::builder()
                .keys(doc! { "count": 1 })
                .options(IndexOptions::builder().name("idx_count".to_string()).build())
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Inventory indexes created successfully");
        Ok(())
    }

    fn by_product(product_id: &str) -> Document {
        doc! { "productId": product_id }
    }
}

#[async_trait]
impl InventoryRepository for MongoInventoryRepository {
    #[instrument(skip(self))]
    async fn get(&self, product_id: &str) -> InventoryResult<Option<InventoryRecord>> {
        let record = self.collection.find_one(Self::by_product(product_id)).await?;
        Ok(record)
    }

    #[instrument(skip(self, query))]
    async fn get_many(
        &self,
        query: &ListQuery<InventoryFilter>,
    ) -> InventoryResult<Vec<InventoryRecord>> {
        let cursor = self
            .collection
            .find(query.filter_document())
            .with_options(query.find_options())
            .await?;
        let records: Vec<InventoryRecord> = cursor.try_collect().await?;

        Ok(records)
    }

    #[instrument(skip(self, request))]
    async fn count(&self, request: &FilterRequest<InventoryFilter>) -> InventoryResult<u64> {
        let count = self
            .collection
            .count_documents(request.filter_document())
            .await?;
        Ok(count)
    }

    #[instrument(skip(self, record), fields(product_id = %record.product_id))]
    async fn create(&self, record: InventoryRecord) -> InventoryResult<InventoryRecord> {
        self.collection.insert_one(&record).await?;

        tracing::info!(location = %record.location, "Inventory record created");
        Ok(record)
    }

    #[instrument(skip(self, fields))]
    async fn update(
        &self,
        product_id: &str,
        fields: &InventoryUpdate,
    ) -> InventoryResult<Option<InventoryRecord>> {
        let update = build_update(fields)?;
        let record = self
            .collection
            .find_one_and_update(Self::by_product(product_id), update)
            .return_document(ReturnDocument::After)
            .await?;

        tracing::info!(count_delta = ?fields.count_delta, "Inventory record updated");
        Ok(record)
    }

    #[instrument(skip(self, request))]
    async fn update_many(
        &self,
        request: &UpdateManyRequest<InventoryFilter, InventoryUpdate>,
    ) -> InventoryResult<u64> {
        let fields = require_update_fields(request.update_fields.as_ref())?;
        let result = self
            .collection
            .update_many(request.filter_document(), build_update(fields)?)
            .await?;

        tracing::info!(modified = result.modified_count, "Inventory records updated");
        Ok(result.modified_count)
    }

    #[instrument(skip(self))]
    async fn delete(&self, product_id: &str) -> InventoryResult<u64> {
        let result = self
            .collection
            .delete_one(Self::by_product(product_id))
            .await?;

        tracing::info!(deleted = result.deleted_count, "Inventory record deleted");
        Ok(result.deleted_count)
    }

    #[instrument(skip(self, request))]
    async fn delete_many(&self, request: &FilterRequest<InventoryFilter>) -> InventoryResult<u64> {
        let result = self
            .collection
            .delete_many(request.filter_document())
            .await?;

        tracing::info!(deleted = result.deleted_count, "Inventory records deleted");
        Ok(result.deleted_count)
    }

    #[instrument(skip(self))]
    async fn exists(&self, product_id: &str) -> InventoryResult<bool> {
        let count = self
            .collection
            .count_documents(Self::by_product(product_id))
            .await?;
        Ok(count > 0)
    }
}
