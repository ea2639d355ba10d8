//! MongoDB implementation of OrderRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Document, doc},
    options::{IndexOptions, ReturnDocument},
};
use resource_query::{FilterRequest, ListQuery, UpdateManyRequest, build_update, require_update_fields};
use tracing::instrument;

use crate::error::OrderResult;
use crate::models::{Order, OrderFilter, OrderUpdate};
use crate::repository::OrderRepository;

pub const COLLECTION: &str = "orders";

/// MongoDB implementation of the OrderRepository
#[derive(Clone)]
pub struct MongoOrderRepository {
    collection: Collection<Order>,
}

impl MongoOrderRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, COLLECTION)
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<Order>(collection_name);
        Self { collection }
    }

    /// Unique id plus client and status lookups
    pub async fn init_indexes(&self) -> OrderResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "id": 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name("idx_id_unique".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "clientId": 1, "status": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_client_status".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "status": 1 })
                .options(IndexOptions::builder().name("idx_status".to_string()).build())
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Order indexes created successfully");
        Ok(())
    }

    fn by_id(id: &str) -> Document {
        doc! { "id": id }
    }
}

#[async_trait]
impl OrderRepository for MongoOrderRepository {
    #[instrument(skip(self))]
    async fn get(&self, id: &str) -> OrderResult<Option<Order>> {
        let order = self.collection.find_one(Self::by_id(id)).await?;
        Ok(order)
    }

    #[instrument(skip(self, query))]
    async fn get_many(&self, query: &ListQuery<OrderFilter>) -> OrderResult<Vec<Order>> {
        let cursor = self
            .collection
            .find(query.filter_document())
            .with_options(query.find_options())
            .await?;
        let orders: Vec<Order> = cursor.try_collect().await?;

        Ok(orders)
    }

    #[instrument(skip(self, request))]
    async fn count(&self, request: &FilterRequest<OrderFilter>) -> OrderResult<u64> {
        let count = self
            .collection
            .count_documents(request.filter_document())
            .await?;
        Ok(count)
    }

    #[instrument(skip(self, order), fields(client_id = %order.client_id))]
    async fn create(&self, order: Order) -> OrderResult<Order> {
        self.collection.insert_one(&order).await?;

        tracing::info!(
            order_id = %order.id,
            items = order.item_count(),
            "Order created successfully"
        );
        Ok(order)
    }

    #[instrument(skip(self, fields))]
    async fn update(&self, id: &str, fields: &OrderUpdate) -> OrderResult<Option<Order>> {
        let update = build_update(fields)?;
        let order = self
            .collection
            .find_one_and_update(Self::by_id(id), update)
            .return_document(ReturnDocument::After)
            .await?;

        tracing::info!(order_id = %id, "Order updated successfully");
        Ok(order)
    }

    #[instrument(skip(self, request))]
    async fn update_many(
        &self,
        request: &UpdateManyRequest<OrderFilter, OrderUpdate>,
    ) -> OrderResult<u64> {
        let fields = require_update_fields(request.update_fields.as_ref())?;
        let result = self
            .collection
            .update_many(request.filter_document(), build_update(fields)?)
            .await?;

        tracing::info!(modified = result.modified_count, "Orders updated");
        Ok(result.modified_count)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> OrderResult<u64> {
        let result = self.collection.delete_one(Self::by_id(id)).await?;

        tracing::info!(order_id = %id, "Order deleted successfully");
        Ok(result.deleted_count)
    }

    #[instrument(skip(self, request))]
    async fn delete_many(&self, request: &FilterRequest<OrderFilter>) -> OrderResult<u64> {
        let result = self
            .collection
            .delete_many(request.filter_document())
            .await?;

        tracing::info!(deleted = result.deleted_count, "Orders deleted");
        Ok(result.deleted_count)
    }

    #[instrument(skip(self))]
    async fn exists(&self, id: &str) -> OrderResult<bool> {
        let count = self.collection.count_documents(Self::by_id(id)).await?;
        Ok(count > 0)
    }
}
