//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Document, doc},
    options::{IndexOptions, ReturnDocument},
};
use resource_query::{FilterRequest, ListQuery, UpdateManyRequest, build_update, require_update_fields};
use tracing::instrument;

use crate::error::ProductResult;
use crate::models::{Product, ProductFilter, ProductUpdate};
use crate::repository::ProductRepository;

pub const COLLECTION: &str = "products";

/// MongoDB implementation of the ProductRepository
#[derive(Clone)]
pub struct MongoProductRepository {
    collection: Collection<Product>,
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, COLLECTION)
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<Product>(collection_name);
        Self { collection }
    }

    /// Unique id plus the fields lists filter and sort on
    pub async fn init_indexes(&self) -> ProductResult<()> {
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
                .keys(doc! { "name": 1 })
                .options(IndexOptions::builder().name("idx_name".to_string()).build())
                .build(),
            IndexModel::builder()
                .keys(doc! { "type": 1, "category": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_type_category".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "costPrice": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_cost_price".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "createdAt": -1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_created_at".to_string())
                        .build(),
                )
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Product indexes created successfully");
        Ok(())
    }

    fn by_id(id: &str) -> Document {
        doc! { "id": id }
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self))]
    async fn get(&self, id: &str) -> ProductResult<Option<Product>> {
        let product = self.collection.find_one(Self::by_id(id)).await?;
        Ok(product)
    }

    #[instrument(skip(self, query))]
    async fn get_many(&self, query: &ListQuery<ProductFilter>) -> ProductResult<Vec<Product>> {
        let cursor = self
            .collection
            .find(query.filter_document())
            .with_options(query.find_options())
            .await?;
        let products: Vec<Product> = cursor.try_collect().await?;

        Ok(products)
    }

    #[instrument(skip(self, request))]
    async fn count(&self, request: &FilterRequest<ProductFilter>) -> ProductResult<u64> {
        let count = self
            .collection
            .count_documents(request.filter_document())
            .await?;
        Ok(count)
    }

    #[instrument(skip(self, product), fields(product_name = %product.name))]
    async fn create(&self, product: Product) -> ProductResult<Product> {
        self.collection.insert_one(&product).await?;

        tracing::info!(product_id = %product.id, "Product created successfully");
        Ok(product)
    }

    #[instrument(skip(self, fields))]
    async fn update(&self, id: &str, fields: &ProductUpdate) -> ProductResult<Option<Product>> {
        let update = build_update(fields)?;
        let product = self
            .collection
            .find_one_and_update(Self::by_id(id), update)
            .return_document(ReturnDocument::After)
            .await?;

        tracing::info!(product_id = %id, "Product updated successfully");
        Ok(product)
    }

    #[instrument(skip(self, request))]
    async fn update_many(
        &self,
        request: &UpdateManyRequest<ProductFilter, ProductUpdate>,
    ) -> ProductResult<u64> {
        let fields = require_update_fields(request.update_fields.as_ref())?;
        let result = self
            .collection
            .update_many(request.filter_document(), build_update(fields)?)
            .await?;

        tracing::info!(modified = result.modified_count, "Products updated");
        Ok(result.modified_count)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> ProductResult<u64> {
        let result = self.collection.delete_one(Self::by_id(id)).await?;

        tracing::info!(product_id = %id, "Product deleted successfully");
        Ok(result.deleted_count)
    }

    #[instrument(skip(self, request))]
    async fn delete_many(&self, request: &FilterRequest<ProductFilter>) -> ProductResult<u64> {
        let result = self
            .collection
            .delete_many(request.filter_document())
            .await?;

        tracing::info!(deleted = result.deleted_count, "Products deleted");
        Ok(result.deleted_count)
    }

    #[instrument(skip(self))]
    async fn exists(&self, id: &str) -> ProductResult<bool> {
        let count = self.collection.count_documents(Self::by_id(id)).await?;
        Ok(count > 0)
    }
}
