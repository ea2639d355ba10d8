//! MongoDB implementation of UserRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Document, doc},
    options::{IndexOptions, ReturnDocument},
};
use resource_query::{FilterRequest, ListQuery, UpdateManyRequest, build_update};
use tracing::instrument;

use crate::error::UserResult;
use crate::models::{User, UserChanges, UserFilter, UserUpdate};
use crate::repository::UserRepository;

pub const COLLECTION: &str = "users";

/// MongoDB implementation of the UserRepository
#[derive(Clone)]
pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, COLLECTION)
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<User>(collection_name);
        Self { collection }
    }

    /// Unique id and username
    pub async fn init_indexes(&self) -> UserResult<()> {
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
                .keys(doc! { "username": 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name("idx_username_unique".to_string())
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
        tracing::info!("User indexes created successfully");
        Ok(())
    }

    fn by_id(id: &str) -> Document {
        doc! { "id": id }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self))]
    async fn get(&self, id: &str) -> UserResult<Option<User>> {
        let user = self.collection.find_one(Self::by_id(id)).await?;
        Ok(user)
    }

    #[instrument(skip(self, query))]
    async fn get_many(&self, query: &ListQuery<UserFilter>) -> UserResult<Vec<User>> {
        let cursor = self
            .collection
            .find(query.filter_document())
            .with_options(query.find_options())
            .await?;
        let users: Vec<User> = cursor.try_collect().await?;

        Ok(users)
    }

    #[instrument(skip(self, request))]
    async fn count(&self, request: &FilterRequest<UserFilter>) -> UserResult<u64> {
        let count = self
            .collection
            .count_documents(request.filter_document())
            .await?;
        Ok(count)
    }

    #[instrument(skip(self, user), fields(username = %user.username))]
    async fn create(&self, user: User) -> UserResult<User> {
        self.collection.insert_one(&user).await?;

        tracing::info!(user_id = %user.id, "User created successfully");
        Ok(user)
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: &str, changes: &UserChanges) -> UserResult<Option<User>> {
        let user = self
            .collection
            .find_one_and_update(Self::by_id(id), build_update(changes)?)
            .return_document(ReturnDocument::After)
            .await?;

        tracing::info!(user_id = %id, "User updated successfully");
        Ok(user)
    }

    #[instrument(skip(self, request, changes))]
    async fn update_many(
        &self,
        request: &UpdateManyRequest<UserFilter, UserUpdate>,
        changes: &UserChanges,
    ) -> UserResult<u64> {
        let result = self
            .collection
            .update_many(request.filter_document(), build_update(changes)?)
            .await?;

        tracing::info!(modified = result.modified_count, "Users updated");
        Ok(result.modified_count)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> UserResult<u64> {
        let result = self.collection.delete_one(Self::by_id(id)).await?;

        tracing::info!(user_id = %id, "User deleted successfully");
        Ok(result.deleted_count)
    }

    #[instrument(skip(self, request))]
    async fn delete_many(&self, request: &FilterRequest<UserFilter>) -> UserResult<u64> {
        let result = self
            .collection
            .delete_many(request.filter_document())
            .await?;

        tracing::info!(deleted = result.deleted_count, "Users deleted");
        Ok(result.deleted_count)
    }

    #[instrument(skip(self))]
    async fn exists(&self, id: &str) -> UserResult<bool> {
        let count = self.collection.count_documents(Self::by_id(id)).await?;
        Ok(count > 0)
    }

    #[instrument(skip(self))]
    async fn exists_by_username(&self, username: &str) -> UserResult<bool> {
        let count = self
            .collection
            .count_documents(doc! { "username": username })
            .await?;
        Ok(count > 0)
    }
}
