use async_trait::async_trait;
use resource_query::{FilterRequest, ListQuery, UpdateManyRequest};

use crate::error::UserResult;
use crate::models::{User, UserChanges, UserFilter, UserUpdate};

/// Repository trait for User persistence
///
/// Updates receive [`UserChanges`] with the password already hashed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Get a user by ID
    async fn get(&self, id: &str) -> UserResult<Option<User>>;

    async fn get_many(&self, query: &ListQuery<UserFilter>) -> UserResult<Vec<User>>;

    async fn count(&self, request: &FilterRequest<UserFilter>) -> UserResult<u64>;

    async fn create(&self, user: User) -> UserResult<User>;

    /// Apply changes and return the user as stored afterwards
    async fn update(&self, id: &str, changes: &UserChanges) -> UserResult<Option<User>>;

    /// Apply the same changes to every user matching the request filter
    async fn update_many(
        &self,
        request: &UpdateManyRequest<UserFilter, UserUpdate>,
        changes: &UserChanges,
    ) -> UserResult<u64>;

    async fn delete(&self, id: &str) -> UserResult<u64>;

    async fn delete_many(&self, request: &FilterRequest<UserFilter>) -> UserResult<u64>;

    /// Check if a user exists
    async fn exists(&self, id: &str) -> UserResult<bool>;

    /// Check if a username is taken
    async fn exists_by_username(&self, username: &str) -> UserResult<bool>;
}
