//! User Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;

use resource_query::{
    CollectionResponse, CommandResult, FilterRequest, ListQuery, Page, UpdateManyRequest,
    UpdateRequest, require_id,
};

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, User, UserChanges, UserFilter, UserResponse, UserUpdate};
use crate::password::hash_password;
use crate::repository::UserRepository;
use crate::validation;

/// User service; hashes passwords and keeps hashes out of responses.
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_users(&self, page: Page) -> UserResult<CollectionResponse<UserResponse>> {
        self.query_users(ListQuery::paged(Some(page))).await
    }

    #[instrument(skip(self, query))]
    pub async fn query_users(
        &self,
        query: ListQuery<UserFilter>,
    ) -> UserResult<CollectionResponse<UserResponse>> {
        validation::validate_list_query(&query)?;

        let users = self.repository.get_many(&query).await?;
        let count = self.repository.count(&FilterRequest::from(&query)).await?;

        Ok(CollectionResponse::ok(
            users.into_iter().map(UserResponse::from).collect(),
            count,
            query.page.as_ref(),
        ))
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, id: &str) -> UserResult<CollectionResponse<UserResponse>> {
        let id = require_id(Some(id))?;
        let user = self
            .repository
            .get(id)
            .await?
            .ok_or_else(|| UserError::NotFound(id.to_string()))?;

        Ok(CollectionResponse::single(user.into()))
    }

    /// Create a new user with password hashing
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn create_user(
        &self,
        input: CreateUser,
    ) -> UserResult<CollectionResponse<UserResponse>> {
        validation::validate_create(self.repository.as_ref(), &input).await?;

        let password_hash = hash_password(&input.password)?;
        let user = self
            .repository
            .create(User::new(input.username, password_hash))
            .await?;

        Ok(CollectionResponse::created(user.into()))
    }

    #[instrument(skip(self, request))]
    pub async fn update_user(
        &self,
        id: &str,
        request: UpdateRequest<UserUpdate>,
    ) -> UserResult<CollectionResponse<UserResponse>> {
        let id = require_id(Some(id))?;
        let fields = validation::validate_update_request(&request)?;
        let current = validation::require_user(self.repository.as_ref(), id).await?;
        validation::require_username_change(self.repository.as_ref(), &current, fields).await?;

        let changes = Self::changes(fields)?;
        let user = self
            .repository
            .update(&current.id, &changes)
            .await?
            .ok_or_else(|| UserError::NotFound(current.id.clone()))?;

        Ok(CollectionResponse::single(user.into()))
    }

    /// Bulk updates may only change the password
    #[instrument(skip(self, request))]
    pub async fn update_users(
        &self,
        request: UpdateManyRequest<UserFilter, UserUpdate>,
    ) -> UserResult<CommandResult> {
        let fields = validation::validate_update_many(&request)?;
        let changes = Self::changes(fields)?;

        let modified = self.repository.update_many(&request, &changes).await?;
        Ok(CommandResult::affected(modified))
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: &str) -> UserResult<CommandResult> {
        let id = require_id(Some(id))?;
        if !self.repository.exists(id).await? {
            return Err(UserError::NotFound(id.to_string()));
        }

        let deleted = self.repository.delete(id).await?;
        Ok(CommandResult::affected(deleted))
    }

    #[instrument(skip(self, request))]
    pub async fn delete_users(
        &self,
        request: FilterRequest<UserFilter>,
    ) -> UserResult<CommandResult> {
        validation::validate_filter_request(&request)?;

        let deleted = self.repository.delete_many(&request).await?;
        Ok(CommandResult::affected(deleted))
    }

    fn changes(fields: &UserUpdate) -> UserResult<UserChanges> {
        let password_hash = fields.password.as_deref().map(hash_password).transpose()?;

        Ok(UserChanges {
            username: fields.username.clone(),
            password_hash,
        })
    }
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
