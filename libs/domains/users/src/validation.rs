//! User request validation; usernames are unique across the collection.

use axum_helpers::errors::validation_message;
use resource_query::{
    FilterRequest, ListQuery, UpdateManyRequest, UpdateRequest, ValidationError, ValidationResult,
    require_id, require_update_fields,
};
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, USERS, User, UserFilter, UserUpdate};
use crate::repository::UserRepository;

pub fn validate_list_query(query: &ListQuery<UserFilter>) -> ValidationResult {
    resource_query::validate_list_query(&USERS, query)
}

pub fn validate_filter_request(request: &FilterRequest<UserFilter>) -> ValidationResult {
    resource_query::validate_filter_request(&USERS, request)
}

/// Reject a username another user already holds.
pub async fn require_free_username<R: UserRepository + ?Sized>(
    repository: &R,
    username: &str,
) -> UserResult<()> {
    if repository.exists_by_username(username).await? {
        return Err(ValidationError::bad_request(format!("username {username} already exists")).into());
    }
    Ok(())
}

pub async fn validate_create<R: UserRepository + ?Sized>(
    repository: &R,
    input: &CreateUser,
) -> UserResult<()> {
    input
        .validate()
        .map_err(|e| ValidationError::bad_request(validation_message(&e)))?;

    require_free_username(repository, &input.username).await
}

fn validate_update_fields(fields: &UserUpdate) -> ValidationResult {
    fields
        .validate()
        .map_err(|e| ValidationError::bad_request(validation_message(&e)))
}

/// Field checks of a single-user update; no store reads.
pub fn validate_update_request(
    request: &UpdateRequest<UserUpdate>,
) -> ValidationResult<&UserUpdate> {
    let fields = require_update_fields(request.update_fields.as_ref())?;
    validate_update_fields(fields)?;
    Ok(fields)
}

/// A new username must be free unless it is the user's current one.
pub async fn require_username_change<R: UserRepository + ?Sized>(
    repository: &R,
    current: &User,
    fields: &UserUpdate,
) -> UserResult<()> {
    match fields.username.as_deref() {
        Some(username) if username != current.username => {
            require_free_username(repository, username).await
        }
        _ => Ok(()),
    }
}

pub fn validate_update_many(
    request: &UpdateManyRequest<UserFilter, UserUpdate>,
) -> ValidationResult<&UserUpdate> {
    resource_query::validate_update_many(&USERS, request)?;
    let fields = require_update_fields(request.update_fields.as_ref())?;

    if fields.username.is_some() {
        return Err(ValidationError::bad_request(
            "cannot update multiple records with username",
        ));
    }

    validate_update_fields(fields)?;
    Ok(fields)
}

/// Stored user with a non-blank id.
pub async fn require_user<R: UserRepository + ?Sized>(repository: &R, id: &str) -> UserResult<User> {
    let id = require_id(Some(id))?;
    repository
        .get(id)
        .await?
        .ok_or_else(|| UserError::NotFound(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockUserRepository;
    use resource_query::ErrorKind;

    fn stored(username: &str) -> User {
        User::new(username.into(), "$argon2id$stub".into())
    }

    #[tokio::test]
    async fn test_taken_username_rejected() {
        let mut repo = MockUserRepository::new();
        repo.expect_exists_by_username()
            .withf(|name| name == "alice")
            .returning(|_| Ok(true));

        let input = CreateUser {
            username: "alice".into(),
            password: "long-enough".into(),
        };
        let err = validate_create(&repo, &input).await.unwrap_err();

        assert_eq!(err.to_string(), "username alice already exists");
    }

    #[tokio::test]
    async fn test_short_password_rejected_before_lookup() {
        let mut repo = MockUserRepository::new();
        repo.expect_exists_by_username().never();

        let input = CreateUser {
            username: "alice".into(),
            password: "short".into(),
        };
        let err = validate_create(&repo, &input).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "password: must be between 8 and 128 characters"
        );
    }

    #[tokio::test]
    async fn test_keeping_own_username_is_allowed() {
        let mut repo = MockUserRepository::new();
        repo.expect_exists_by_username().never();
        let request = UpdateRequest::new(UserUpdate {
            username: Some("alice".into()),
            password: None,
        });

        let fields = validate_update_request(&request).unwrap();
        assert!(
            require_username_change(&repo, &stored("alice"), fields)
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_rename_to_taken_username() {
        let mut repo = MockUserRepository::new();
        repo.expect_exists_by_username().returning(|_| Ok(true));
        let request = UpdateRequest::new(UserUpdate {
            username: Some("bob".into()),
            password: None,
        });

        let fields = validate_update_request(&request).unwrap();
        let err = require_username_change(&repo, &stored("alice"), fields)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            UserError::Validation(e) if e.kind == ErrorKind::BadRequest
        ));
    }

    #[test]
    fn test_empty_update_rejected() {
        let request = UpdateRequest::new(UserUpdate::default());

        assert_eq!(
            validate_update_request(&request).unwrap_err().message,
            "provide at least one field to update"
        );
    }

    #[test]
    fn test_bulk_username_rejected() {
        let request = UpdateManyRequest {
            filter: None,
            timestamps: None,
            update_fields: Some(UserUpdate {
                username: Some("same".into()),
                password: None,
            }),
        };

        assert_eq!(
            validate_update_many(&request).unwrap_err().message,
            "cannot update multiple records with username"
        );
    }

    #[test]
    fn test_username_and_regex_are_exclusive() {
        let query = ListQuery::with_filter(UserFilter {
            username: Some("alice".into()),
            username_regex: Some("^a".into()),
        });

        assert_eq!(
            validate_list_query(&query).unwrap_err().message,
            "provide either username or usernameRegex"
        );
    }

    #[tokio::test]
    async fn test_missing_user() {
        let mut repo = MockUserRepository::new();
        repo.expect_get().returning(|_| Ok(None));

        let err = require_user(&repo, "u9").await.unwrap_err();
        assert_eq!(err.to_string(), "user u9 not found");
    }
}
