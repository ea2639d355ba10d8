use chrono::{DateTime, Utc};
use resource_query::{
    Conditions, FieldCondition, FilterFields, ResourceSpec, UpdateFields, timestamp,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Validation rules for user queries.
pub const USERS: ResourceSpec = ResourceSpec {
    name: "user",
    sortable: &["username", "createdAt", "updatedAt"],
    exclusive: &[("username", "usernameRegex")],
    enums: &[],
};

/// User entity as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier (UUID v7)
    pub id: String,
    pub username: String,
    /// Argon2 password hash (never exposed in API responses)
    pub password_hash: String,
    #[serde(with = "timestamp::rfc3339")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp::rfc3339")]
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: String, password_hash: String) -> Self {
        let now = timestamp::now();
        Self {
            id: Uuid::now_v7().to_string(),
            username,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }
}

/// User response DTO (without password_hash)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    #[serde(with = "timestamp::rfc3339")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp::rfc3339")]
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// DTO for creating a new user
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(min = 3, max = 50, message = "must be between 3 and 50 characters"))]
    pub username: String,
    #[validate(length(min = 8, max = 128, message = "must be between 8 and 128 characters"))]
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username_regex: Option<String>,
}

impl FilterFields for UserFilter {
    fn conditions(&self) -> Vec<FieldCondition> {
        Conditions::new()
            .equals("username", "username", self.username.as_deref())
            .matches("usernameRegex", "username", self.username_regex.as_deref())
            .build()
    }
}

/// Fields a user update may change, as received.
///
/// The password is never serialized; it reaches the store only as a hash
/// through [`UserChanges`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 3, max = 50, message = "must be between 3 and 50 characters"))]
    pub username: Option<String>,
    #[serde(default, skip_serializing)]
    #[validate(length(min = 8, max = 128, message = "must be between 8 and 128 characters"))]
    pub password: Option<String>,
}

impl UpdateFields for UserUpdate {
    fn is_empty(&self) -> bool {
        self.username.is_none() && self.password.is_none()
    }
}

/// Changes written to a stored user.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
}

impl UpdateFields for UserChanges {
    fn is_empty(&self) -> bool {
        self.username.is_none() && self.password_hash.is_none()
    }
}
