//! Error codes attached to error logs.
//!
//! Clients only see `{ status, error }`; the code travels in the `error_code`
//! field of the log event so failures can be grouped in log search.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::ValidationError;
//! assert_eq!(code.as_str(), "VALIDATION_ERROR");
//! assert_eq!(code.code(), 1001);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Field-level validation of a request body failed
    ValidationError,

    /// Request body could not be read as JSON
    JsonExtraction,

    /// Request was rejected by a business rule
    BadRequest,

    /// Requested resource was not found
    NotFound,

    // Server errors (1500s)
    /// An unexpected internal server error occurred
    InternalError,

    // Database errors (2000s)
    /// The document store rejected or failed an operation
    DatabaseError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::BadRequest => "BAD_REQUEST",
            Self::NotFound => "NOT_FOUND",
            Self::InternalError => "INTERNAL_ERROR",
            Self::DatabaseError => "DATABASE_ERROR",
        }
    }

    /// Integer code for structured logs.
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::JsonExtraction => 1003,
            Self::NotFound => 1004,
            Self::BadRequest => 1012,
            Self::InternalError => 1501,
            Self::DatabaseError => 2003,
        }
    }

    /// Message used when a failure has no client-safe detail of its own.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "request validation failed",
            Self::JsonExtraction => "failed to parse request body",
            Self::BadRequest => "bad request",
            Self::NotFound => "resource not found",
            Self::InternalError => "an internal server error occurred",
            Self::DatabaseError => "a database error occurred",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
