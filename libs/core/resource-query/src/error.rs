use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

/// How a validation failure is reported to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum ErrorKind {
    /// Malformed or invalid input, detected before any write
    BadRequest,
    /// An id-based lookup found nothing
    NotFound,
    /// A collaborator failed while validating
    Internal,
}

/// First rule a request broke.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ValidationError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

/// `Ok(())` when valid, otherwise the first violation.
pub type ValidationResult<T = ()> = Result<T, ValidationError>;

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        match err.kind {
            ErrorKind::BadRequest => AppError::BadRequest(err.message),
            ErrorKind::NotFound => AppError::NotFound(err.message),
            ErrorKind::Internal => AppError::InternalServerError(err.message),
        }
    }
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_kind_maps_to_status() {
        let cases = [
            (ValidationError::bad_request("bad"), StatusCode::BAD_REQUEST),
            (ValidationError::not_found("missing"), StatusCode::NOT_FOUND),
            (ValidationError::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(AppError::from(err).status_code(), status);
        }
    }

    #[test]
    fn test_display_is_message() {
        let err = ValidationError::bad_request("provide sort order");
        assert_eq!(err.to_string(), "provide sort order");
        assert_eq!(err.kind.to_string(), "BadRequest");
    }
}
