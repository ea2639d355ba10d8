use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use resource_query::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("product {0} not found")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::Validation(e) => e.into(),
            ProductError::NotFound(id) => AppError::NotFound(format!("product {id} not found")),
            ProductError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        ProductError::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_codes() {
        let cases = [
            (
                ProductError::Validation(ValidationError::bad_request("provide sort order")),
                StatusCode::BAD_REQUEST,
            ),
            (ProductError::NotFound("p1".into()), StatusCode::NOT_FOUND),
            (ProductError::Database("timeout".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(AppError::from(err).status_code(), status);
        }
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(ProductError::NotFound("p1".into()).to_string(), "product p1 not found");
    }
}
