use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_products::ProductError;
use resource_query::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("inventory record for product {0} not found")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type InventoryResult<T> = Result<T, InventoryError>;

impl From<InventoryError> for AppError {
    fn from(err: InventoryError) -> Self {
        match err {
            InventoryError::Validation(e) => e.into(),
            InventoryError::NotFound(id) => {
                AppError::NotFound(format!("inventory record for product {id} not found"))
            }
            InventoryError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for InventoryError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for InventoryError {
    fn from(err: mongodb::error::Error) -> Self {
        InventoryError::Database(err.to_string())
    }
}

/// Product lookups made while validating inventory requests.
impl From<ProductError> for InventoryError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::Validation(e) => InventoryError::Validation(e),
            ProductError::NotFound(id) => InventoryError::Validation(ValidationError::not_found(
                format!("product {id} not found"),
            )),
            ProductError::Database(msg) => InventoryError::Database(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_missing_product_is_not_found() {
        let err = InventoryError::from(ProductError::NotFound("p9".into()));
        assert_eq!(err.to_string(), "product p9 not found");

        let app_error = AppError::from(err);
        assert_eq!(app_error.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_database_error_is_internal() {
        let app_error = AppError::from(InventoryError::Database("reset".into()));
        assert_eq!(app_error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
