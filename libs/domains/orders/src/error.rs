use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_products::ProductError;
use resource_query::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("order {0} not found")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type OrderResult<T> = Result<T, OrderError>;

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::Validation(e) => e.into(),
            OrderError::NotFound(id) => AppError::NotFound(format!("order {id} not found")),
            OrderError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for OrderError {
    fn from(err: mongodb::error::Error) -> Self {
        OrderError::Database(err.to_string())
    }
}

/// Product lookups made while validating carts.
impl From<ProductError> for OrderError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::Validation(e) => OrderError::Validation(e),
            ProductError::NotFound(id) => OrderError::Validation(ValidationError::not_found(
                format!("product {id} not found"),
            )),
            ProductError::Database(msg) => OrderError::Database(msg),
        }
    }
}
