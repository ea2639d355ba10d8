//! Orders routes; carts are validated against the products collection

use axum::Router;
use domain_orders::{MongoOrderRepository, OrderService, handlers};
use domain_products::MongoProductRepository;

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = MongoOrderRepository::new(&state.db);
    let products = MongoProductRepository::new(&state.db);
    handlers::router(OrderService::new(repository, products))
}

pub async fn init_indexes(db: &mongodb::Database) -> eyre::Result<()> {
    MongoOrderRepository::new(db)
        .init_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create order indexes: {}", e))
}
