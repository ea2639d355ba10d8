//! Inventory routes; records are validated against the products collection

use axum::Router;
use domain_inventory::{InventoryService, MongoInventoryRepository, handlers};
use domain_products::MongoProductRepository;

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = MongoInventoryRepository::new(&state.db);
    let products = MongoProductRepository::new(&state.db);
    handlers::router(InventoryService::new(repository, products))
}

pub async fn init_indexes(db: &mongodb::Database) -> eyre::Result<()> {
    MongoInventoryRepository::new(db)
        .init_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create inventory indexes: {}", e))
}
