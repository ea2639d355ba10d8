//! API routes
//!
//! Every resource router is nested under `/api` by `axum_helpers::create_router`.

pub mod health;
pub mod inventory;
pub mod orders;
pub mod products;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/products", products::router(state))
        .nest("/inventory", inventory::router(state))
        .nest("/orders", orders::router(state))
        .nest("/users", users::router(state))
        .merge(health::router(state.clone()))
}

/// Create the indexes every collection relies on
pub async fn init_indexes(db: &mongodb::Database) -> eyre::Result<()> {
    products::init_indexes(db).await?;
    inventory::init_indexes(db).await?;
    orders::init_indexes(db).await?;
    users::init_indexes(db).await?;
    Ok(())
}
