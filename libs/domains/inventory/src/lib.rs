//! Inventory Domain
//!
//! Stock counts per product and location. Each record is keyed by the id of
//! the product it counts, so a product has at most one record.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Orchestration: validate, call repository, shape response
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐      ┌────────────────────┐
//! │ Validation  │ ───► │ ProductRepository  │  ← product must exist
//! └──────┬──────┘      └────────────────────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB implementation)
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_inventory::{handlers, InventoryService, MongoInventoryRepository};
//! use domain_products::MongoProductRepository;
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("shop");
//!
//! let service = InventoryService::new(
//!     MongoInventoryRepository::new(&db),
//!     MongoProductRepository::new(&db),
//! );
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;
pub mod validation;

pub use error::{InventoryError, InventoryResult};
pub use handlers::ApiDoc;
pub use models::{
    CreateInventoryRecord, INVENTORY, InventoryFilter, InventoryRecord, InventoryUpdate,
};
pub use mongodb::MongoInventoryRepository;
pub use repository::InventoryRepository;
pub use service::InventoryService;
