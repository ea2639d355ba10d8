//! Orders Domain
//!
//! Client orders. A cart maps product ids to quantities and is validated
//! against the products repository whenever it is written.
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
//! │ Validation  │ ───► │ ProductRepository  │  ← cart products must exist
//! └──────┬──────┘      └────────────────────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB implementation)
//! └─────────────┘
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;
pub mod validation;

pub use error::{OrderError, OrderResult};
pub use handlers::ApiDoc;
pub use models::{Cart, CreateOrder, ORDERS, Order, OrderFilter, OrderStatus, OrderUpdate};
pub use mongodb::MongoOrderRepository;
pub use repository::OrderRepository;
pub use service::OrderService;
