//! Shared test utilities for domain testing
//!
//! - `TestMongo`: MongoDB container with automatic cleanup
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::TestMongo;
//!
//! #[tokio::test]
//! async fn my_mongo_test() {
//!     let mongo = TestMongo::new().await;
//!     let products = mongo.database().collection::<mongodb::bson::Document>("products");
//! }
//! ```
//!
//! Docker must be running; each `TestMongo` starts its own container.

mod mongo;

pub use mongo::TestMongo;
