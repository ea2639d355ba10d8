//! MongoDB test infrastructure

use mongodb::{Client, Database};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::mongo::Mongo;
use uuid::Uuid;

/// Test MongoDB wrapper that ensures proper cleanup
///
/// The container is stopped and removed when this struct is dropped.
pub struct TestMongo {
    #[allow(dead_code)]
    container: ContainerAsync<Mongo>,
    database: Database,
    pub connection_string: String,
}

impl TestMongo {
    /// Start a MongoDB 7 container and open a uniquely named database on it.
    pub async fn new() -> Self {
        let container = Mongo::default()
            .with_tag("7")
            .start()
            .await
            .expect("Failed to start MongoDB container");

        let host_port = container
            .get_host_port_ipv4(27017)
            .await
            .expect("Failed to get MongoDB port");

        let connection_string = format!("mongodb://127.0.0.1:{}", host_port);

        let client = Client::with_uri_str(&connection_string)
            .await
            .expect("Failed to connect to MongoDB");

        let name = format!("test_{}", Uuid::new_v4().simple());
        let database = client.database(&name);

        tracing::info!(port = host_port, database = %name, "Test MongoDB ready (mongo 7)");

        Self {
            container,
            database,
            connection_string,
        }
    }

    pub fn database(&self) -> &Database {
        &self.database
    }
}
