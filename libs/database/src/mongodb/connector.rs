use mongodb::{Client, bson::doc, options::ClientOptions};
use std::time::Duration;
use tracing::info;

use super::MongoConfig;
use crate::common::{Backoff, DatabaseError, DatabaseResult};

/// Connect using a [`MongoConfig`] and verify the deployment answers a ping.
pub async fn connect_from_config(config: &MongoConfig) -> DatabaseResult<Client> {
    info!(url = %config.redacted_url(), "Connecting to MongoDB");

    let mut options = ClientOptions::parse(&config.url).await?;
    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
    options.server_selection_timeout =
        Some(Duration::from_secs(config.server_selection_timeout_secs));
    if let Some(ref app_name) = config.app_name {
        options.app_name = Some(app_name.clone());
    }

    let client = Client::with_options(options)?;

    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

    info!(database = %config.database, "Connected to MongoDB");
    Ok(client)
}

/// Connect with default pool settings.
pub async fn connect(url: &str) -> DatabaseResult<Client> {
    connect_from_config(&MongoConfig::new(url)).await
}

/// [`connect_from_config`] retried with exponential backoff; `None` uses
/// [`Backoff::default`].
///
/// ```ignore
/// let backoff = Backoff { retries: 10, ..Backoff::default() };
/// let client = connect_from_config_with_retry(&config, Some(backoff)).await?;
/// ```
pub async fn connect_from_config_with_retry(
    config: &MongoConfig,
    backoff: Option<Backoff>,
) -> DatabaseResult<Client> {
    backoff
        .unwrap_or_default()
        .run(|| connect_from_config(config))
        .await
}
