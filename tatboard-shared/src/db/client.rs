/// MongoDB client construction
///
/// This module builds the MongoDB client used by every controller. The
/// handle is created once at startup, verified with a ping, and then
/// injected into the application state; the driver pools and serializes
/// connections internally.
///
/// # Example
///
/// ```no_run
/// use tatboard_shared::db::client::{connect, ping, DatabaseConfig};
///
/// # async fn example() -> mongodb::error::Result<()> {
/// let config = DatabaseConfig {
///     uri: "mongodb://localhost:27017".to_string(),
///     ..Default::default()
/// };
///
/// let db = connect(&config).await?;
/// ping(&db).await?;
/// # Ok(())
/// # }
/// ```

use mongodb::{bson::doc, options::ClientOptions, Client, Database};
use std::time::Duration;
use tracing::{debug, info};

/// Configuration for the MongoDB client
///
/// All timeouts are specified in seconds for ease of configuration from
/// environment variables.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// MongoDB connection URI (e.g., "mongodb://localhost:27017")
    pub uri: String,

    /// Database to select (all collections live in one database)
    pub database: String,

    /// Maximum number of connections the driver may pool
    pub max_pool_size: u32,

    /// Timeout for establishing a connection (seconds)
    pub connect_timeout_seconds: u64,

    /// Timeout for server selection, i.e. how long an operation waits for
    /// a reachable server before failing (seconds)
    pub server_selection_timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            uri: String::new(),
            database: "tat_system".to_string(),
            max_pool_size: 10,
            connect_timeout_seconds: 10,
            server_selection_timeout_seconds: 30,
        }
    }
}

/// Creates a MongoDB client and returns a handle to the configured database
///
/// This function:
/// 1. Parses the connection URI and applies pool/timeout settings
/// 2. Selects the configured database
/// 3. Performs a ping to verify the deployment is reachable
///
/// # Errors
///
/// Returns an error if the URI is invalid or the deployment cannot be
/// reached within the server selection timeout.
///
/// # Example
///
/// ```no_run
/// use tatboard_shared::db::client::{connect, DatabaseConfig};
///
/// # async fn example() -> mongodb::error::Result<()> {
/// let config = DatabaseConfig {
///     uri: std::env::var("MONGODB_URI").unwrap(),
///     ..Default::default()
/// };
///
/// let db = connect(&config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn connect(config: &DatabaseConfig) -> mongodb::error::Result<Database> {
    info!(
        database = %config.database,
        max_pool_size = config.max_pool_size,
        "Connecting to MongoDB"
    );

    let mut options = ClientOptions::parse(&config.uri).await?;
    options.max_pool_size = Some(config.max_pool_size);
    options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_seconds));
    options.server_selection_timeout =
        Some(Duration::from_secs(config.server_selection_timeout_seconds));

    let client = Client::with_options(options)?;
    let db = client.database(&config.database);

    ping(&db).await?;

    info!("Connected to MongoDB");
    Ok(db)
}

/// Performs a health check against the database
///
/// Runs the `ping` command to verify the deployment is reachable and
/// responding.
///
/// # Errors
///
/// Returns an error if the ping command fails
pub async fn ping(db: &Database) -> mongodb::error::Result<()> {
    debug!("Performing database health check");
    db.run_command(doc! { "ping": 1 }, None).await?;
    debug!("Database health check passed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_config_default() {
        let config = DatabaseConfig::default();
        assert_eq!(config.database, "tat_system");
        assert_eq!(config.max_pool_size, 10);
        assert_eq!(config.connect_timeout_seconds, 10);
        assert_eq!(config.server_selection_timeout_seconds, 30);
    }

    #[test]
    fn test_database_config_clone() {
        let config = DatabaseConfig::default();
        let cloned = config.clone();
        assert_eq!(config.database, cloned.database);
        assert_eq!(config.uri, cloned.uri);
    }

    // Integration tests require a running MongoDB deployment.
    // These live in the tatboard-api tests/ directory.
}
