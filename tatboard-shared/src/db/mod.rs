/// Database layer for Tatboard
///
/// This module provides MongoDB client construction and health checks.
/// Document models live in the `models` module at crate root level.
///
/// The database handle is built once at startup and passed explicitly to
/// every component that needs it; there is no lazily-initialized global.
///
/// # Example
///
/// ```no_run
/// use tatboard_shared::db::client::{connect, DatabaseConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DatabaseConfig {
///         uri: std::env::var("MONGODB_URI")?,
///         ..Default::default()
///     };
///
///     let db = connect(&config).await?;
///     Ok(())
/// }
/// ```

pub mod client;
