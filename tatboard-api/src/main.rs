//! # Tatboard API Server
//!
//! REST backend for project/task/user management backed by MongoDB.
//!
//! ## Usage
//!
//! ```bash
//! MONGODB_URI=mongodb://localhost:27017 cargo run -p tatboard-api
//! ```

use tatboard_api::{
    app::{build_router, AppState},
    config::Config,
};
use tatboard_shared::db::client::connect;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tatboard_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Tatboard API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    // Connect (and ping) before accepting traffic
    let db = connect(&config.database).await?;

    let addr = config.bind_address();
    let state = AppState::new(db, config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
