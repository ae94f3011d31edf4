/// Application state and router builder
///
/// This module defines the shared application state and provides a
/// function to build the Axum router with all routes and middleware.
///
/// The database handle is constructed once at startup and injected here;
/// handlers read it through the `State` extractor. There is no lazily
/// initialized global connection.
///
/// # Example
///
/// ```no_run
/// use tatboard_api::{app::AppState, config::Config};
/// use tatboard_shared::db::client::connect;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let db = connect(&config.database).await?;
/// let state = AppState::new(db, config);
/// let app = tatboard_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post, put},
    Router,
};
use mongodb::Database;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Both fields are cheap to clone (the database handle is internally
/// reference-counted).
#[derive(Clone)]
pub struct AppState {
    /// Database handle
    pub db: Database,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: Database, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                     # Health check
/// ├── /api/users/
/// │   ├── POST /create-user       # Signup
/// │   ├── GET  /user/:id          # Fetch one user
/// │   ├── PUT  /update/:id        # Partial update
/// │   └── POST /login             # Credential check
/// ├── /api/prjects/               # (historical path, kept for clients)
/// │   ├── GET  /                  # List with filters + pagination
/// │   ├── POST /                  # Create
/// │   └── GET  /:id               # Fetch one project
/// └── /api/tasks/
///     ├── GET  /                  # List with filters + pagination
///     ├── POST /                  # Create
///     └── PUT  /:id               # Partial update
/// ```
///
/// # Middleware Stack
///
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let user_routes = Router::new()
        .route("/create-user", post(routes::users::create_user))
        .route("/user/:id", get(routes::users::get_user))
        .route("/update/:id", put(routes::users::update_user))
        .route("/login", post(routes::users::login));

    let project_routes = Router::new()
        .route(
            "/",
            get(routes::projects::list_projects).post(routes::projects::create_project),
        )
        .route("/:id", get(routes::projects::get_project));

    let task_routes = Router::new()
        .route(
            "/",
            get(routes::tasks::list_tasks).post(routes::tasks::create_task),
        )
        .route("/:id", put(routes::tasks::update_task));

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        // Development mode: permissive CORS
        CorsLayer::permissive()
    } else {
        // Production mode: configure allowed origins
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .route("/health", get(routes::health::health_check))
        .nest("/api/users", user_routes)
        // "prjects" is a typo the original deployment shipped with;
        // existing clients depend on it
        .nest("/api/prjects", project_routes)
        .nest("/api/tasks", task_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}
