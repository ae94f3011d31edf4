/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - Test database setup and cleanup
/// - Router construction with injected state
/// - Request helpers driving the router directly (no network)
///
/// Integration tests need a reachable MongoDB deployment; when
/// `MONGODB_URI` is unset, `TestContext::new()` returns `None` and the
/// test skips itself.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::Database;
use tatboard_api::app::{build_router, AppState};
use tatboard_api::config::{ApiConfig, Config};
use tatboard_shared::db::client::{connect, DatabaseConfig};
use tower::ServiceExt;

/// Test context containing the database handle and a ready router
pub struct TestContext {
    pub db: Database,
    pub app: axum::Router,

    /// Unique run marker embedded in every business key this test
    /// creates, so cleanup removes exactly this run's documents
    pub marker: String,
}

impl TestContext {
    /// Creates a new test context, or `None` when `MONGODB_URI` is unset
    pub async fn new() -> Option<Self> {
        let uri = std::env::var("MONGODB_URI").ok()?;
        let database = std::env::var("MONGODB_TEST_DATABASE")
            .unwrap_or_else(|_| "tat_system_test".to_string());

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_origins: vec!["*".to_string()],
            },
            database: DatabaseConfig {
                uri,
                database,
                ..Default::default()
            },
        };

        let db = connect(&config.database)
            .await
            .expect("failed to connect to the test database");

        let state = AppState::new(db.clone(), config);
        let app = build_router(state);

        Some(Self {
            db,
            app,
            marker: ObjectId::new().to_hex(),
        })
    }

    /// Removes every document this run created
    pub async fn cleanup(&self) {
        let pattern = doc! { "$regex": &self.marker };

        let _ = self
            .db
            .collection::<mongodb::bson::Document>("users")
            .delete_many(doc! { "email": pattern.clone() }, None)
            .await;
        let _ = self
            .db
            .collection::<mongodb::bson::Document>("projects")
            .delete_many(doc! { "project_name": pattern.clone() }, None)
            .await;
        let _ = self
            .db
            .collection::<mongodb::bson::Document>("tasks")
            .delete_many(doc! { "task_title": pattern }, None)
            .await;
    }

    /// Unique email for this run
    pub fn email(&self, name: &str) -> String {
        format!("{}-{}@example.com", name, self.marker)
    }
}

/// Sends a request through the router and returns status + parsed body
pub async fn request(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder().method(method).uri(uri);

    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };

    (status, json)
}

/// Shorthand for a JSON POST
pub async fn post_json(
    app: &axum::Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    request(app, "POST", uri, Some(body)).await
}

/// Shorthand for a JSON PUT
pub async fn put_json(
    app: &axum::Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    request(app, "PUT", uri, Some(body)).await
}

/// Shorthand for a GET
pub async fn get(app: &axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    request(app, "GET", uri, None).await
}
