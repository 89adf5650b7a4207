/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - A migrated in-memory database per test
/// - The application router wired to it
/// - Request helpers returning status and parsed JSON

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use sqlx::SqlitePool;
use taskmanager_api::app::{build_router, AppState};
use taskmanager_api::config::{ApiConfig, Config, DatabaseConfig};
use taskmanager_shared::db::migrations::run_migrations;
use taskmanager_shared::db::pool::{create_pool, DatabaseConfig as PoolConfig};
use taskmanager_shared::models::task::{CreateTask, Task};
use tower::ServiceExt;

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: SqlitePool,
    pub app: axum::Router,
}

impl TestContext {
    /// Creates a new test context with a fresh, migrated database
    pub async fn new() -> anyhow::Result<Self> {
        Self::build(true).await
    }

    /// Creates a test context whose database has no schema yet
    #[allow(dead_code)]
    pub async fn unmigrated() -> anyhow::Result<Self> {
        Self::build(false).await
    }

    async fn build(migrate: bool) -> anyhow::Result<Self> {
        let pool_config = PoolConfig::in_memory();

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_origins: vec!["*".to_string()],
            },
            database: DatabaseConfig {
                url: pool_config.url.clone(),
                max_connections: pool_config.max_connections,
            },
        };

        let db = create_pool(pool_config).await?;
        if migrate {
            run_migrations(&db).await?;
        }

        let state = AppState::new(db.clone(), config);
        let app = build_router(state);

        Ok(TestContext { db, app })
    }

    /// Sends a request and returns the status with the JSON body
    ///
    /// The body is `Value::Null` when the response isn't JSON.
    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, json)
    }

    /// Creates a user through the API and returns its ID
    pub async fn create_user(&self, username: &str) -> i64 {
        let (status, _) = self
            .send(
                "POST",
                "/user/create",
                Some(serde_json::json!({
                    "username": username,
                    "firstname": "John",
                    "lastname": "Doe",
                    "age": 30
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let (_, users) = self.send("GET", "/user/", None).await;
        users
            .as_array()
            .unwrap()
            .iter()
            .find(|u| u["username"] == username)
            .and_then(|u| u["id"].as_i64())
            .expect("Created user should be listed")
    }

    /// Inserts a task directly; the API has no task creation endpoint
    pub async fn create_task(&self, user_id: i64, title: &str) -> Task {
        let mut conn = self.db.acquire().await.unwrap();
        Task::create(
            &mut conn,
            CreateTask {
                user_id,
                title: title.to_string(),
                content: format!("{} details", title),
                priority: 0,
            },
        )
        .await
        .unwrap()
    }
}
