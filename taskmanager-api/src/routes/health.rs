/// Health check endpoint
///
/// Reports whether the server is running, whether the database answers, how
/// far the schema has been migrated, and how busy the connection pool is.
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "database": "connected",
///   "migrations": { "applied": 2, "latest_version": 20240315000000, "up_to_date": true },
///   "pool": { "size": 1, "idle": 1, "active": 0 }
/// }
/// ```
///
/// An unreachable database or pending migrations yield `503 Service Unavailable`
/// with the usual error body.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use taskmanager_shared::db::{
    migrations::get_migration_status,
    pool::{get_pool_stats, health_check as ping},
};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Application version
    pub version: String,

    /// Database status
    pub database: String,

    /// Schema migration state
    pub migrations: MigrationsHealth,

    /// Connection pool usage
    pub pool: PoolHealth,
}

/// Migration part of the health report
#[derive(Debug, Serialize, Deserialize)]
pub struct MigrationsHealth {
    /// Number of applied migrations
    pub applied: usize,

    /// Version of the newest applied migration
    pub latest_version: Option<i64>,

    /// Whether every embedded migration has been applied
    pub up_to_date: bool,
}

/// Pool part of the health report
#[derive(Debug, Serialize, Deserialize)]
pub struct PoolHealth {
    pub size: usize,
    pub idle: usize,
    pub active: usize,
}

/// Health check handler
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    if let Err(e) = ping(&state.db).await {
        tracing::warn!(error = %e, "Health check: database unreachable");
        return Err(ApiError::ServiceUnavailable(
            "Database is unreachable".to_string(),
        ));
    }

    let status = get_migration_status(&state.db).await.map_err(|e| {
        tracing::warn!(error = %e, "Health check: migration status unavailable");
        ApiError::ServiceUnavailable("Migration status is unavailable".to_string())
    })?;

    if !status.is_up_to_date {
        return Err(ApiError::ServiceUnavailable(format!(
            "Database migrations are pending ({} applied)",
            status.applied_migrations
        )));
    }

    let stats = get_pool_stats(&state.db);

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: "connected".to_string(),
        migrations: MigrationsHealth {
            applied: status.applied_migrations,
            latest_version: status.latest_version,
            up_to_date: status.is_up_to_date,
        },
        pool: PoolHealth {
            size: stats.total_connections,
            idle: stats.idle_connections,
            active: stats.active_connections,
        },
    }))
}
