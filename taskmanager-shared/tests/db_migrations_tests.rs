/// Integration tests for the embedded migrations
///
/// Each test runs against its own in-memory SQLite database.

use sqlx::SqlitePool;
use taskmanager_shared::db::migrations::{
    embedded_migration_count, get_migration_status, run_migrations,
};
use taskmanager_shared::db::pool::{create_pool, DatabaseConfig};

async fn fresh_pool() -> SqlitePool {
    create_pool(DatabaseConfig::in_memory())
        .await
        .expect("Failed to create pool")
}

#[tokio::test]
async fn test_run_migrations_creates_tables() {
    let pool = fresh_pool().await;

    run_migrations(&pool).await.expect("Migrations should succeed");

    let tables: Vec<(String,)> = sqlx::query_as(
        "SELECT name FROM sqlite_master
         WHERE type = 'table' AND name IN ('users', 'tasks')
         ORDER BY name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    let names: Vec<&str> = tables.iter().map(|(name,)| name.as_str()).collect();
    assert_eq!(names, vec!["tasks", "users"]);
}

#[tokio::test]
async fn test_run_migrations_is_idempotent() {
    let pool = fresh_pool().await;

    run_migrations(&pool).await.unwrap();
    run_migrations(&pool).await.expect("Second run should be a no-op");

    let status = get_migration_status(&pool).await.unwrap();
    assert_eq!(status.applied_migrations, embedded_migration_count());
}

#[tokio::test]
async fn test_migration_status_after_run() {
    let pool = fresh_pool().await;

    run_migrations(&pool).await.unwrap();

    let status = get_migration_status(&pool).await.unwrap();
    assert_eq!(status.applied_migrations, 2);
    assert_eq!(status.latest_version, Some(20240315000000));
    assert!(status.is_up_to_date);
}

#[tokio::test]
async fn test_tasks_foreign_key_cascades() {
    let pool = fresh_pool().await;
    run_migrations(&pool).await.unwrap();

    // (id, seq, table, from, to, on_update, on_delete, match)
    let fks: Vec<(i64, i64, String, String, String, String, String, String)> =
        sqlx::query_as("PRAGMA foreign_key_list(tasks)")
            .fetch_all(&pool)
            .await
            .unwrap();

    assert_eq!(fks.len(), 1);
    let fk = &fks[0];
    assert_eq!(fk.2, "users");
    assert_eq!(fk.3, "user_id");
    assert_eq!(fk.4, "id");
    assert_eq!(fk.6, "CASCADE");
}

#[tokio::test]
async fn test_deleting_user_row_removes_tasks_at_schema_level() {
    let pool = fresh_pool().await;
    run_migrations(&pool).await.unwrap();

    sqlx::query(
        "INSERT INTO users (id, username, firstname, lastname, age, slug)
         VALUES (1, 'owner', 'Owner', 'One', 30, 'owner')",
    )
    .execute(&pool)
    .await
    .unwrap();

    sqlx::query(
        "INSERT INTO tasks (title, content, user_id, slug)
         VALUES ('a', 'first', 1, 'a'), ('b', 'second', 1, 'b')",
    )
    .execute(&pool)
    .await
    .unwrap();

    sqlx::query("DELETE FROM users WHERE id = 1")
        .execute(&pool)
        .await
        .unwrap();

    let (remaining,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}

#[tokio::test]
async fn test_task_without_owner_is_rejected() {
    let pool = fresh_pool().await;
    run_migrations(&pool).await.unwrap();

    let result = sqlx::query(
        "INSERT INTO tasks (title, content, user_id, slug)
         VALUES ('orphan', 'no owner', 999, 'orphan')",
    )
    .execute(&pool)
    .await;

    assert!(result.is_err(), "Foreign key should reject a dangling user_id");
}

#[tokio::test]
async fn test_username_is_unique() {
    let pool = fresh_pool().await;
    run_migrations(&pool).await.unwrap();

    let insert = "INSERT INTO users (username, firstname, lastname, age, slug)
                  VALUES ('dup', 'A', 'B', 20, 'dup')";

    sqlx::query(insert).execute(&pool).await.unwrap();
    let err = sqlx::query(insert).execute(&pool).await.unwrap_err();

    let db_err = err.as_database_error().expect("Should be a database error");
    assert!(db_err.is_unique_violation());
}
