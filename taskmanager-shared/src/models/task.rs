/// Task model and database operations
///
/// Tasks belong to exactly one user. The API only reads them; `create` exists
/// for seeding data.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     title TEXT NOT NULL,
///     content TEXT NOT NULL,
///     priority INTEGER NOT NULL DEFAULT 0,
///     completed BOOLEAN NOT NULL DEFAULT FALSE,
///     user_id INTEGER NOT NULL,
///     slug TEXT NOT NULL,
///     CONSTRAINT fk_tasks_user_id_users
///         FOREIGN KEY (user_id) REFERENCES users (id) ON DELETE CASCADE
/// );
/// ```

use serde::{Deserialize, Serialize};
use sqlx::SqliteConnection;

use crate::slug::slugify;

/// Task model representing a unit of work owned by a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID
    pub id: i64,

    /// Short title
    pub title: String,

    /// Free-form description
    pub content: String,

    /// Priority (higher is more urgent)
    pub priority: i32,

    /// Whether the task is done
    pub completed: bool,

    /// Owning user
    pub user_id: i64,

    /// URL-safe form of the title
    pub slug: String,
}

/// Input for creating a new task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    /// Owning user (must exist)
    pub user_id: i64,

    /// Short title
    pub title: String,

    /// Free-form description
    pub content: String,

    /// Priority (default 0)
    #[serde(default)]
    pub priority: i32,
}

impl Task {
    /// Creates a new, not yet completed task
    ///
    /// # Errors
    ///
    /// Returns an error if `user_id` doesn't reference an existing user
    /// (foreign key violation) or the database connection fails
    pub async fn create(
        conn: &mut SqliteConnection,
        data: CreateTask,
    ) -> Result<Self, sqlx::Error> {
        let slug = slugify(&data.title);

        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, content, priority, user_id, slug)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, title, content, priority, completed, user_id, slug
            "#,
        )
        .bind(data.title)
        .bind(data.content)
        .bind(data.priority)
        .bind(data.user_id)
        .bind(slug)
        .fetch_one(conn)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID
    ///
    /// No endpoint reads single tasks; this is for inspection and seeding code.
    pub async fn find_by_id(
        conn: &mut SqliteConnection,
        id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, content, priority, completed, user_id, slug
            FROM tasks
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(conn)
        .await?;

        Ok(task)
    }

    /// Lists every task owned by a user, in ID order
    pub async fn list_by_user(
        conn: &mut SqliteConnection,
        user_id: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, content, priority, completed, user_id, slug
            FROM tasks
            WHERE user_id = ?
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(conn)
        .await?;

        Ok(tasks)
    }

    /// Counts tasks owned by a user
    ///
    /// Used to report how many tasks a user deletion removes.
    pub async fn count_by_user(
        conn: &mut SqliteConnection,
        user_id: i64,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(conn)
            .await?;

        Ok(count)
    }
}
