/// Database models for TaskManager
///
/// This module contains the database models and their queries. Queries take
/// a `&mut SqliteConnection` so they run inside whatever transaction the
/// caller holds (see `db::session::Session`).
///
/// # Models
///
/// - `user`: User accounts with a derived slug
/// - `task`: Tasks owned by a user, removed together with their owner
///
/// # Example
///
/// ```no_run
/// use taskmanager_shared::db::session::Session;
/// use taskmanager_shared::models::user::{CreateUser, User};
/// use sqlx::SqlitePool;
///
/// # async fn example(pool: SqlitePool) -> Result<(), sqlx::Error> {
/// let mut session = Session::begin(&pool).await?;
///
/// let new_user = CreateUser {
///     username: "John Doe".to_string(),
///     firstname: "John".to_string(),
///     lastname: "Doe".to_string(),
///     age: 30,
/// };
///
/// let user = User::create(session.conn(), new_user, "john-doe").await?;
/// session.commit().await?;
/// # Ok(())
/// # }
/// ```

pub mod task;
pub mod user;
