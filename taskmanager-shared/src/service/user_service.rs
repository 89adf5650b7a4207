/// User operations
///
/// Every operation is one check-then-act cycle inside the caller's session:
///
/// | Operation | Check | Act |
/// |---|---|---|
/// | `list_users` | — | select all users |
/// | `get_user` | user exists | return it |
/// | `list_tasks_for_user` | user exists | select its tasks |
/// | `create_user` | username free | insert with slug, commit |
/// | `update_user` | user exists | overwrite fields, commit |
/// | `delete_user` | user exists | delete (tasks cascade), commit |
///
/// # Example
///
/// ```no_run
/// use taskmanager_shared::db::session::Session;
/// use taskmanager_shared::models::user::CreateUser;
/// use taskmanager_shared::service::UserService;
/// use sqlx::SqlitePool;
///
/// # async fn example(pool: SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
/// let ack = UserService::create_user(
///     Session::begin(&pool).await?,
///     CreateUser {
///         username: "John Doe".to_string(),
///         firstname: "John".to_string(),
///         lastname: "Doe".to_string(),
///         age: 30,
///     },
/// )
/// .await?;
/// assert_eq!(ack.status_code, 201);
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::error::{ServiceError, ServiceResult};
use crate::db::session::Session;
use crate::models::task::Task;
use crate::models::user::{CreateUser, UpdateUser, User};
use crate::slug::slugify;

/// Confirmation returned by a committed write
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgment {
    /// HTTP status the write maps to (201 for create, 200 otherwise)
    pub status_code: u16,

    /// Human-readable outcome
    pub transaction: String,
}

impl Acknowledgment {
    fn created() -> Self {
        Self {
            status_code: 201,
            transaction: "Successful".to_string(),
        }
    }

    fn updated() -> Self {
        Self {
            status_code: 200,
            transaction: "User has been updated successfully".to_string(),
        }
    }

    fn deleted() -> Self {
        Self {
            status_code: 200,
            transaction: "User has been deleted successfully".to_string(),
        }
    }
}

/// Request-scoped user operations
pub struct UserService;

impl UserService {
    /// Lists every user in store order
    pub async fn list_users(session: &mut Session) -> ServiceResult<Vec<User>> {
        let users = User::list(session.conn()).await?;
        debug!(count = users.len(), "Listed users");
        Ok(users)
    }

    /// Returns the user with `user_id`
    ///
    /// # Errors
    ///
    /// `NotFound` if no such user exists
    pub async fn get_user(session: &mut Session, user_id: i64) -> ServiceResult<User> {
        User::find_by_id(session.conn(), user_id)
            .await?
            .ok_or(ServiceError::NotFound)
    }

    /// Returns every task owned by `user_id` (possibly none)
    ///
    /// # Errors
    ///
    /// `NotFound` if no such user exists
    pub async fn list_tasks_for_user(
        session: &mut Session,
        user_id: i64,
    ) -> ServiceResult<Vec<Task>> {
        if !User::exists(session.conn(), user_id).await? {
            return Err(ServiceError::NotFound);
        }

        let tasks = Task::list_by_user(session.conn(), user_id).await?;
        debug!(user_id, count = tasks.len(), "Listed tasks for user");
        Ok(tasks)
    }

    /// Creates a user, deriving its slug from the username
    ///
    /// # Errors
    ///
    /// `Conflict` if the username is already taken, whether caught by the
    /// pre-check or by the unique constraint on insert
    pub async fn create_user(mut session: Session, input: CreateUser) -> ServiceResult<Acknowledgment> {
        if User::username_taken(session.conn(), &input.username).await? {
            debug!(username = %input.username, "Username already taken");
            return Err(ServiceError::Conflict);
        }

        let slug = slugify(&input.username);
        let user = User::create(session.conn(), input, &slug)
            .await
            .map_err(ServiceError::from_write)?;

        session.commit().await?;

        info!(user_id = user.id, slug = %user.slug, "User created");
        Ok(Acknowledgment::created())
    }

    /// Replaces every mutable field of `user_id` with `input`
    ///
    /// The slug keeps its creation-time value even when the username changes.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no such user exists
    /// - `Conflict` if the new username belongs to another user
    pub async fn update_user(
        mut session: Session,
        user_id: i64,
        input: UpdateUser,
    ) -> ServiceResult<Acknowledgment> {
        if !User::exists(session.conn(), user_id).await? {
            return Err(ServiceError::NotFound);
        }

        User::update(session.conn(), user_id, input)
            .await
            .map_err(ServiceError::from_write)?;

        session.commit().await?;

        info!(user_id, "User updated");
        Ok(Acknowledgment::updated())
    }

    /// Deletes `user_id`; the schema removes the user's tasks with it
    ///
    /// # Errors
    ///
    /// `NotFound` if no such user exists
    pub async fn delete_user(mut session: Session, user_id: i64) -> ServiceResult<Acknowledgment> {
        if !User::exists(session.conn(), user_id).await? {
            return Err(ServiceError::NotFound);
        }

        let tasks_removed = Task::count_by_user(session.conn(), user_id).await?;
        User::delete(session.conn(), user_id).await?;

        session.commit().await?;

        info!(user_id, tasks_removed, "User deleted");
        Ok(Acknowledgment::deleted())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acknowledgment_status_codes() {
        assert_eq!(Acknowledgment::created().status_code, 201);
        assert_eq!(Acknowledgment::updated().status_code, 200);
        assert_eq!(Acknowledgment::deleted().status_code, 200);
    }

    #[test]
    fn test_acknowledgment_messages() {
        assert_eq!(Acknowledgment::created().transaction, "Successful");
        assert_eq!(
            Acknowledgment::deleted().transaction,
            "User has been deleted successfully"
        );
    }

    // Operation tests against a migrated in-memory database are in
    // tests/user_service_tests.rs
}
