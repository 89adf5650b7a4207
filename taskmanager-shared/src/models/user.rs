/// User model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     username TEXT NOT NULL UNIQUE,
///     firstname TEXT NOT NULL,
///     lastname TEXT NOT NULL,
///     age INTEGER NOT NULL,
///     slug TEXT NOT NULL
/// );
/// ```
///
/// `slug` is written once, at creation. `update` never touches it.

use serde::{Deserialize, Serialize};
use sqlx::SqliteConnection;

/// User model representing a user account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID, assigned by the database
    pub id: i64,

    /// Login name, unique across all existing users
    pub username: String,

    /// Given name
    pub firstname: String,

    /// Family name
    pub lastname: String,

    /// Age in years
    pub age: i32,

    /// URL-safe form of the username at creation time
    pub slug: String,
}

/// Input for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Login name (must not be taken)
    pub username: String,

    /// Given name
    pub firstname: String,

    /// Family name
    pub lastname: String,

    /// Age in years
    pub age: i32,
}

/// Input for replacing an existing user
///
/// Every field is required: an update overwrites the whole record rather
/// than merging into it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUser {
    /// New login name
    pub username: String,

    /// New given name
    pub firstname: String,

    /// New family name
    pub lastname: String,

    /// New age
    pub age: i32,
}

impl User {
    /// Inserts a new user with the given slug
    ///
    /// # Returns
    ///
    /// The newly created user with its generated ID
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Username already exists (unique constraint violation)
    /// - Database connection fails
    pub async fn create(
        conn: &mut SqliteConnection,
        data: CreateUser,
        slug: &str,
    ) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, firstname, lastname, age, slug)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, username, firstname, lastname, age, slug
            "#,
        )
        .bind(data.username)
        .bind(data.firstname)
        .bind(data.lastname)
        .bind(data.age)
        .bind(slug)
        .fetch_one(conn)
        .await?;

        Ok(user)
    }

    /// Finds a user by ID
    ///
    /// # Returns
    ///
    /// The user if found, None otherwise
    pub async fn find_by_id(
        conn: &mut SqliteConnection,
        id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, firstname, lastname, age, slug
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(conn)
        .await?;

        Ok(user)
    }

    /// Checks whether a user with this ID exists
    pub async fn exists(conn: &mut SqliteConnection, id: i64) -> Result<bool, sqlx::Error> {
        let found: Option<(i64,)> = sqlx::query_as("SELECT id FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(conn)
            .await?;

        Ok(found.is_some())
    }

    /// Checks whether a username is already taken (exact match)
    pub async fn username_taken(
        conn: &mut SqliteConnection,
        username: &str,
    ) -> Result<bool, sqlx::Error> {
        let found: Option<(String,)> =
            sqlx::query_as("SELECT username FROM users WHERE username = ?")
                .bind(username)
                .fetch_optional(conn)
                .await?;

        Ok(found.is_some())
    }

    /// Lists all users in ID order
    pub async fn list(conn: &mut SqliteConnection) -> Result<Vec<Self>, sqlx::Error> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, firstname, lastname, age, slug
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(conn)
        .await?;

        Ok(users)
    }

    /// Overwrites every mutable field of a user
    ///
    /// The slug is left as it was at creation, even when the username changes.
    ///
    /// # Returns
    ///
    /// True if a row was updated, false if the user doesn't exist
    ///
    /// # Errors
    ///
    /// Returns an error if the new username belongs to another user
    /// (unique constraint violation) or the database connection fails
    pub async fn update(
        conn: &mut SqliteConnection,
        id: i64,
        data: UpdateUser,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET username = ?, firstname = ?, lastname = ?, age = ?
            WHERE id = ?
            "#,
        )
        .bind(data.username)
        .bind(data.firstname)
        .bind(data.lastname)
        .bind(data.age)
        .bind(id)
        .execute(conn)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes a user by ID
    ///
    /// The user's tasks go with it through the `ON DELETE CASCADE` foreign key.
    ///
    /// # Returns
    ///
    /// True if user was deleted, false if user didn't exist
    pub async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts total number of users
    ///
    /// Not used by the service; kept for inspection and seeding code.
    pub async fn count(conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(conn)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_user_requires_every_field() {
        let partial = json!({ "firstname": "Jane" });
        assert!(serde_json::from_value::<UpdateUser>(partial).is_err());

        let full = json!({
            "username": "jane",
            "firstname": "Jane",
            "lastname": "Roe",
            "age": 41
        });
        let update: UpdateUser = serde_json::from_value(full).unwrap();
        assert_eq!(update.username, "jane");
        assert_eq!(update.age, 41);
    }

    #[test]
    fn test_user_serializes_slug() {
        let user = User {
            id: 7,
            username: "John Doe".to_string(),
            firstname: "John".to_string(),
            lastname: "Doe".to_string(),
            age: 30,
            slug: "john-doe".to_string(),
        };

        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["slug"], "john-doe");
    }

    // Query tests run against an in-memory database in tests/user_service_tests.rs
}
