//! Errors returned by service operations
//!
//! `NotFound` and `Conflict` are detected before any write is committed.
//! Everything else the store reports is passed through as `Database`.

/// Service result type alias
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failure of a service operation
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The referenced user ID does not exist
    #[error("User was not found")]
    NotFound,

    /// The username belongs to another user
    #[error("Duplicated username")]
    Conflict,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ServiceError {
    /// Maps a unique constraint violation to `Conflict`
    ///
    /// The existence pre-check and the write are separate statements, so a
    /// concurrent request can take the username in between. The constraint
    /// on `users.username` is what finally decides.
    pub fn from_write(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => ServiceError::Conflict,
            _ => ServiceError::Database(err),
        }
    }
}
