/// Per-request unit of work
///
/// A `Session` wraps one database transaction. Handlers begin a session for
/// each request and hand it to the service layer; read operations borrow it,
/// mutating operations consume it and commit. A session dropped without
/// `commit` rolls back.
///
/// # Example
///
/// ```no_run
/// use taskmanager_shared::db::session::Session;
/// use taskmanager_shared::models::user::User;
/// use sqlx::SqlitePool;
///
/// # async fn example(pool: SqlitePool) -> Result<(), sqlx::Error> {
/// let mut session = Session::begin(&pool).await?;
/// let users = User::list(session.conn()).await?;
/// session.commit().await?;
/// # Ok(())
/// # }
/// ```

use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};
use tracing::debug;

/// One transaction bound to a single request
pub struct Session {
    tx: Transaction<'static, Sqlite>,
}

impl Session {
    /// Begins a new transaction on a pooled connection
    ///
    /// # Errors
    ///
    /// Returns an error if no connection can be acquired within the pool's
    /// acquire timeout, or if `BEGIN` fails.
    pub async fn begin(pool: &SqlitePool) -> Result<Self, sqlx::Error> {
        let tx = pool.begin().await?;
        debug!("Session opened");
        Ok(Self { tx })
    }

    /// Connection to run queries on, inside this session's transaction
    pub fn conn(&mut self) -> &mut SqliteConnection {
        &mut self.tx
    }

    /// Commits the transaction and releases the connection
    pub async fn commit(self) -> Result<(), sqlx::Error> {
        self.tx.commit().await?;
        debug!("Session committed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::{create_pool, DatabaseConfig};

    async fn scratch_pool() -> SqlitePool {
        let pool = create_pool(DatabaseConfig::in_memory()).await.unwrap();
        sqlx::query("CREATE TABLE scratch (value INTEGER NOT NULL)")
            .execute(&pool)
            .await
            .unwrap();
        pool
    }

    async fn row_count(pool: &SqlitePool) -> i64 {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM scratch")
            .fetch_one(pool)
            .await
            .unwrap();
        count
    }

    #[tokio::test]
    async fn test_commit_persists_writes() {
        let pool = scratch_pool().await;

        let mut session = Session::begin(&pool).await.unwrap();
        sqlx::query("INSERT INTO scratch (value) VALUES (1)")
            .execute(session.conn())
            .await
            .unwrap();
        session.commit().await.unwrap();

        assert_eq!(row_count(&pool).await, 1);
    }

    #[tokio::test]
    async fn test_drop_without_commit_rolls_back() {
        let pool = scratch_pool().await;

        {
            let mut session = Session::begin(&pool).await.unwrap();
            sqlx::query("INSERT INTO scratch (value) VALUES (1)")
                .execute(session.conn())
                .await
                .unwrap();
        }

        assert_eq!(row_count(&pool).await, 0);
    }
}
