//! PostgreSQL backing store.
//!
//! Transactions are plain `sqlx` transactions; a handle dropped without
//! commit is rolled back by the driver.

use crate::shared::infrastructure::database::{StoreError, UnitOfWork};
use sqlx::{PgPool, Postgres, Transaction};

#[derive(Debug, Clone)]
pub struct PgDatabase {
    pool: PgPool,
}

impl PgDatabase {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to `PostgreSQL`.
    ///
    /// # Errors
    ///
    /// Returns an error if the DSN is empty or the connection cannot be established.
    pub async fn connect(dsn: &str) -> Result<Self, StoreError> {
        if dsn.trim().is_empty() {
            return Err(StoreError::Backend("no postgres DSN provided".into()));
        }
        let pool = PgPool::connect(dsn).await?;
        Ok(Self::new(pool))
    }

    /// Apply the schema in `migrations/`.
    ///
    /// # Errors
    ///
    /// Returns an error if a migration fails.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(format!("migration failed: {e}")))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

#[async_trait::async_trait]
impl UnitOfWork for PgDatabase {
    type Tx = Transaction<'static, Postgres>;

    async fn begin(&self) -> Result<Self::Tx, StoreError> {
        Ok(self.pool.begin().await?)
    }

    async fn commit(&self, tx: Self::Tx) -> Result<(), StoreError> {
        Ok(tx.commit().await?)
    }

    async fn rollback(&self, tx: Self::Tx) -> Result<(), StoreError> {
        Ok(tx.rollback().await?)
    }
}
