//! User repository over the `users` table.

use crate::modules::accounts::adapters::outbound::user_store::UserStore;
use crate::modules::accounts::core::user::{StoredUser, User};
use crate::modules::catalog::adapters::outbound::inventory_postgres::decode_error;
use crate::shared::core::primitives::UserId;
use crate::shared::infrastructure::database::StoreError;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const FIND_USER_BY_USERNAME_SQL: &str = include_str!("sql/find_user_by_username.sql");

#[derive(Debug, Clone, Copy, Default)]
pub struct PgUserStore;

impl PgUserStore {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl UserStore<Transaction<'static, Postgres>> for PgUserStore {
    async fn create_user(
        &self,
        tx: &mut Transaction<'static, Postgres>,
        username: &str,
        password_hash: &str,
        admin: bool,
    ) -> Result<Option<User>, StoreError> {
        let user = query_as::<Postgres, User>(CREATE_USER_SQL)
            .bind(username)
            .bind(password_hash)
            .bind(admin)
            .fetch_optional(&mut **tx)
            .await?;
        Ok(user)
    }

    async fn find_by_username(
        &self,
        tx: &mut Transaction<'static, Postgres>,
        username: &str,
    ) -> Result<Option<StoredUser>, StoreError> {
        let stored = query_as::<Postgres, StoredUser>(FIND_USER_BY_USERNAME_SQL)
            .bind(username)
            .fetch_optional(&mut **tx)
            .await?;
        Ok(stored)
    }
}

impl<'r> FromRow<'r, PgRow> for User {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let id: i64 = row.try_get("id")?;

        Ok(Self {
            id: UserId::new(id).map_err(|e| decode_error("id", e))?,
            username: row.try_get("username")?,
            admin: row.try_get("admin")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for StoredUser {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            user: User::from_row(row)?,
            password_hash: row.try_get("password_hash")?,
        })
    }
}
