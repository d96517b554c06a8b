//! Cart repository over the `carts` table.

use crate::modules::carts::adapters::outbound::cart_store::CartStore;
use crate::modules::carts::core::cart::Cart;
use crate::modules::catalog::adapters::outbound::inventory_postgres::decode_error;
use crate::shared::core::primitives::{BookId, UserId};
use crate::shared::infrastructure::database::StoreError;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

const FIND_CART_SQL: &str = include_str!("sql/find_cart.sql");
const LOCK_USER_SQL: &str = include_str!("sql/lock_user.sql");
const UPSERT_CART_SQL: &str = include_str!("sql/upsert_cart.sql");
const DELETE_CART_SQL: &str = include_str!("sql/delete_cart.sql");
const DELETE_INACTIVE_CARTS_SQL: &str = include_str!("sql/delete_inactive_carts.sql");

#[derive(Debug, Clone, Copy, Default)]
pub struct PgCartStore;

impl PgCartStore {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl CartStore<Transaction<'static, Postgres>> for PgCartStore {
    async fn find_cart(
        &self,
        tx: &mut Transaction<'static, Postgres>,
        user_id: UserId,
    ) -> Result<Option<Cart>, StoreError> {
        let cart = query_as::<Postgres, Cart>(FIND_CART_SQL)
            .bind(user_id.get())
            .fetch_optional(&mut **tx)
            .await?;
        Ok(cart)
    }

    async fn lock_cart(
        &self,
        tx: &mut Transaction<'static, Postgres>,
        user_id: UserId,
    ) -> Result<Option<Cart>, StoreError> {
        // Row locks cannot cover a cart that does not exist yet, so lock the user.
        query(LOCK_USER_SQL)
            .bind(user_id.get())
            .execute(&mut **tx)
            .await?;
        self.find_cart(tx, user_id).await
    }

    async fn upsert_cart(
        &self,
        tx: &mut Transaction<'static, Postgres>,
        cart: &Cart,
    ) -> Result<(), StoreError> {
        let book_ids: Vec<i64> = cart.book_ids().iter().map(|id| id.get()).collect();
        query(UPSERT_CART_SQL)
            .bind(cart.user_id().get())
            .bind(book_ids)
            .bind(Utc::now())
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    async fn delete_cart(
        &self,
        tx: &mut Transaction<'static, Postgres>,
        user_id: UserId,
    ) -> Result<bool, StoreError> {
        let result = query(DELETE_CART_SQL)
            .bind(user_id.get())
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_inactive_since(
        &self,
        tx: &mut Transaction<'static, Postgres>,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<Cart>, StoreError> {
        let mut carts = query_as::<Postgres, Cart>(DELETE_INACTIVE_CARTS_SQL)
            .bind(cutoff)
            .fetch_all(&mut **tx)
            .await?;
        carts.sort_by_key(Cart::user_id);
        Ok(carts)
    }
}

impl<'r> FromRow<'r, PgRow> for Cart {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let user_id: i64 = row.try_get("user_id")?;
        let raw_book_ids: Vec<i64> = row.try_get("book_ids")?;

        let book_ids = raw_book_ids
            .into_iter()
            .map(BookId::new)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| decode_error("book_ids", e))?;

        Ok(Cart::new(
            UserId::new(user_id).map_err(|e| decode_error("user_id", e))?,
            book_ids,
        ))
    }
}
