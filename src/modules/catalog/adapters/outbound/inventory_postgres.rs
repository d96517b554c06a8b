//! Inventory repository over the `books` table.

use crate::modules::catalog::adapters::outbound::inventory_store::{BookFilter, InventoryStore};
use crate::modules::catalog::core::book::{Book, BookChanges, NewBook};
use crate::shared::core::primitives::BookId;
use crate::shared::infrastructure::database::StoreError;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

const GET_BOOK_SQL: &str = include_str!("sql/get_book.sql");
const LIST_BOOKS_SQL: &str = include_str!("sql/list_books.sql");
const CREATE_BOOK_SQL: &str = include_str!("sql/create_book.sql");
const UPDATE_BOOK_SQL: &str = include_str!("sql/update_book.sql");
const DELETE_BOOK_SQL: &str = include_str!("sql/delete_book.sql");
const DECREMENT_STOCK_SQL: &str = include_str!("sql/decrement_stock.sql");
const INCREMENT_STOCK_SQL: &str = include_str!("sql/increment_stock.sql");

#[derive(Debug, Clone, Copy, Default)]
pub struct PgInventoryStore;

impl PgInventoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl InventoryStore<Transaction<'static, Postgres>> for PgInventoryStore {
    async fn get_book(
        &self,
        tx: &mut Transaction<'static, Postgres>,
        book_id: BookId,
    ) -> Result<Option<Book>, StoreError> {
        let book = query_as::<Postgres, Book>(GET_BOOK_SQL)
            .bind(book_id.get())
            .fetch_optional(&mut **tx)
            .await?;
        Ok(book)
    }

    async fn list_books(
        &self,
        tx: &mut Transaction<'static, Postgres>,
        filter: &BookFilter,
    ) -> Result<Vec<Book>, StoreError> {
        let books = query_as::<Postgres, Book>(LIST_BOOKS_SQL)
            .bind(&filter.category_ids)
            .bind(filter.limit.map(i64::from))
            .bind(i64::from(filter.offset))
            .fetch_all(&mut **tx)
            .await?;
        Ok(books)
    }

    async fn create_book(
        &self,
        tx: &mut Transaction<'static, Postgres>,
        book: NewBook,
    ) -> Result<Book, StoreError> {
        let price = price_column(book.price)?;

        let created = query_as::<Postgres, Book>(CREATE_BOOK_SQL)
            .bind(book.title)
            .bind(book.year)
            .bind(book.author)
            .bind(price)
            .bind(i64::from(book.stock))
            .bind(book.category_id)
            .fetch_one(&mut **tx)
            .await?;
        Ok(created)
    }

    async fn update_book(
        &self,
        tx: &mut Transaction<'static, Postgres>,
        book_id: BookId,
        changes: BookChanges,
    ) -> Result<Option<Book>, StoreError> {
        let price = price_column(changes.price)?;

        let updated = query_as::<Postgres, Book>(UPDATE_BOOK_SQL)
            .bind(book_id.get())
            .bind(changes.title)
            .bind(changes.year)
            .bind(changes.author)
            .bind(price)
            .bind(changes.category_id)
            .fetch_optional(&mut **tx)
            .await?;
        Ok(updated)
    }

    async fn delete_book(
        &self,
        tx: &mut Transaction<'static, Postgres>,
        book_id: BookId,
    ) -> Result<bool, StoreError> {
        let result = query(DELETE_BOOK_SQL)
            .bind(book_id.get())
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn decrement_stock(
        &self,
        tx: &mut Transaction<'static, Postgres>,
        book_id: BookId,
    ) -> Result<bool, StoreError> {
        let result = query(DECREMENT_STOCK_SQL)
            .bind(book_id.get())
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn increment_stock(
        &self,
        tx: &mut Transaction<'static, Postgres>,
        book_id: BookId,
    ) -> Result<(), StoreError> {
        query(INCREMENT_STOCK_SQL)
            .bind(book_id.get())
            .execute(&mut **tx)
            .await?;
        Ok(())
    }
}

fn price_column(price: u64) -> Result<i64, StoreError> {
    i64::try_from(price).map_err(|_| StoreError::Backend(format!("price {price} out of range")))
}

impl<'r> FromRow<'r, PgRow> for Book {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let id: i64 = row.try_get("id")?;
        let price: i64 = row.try_get("price")?;
        let stock: i64 = row.try_get("stock")?;

        Ok(Self {
            id: BookId::new(id).map_err(|e| decode_error("id", e))?,
            title: row.try_get("title")?,
            year: row.try_get("year")?,
            author: row.try_get("author")?,
            price: u64::try_from(price).map_err(|e| decode_error("price", e))?,
            stock: u32::try_from(stock).map_err(|e| decode_error("stock", e))?,
            category_id: row.try_get("category_id")?,
        })
    }
}

pub(crate) fn decode_error(
    column: &str,
    source: impl std::error::Error + Send + Sync + 'static,
) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(source),
    }
}
