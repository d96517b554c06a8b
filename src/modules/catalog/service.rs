use crate::modules::catalog::adapters::outbound::inventory_store::{BookFilter, InventoryStore};
use crate::modules::catalog::core::book::{Book, BookChanges, BookError, NewBook};
use crate::shared::core::primitives::{BookId, InvalidId};
use crate::shared::infrastructure::database::{
    StoreError, TransactionError, UnitOfWork, run_in_transaction,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

pub const PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("book {0} not found")]
    NotFound(BookId),

    #[error("internal error")]
    Internal,
}

impl From<BookError> for CatalogError {
    fn from(err: BookError) -> Self {
        CatalogError::InvalidInput(err.to_string())
    }
}

impl From<InvalidId> for CatalogError {
    fn from(err: InvalidId) -> Self {
        CatalogError::InvalidInput(err.to_string())
    }
}

impl From<StoreError> for CatalogError {
    fn from(err: StoreError) -> Self {
        tracing::error!(error = %err, "catalog store failed");
        CatalogError::Internal
    }
}

impl From<TransactionError<CatalogError>> for CatalogError {
    fn from(err: TransactionError<CatalogError>) -> Self {
        match err {
            TransactionError::Work(inner) => inner,
            other => {
                tracing::error!(error = %other, "catalog transaction failed");
                CatalogError::Internal
            }
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// One page of books, optionally restricted to `category_ids`. Pages start at 1.
    async fn list_books(&self, category_ids: Vec<i64>, page: u32)
    -> Result<Vec<Book>, CatalogError>;

    async fn get_book(&self, book_id: i64) -> Result<Book, CatalogError>;

    async fn create_book(&self, book: NewBook) -> Result<Book, CatalogError>;

    /// Replace the catalog fields of a book. Stock is left as it is.
    async fn update_book(&self, book_id: i64, changes: BookChanges) -> Result<Book, CatalogError>;

    async fn delete_book(&self, book_id: i64) -> Result<(), CatalogError>;
}

pub struct StoreCatalogService<TDb, TInventory>
where
    TDb: UnitOfWork + 'static,
    TInventory: InventoryStore<TDb::Tx> + 'static,
{
    db: Arc<TDb>,
    inventory: Arc<TInventory>,
}

impl<TDb, TInventory> StoreCatalogService<TDb, TInventory>
where
    TDb: UnitOfWork + 'static,
    TInventory: InventoryStore<TDb::Tx> + 'static,
{
    pub fn new(db: Arc<TDb>, inventory: Arc<TInventory>) -> Self {
        Self { db, inventory }
    }
}

#[async_trait]
impl<TDb, TInventory> CatalogService for StoreCatalogService<TDb, TInventory>
where
    TDb: UnitOfWork + 'static,
    TInventory: InventoryStore<TDb::Tx> + 'static,
{
    async fn list_books(
        &self,
        category_ids: Vec<i64>,
        page: u32,
    ) -> Result<Vec<Book>, CatalogError> {
        let filter = BookFilter {
            category_ids,
            limit: Some(PAGE_SIZE),
            offset: page.saturating_sub(1).saturating_mul(PAGE_SIZE),
        };
        let inventory = Arc::clone(&self.inventory);

        let books = run_in_transaction(&*self.db, move |tx| {
            Box::pin(async move { Ok::<_, CatalogError>(inventory.list_books(tx, &filter).await?) })
        })
        .await?;
        Ok(books)
    }

    async fn get_book(&self, book_id: i64) -> Result<Book, CatalogError> {
        let book_id = BookId::new(book_id)?;
        let inventory = Arc::clone(&self.inventory);

        let book = run_in_transaction(&*self.db, move |tx| {
            Box::pin(async move {
                inventory
                    .get_book(tx, book_id)
                    .await?
                    .ok_or(CatalogError::NotFound(book_id))
            })
        })
        .await?;
        Ok(book)
    }

    async fn create_book(&self, book: NewBook) -> Result<Book, CatalogError> {
        let book = book.validate()?;
        let inventory = Arc::clone(&self.inventory);

        let created = run_in_transaction(&*self.db, move |tx| {
            Box::pin(async move { Ok::<_, CatalogError>(inventory.create_book(tx, book).await?) })
        })
        .await?;

        tracing::info!(book_id = %created.id, stock = created.stock, "book created");
        Ok(created)
    }

    async fn update_book(&self, book_id: i64, changes: BookChanges) -> Result<Book, CatalogError> {
        let book_id = BookId::new(book_id)?;
        let changes = changes.validate()?;
        let inventory = Arc::clone(&self.inventory);

        let updated = run_in_transaction(&*self.db, move |tx| {
            Box::pin(async move {
                inventory
                    .update_book(tx, book_id, changes)
                    .await?
                    .ok_or(CatalogError::NotFound(book_id))
            })
        })
        .await?;

        tracing::info!(book_id = %book_id, "book updated");
        Ok(updated)
    }

    async fn delete_book(&self, book_id: i64) -> Result<(), CatalogError> {
        let book_id = BookId::new(book_id)?;
        let inventory = Arc::clone(&self.inventory);

        run_in_transaction(&*self.db, move |tx| {
            Box::pin(async move {
                if inventory.delete_book(tx, book_id).await? {
                    Ok(())
                } else {
                    Err(CatalogError::NotFound(book_id))
                }
            })
        })
        .await?;

        tracing::info!(book_id = %book_id, "book deleted");
        Ok(())
    }
}
