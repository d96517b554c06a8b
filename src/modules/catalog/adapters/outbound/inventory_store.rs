use crate::modules::catalog::core::book::{Book, BookChanges, NewBook};
use crate::shared::core::primitives::BookId;
use crate::shared::infrastructure::database::StoreError;
use async_trait::async_trait;

/// Which page of the catalog to read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    /// Empty means every category.
    pub category_ids: Vec<i64>,
    /// `None` means no limit.
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Keyed book storage. Every call runs inside the caller's transaction `Tx`,
/// so stock changes compose atomically with cart writes.
#[async_trait]
pub trait InventoryStore<Tx: Send>: Send + Sync {
    async fn get_book(&self, tx: &mut Tx, book_id: BookId) -> Result<Option<Book>, StoreError>;

    async fn list_books(&self, tx: &mut Tx, filter: &BookFilter) -> Result<Vec<Book>, StoreError>;

    async fn create_book(&self, tx: &mut Tx, book: NewBook) -> Result<Book, StoreError>;

    /// Overwrite the catalog fields of a book, leaving its stock alone.
    /// Returns `None` if the book does not exist.
    async fn update_book(
        &self,
        tx: &mut Tx,
        book_id: BookId,
        changes: BookChanges,
    ) -> Result<Option<Book>, StoreError>;

    /// Returns whether a book was deleted.
    async fn delete_book(&self, tx: &mut Tx, book_id: BookId) -> Result<bool, StoreError>;

    /// Take one unit if any is left: `stock = stock - 1 WHERE stock > 0`.
    /// Returns whether a unit was taken.
    async fn decrement_stock(&self, tx: &mut Tx, book_id: BookId) -> Result<bool, StoreError>;

    /// Return one unit to stock. A missing book is ignored.
    async fn increment_stock(&self, tx: &mut Tx, book_id: BookId) -> Result<(), StoreError>;
}
