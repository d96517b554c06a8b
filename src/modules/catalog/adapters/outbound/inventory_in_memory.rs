use crate::modules::catalog::adapters::outbound::inventory_store::{BookFilter, InventoryStore};
use crate::modules::catalog::core::book::{Book, BookChanges, NewBook};
use crate::shared::core::primitives::BookId;
use crate::shared::infrastructure::database::StoreError;
use crate::shared::infrastructure::database::in_memory::InMemoryTx;

/// Inventory store over the in memory books table.
#[derive(Debug, Clone, Copy, Default)]
pub struct InMemoryInventoryStore;

impl InMemoryInventoryStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl InventoryStore<InMemoryTx> for InMemoryInventoryStore {
    async fn get_book(
        &self,
        tx: &mut InMemoryTx,
        book_id: BookId,
    ) -> Result<Option<Book>, StoreError> {
        Ok(tx.tables().books.get(&book_id).cloned())
    }

    async fn list_books(
        &self,
        tx: &mut InMemoryTx,
        filter: &BookFilter,
    ) -> Result<Vec<Book>, StoreError> {
        let matching = tx
            .tables()
            .books
            .values()
            .filter(|book| {
                filter.category_ids.is_empty() || filter.category_ids.contains(&book.category_id)
            })
            .skip(filter.offset as usize);

        let books: Vec<Book> = match filter.limit {
            Some(limit) => matching.take(limit as usize).cloned().collect(),
            None => matching.cloned().collect(),
        };
        Ok(books)
    }

    async fn create_book(&self, tx: &mut InMemoryTx, book: NewBook) -> Result<Book, StoreError> {
        let tables = tx.tables_mut();
        let id = BookId::new(tables.last_book_id + 1)
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        tables.last_book_id = id.get();

        let book = book.with_id(id);
        tables.books.insert(id, book.clone());
        Ok(book)
    }

    async fn update_book(
        &self,
        tx: &mut InMemoryTx,
        book_id: BookId,
        changes: BookChanges,
    ) -> Result<Option<Book>, StoreError> {
        let Some(book) = tx.tables_mut().books.get_mut(&book_id) else {
            return Ok(None);
        };
        changes.apply_to(book);
        Ok(Some(book.clone()))
    }

    async fn delete_book(&self, tx: &mut InMemoryTx, book_id: BookId) -> Result<bool, StoreError> {
        Ok(tx.tables_mut().books.remove(&book_id).is_some())
    }

    async fn decrement_stock(
        &self,
        tx: &mut InMemoryTx,
        book_id: BookId,
    ) -> Result<bool, StoreError> {
        match tx.tables_mut().books.get_mut(&book_id) {
            Some(book) if book.stock > 0 => {
                book.stock -= 1;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn increment_stock(&self, tx: &mut InMemoryTx, book_id: BookId) -> Result<(), StoreError> {
        if let Some(book) = tx.tables_mut().books.get_mut(&book_id) {
            book.stock = book
                .stock
                .checked_add(1)
                .ok_or_else(|| StoreError::Backend(format!("stock overflow for book {book_id}")))?;
        }
        Ok(())
    }
}
