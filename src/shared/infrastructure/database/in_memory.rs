// In memory backing store for the users, categories, books and carts tables.
//
// Purpose
// - Run the cart engine, the services and the HTTP surface without PostgreSQL.
//
// Responsibilities
// - Serialise transactions: `begin` holds the tables lock until the handle is
//   committed, rolled back or dropped.
// - Stage writes on a copy of the tables and publish them only on commit.
// - Inject begin, commit and rollback failures for tests.

use crate::modules::accounts::core::user::StoredUser;
use crate::modules::carts::core::cart::Cart;
use crate::modules::catalog::core::book::Book;
use crate::modules::categories::core::category::Category;
use crate::shared::core::primitives::{BookId, CategoryId, UserId};
use crate::shared::infrastructure::database::{StoreError, UnitOfWork};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Debug, Clone)]
pub struct CartRow {
    pub cart: Cart,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub users: BTreeMap<UserId, StoredUser>,
    pub categories: BTreeMap<CategoryId, Category>,
    pub books: BTreeMap<BookId, Book>,
    pub carts: HashMap<UserId, CartRow>,
    pub last_user_id: i64,
    pub last_category_id: i64,
    pub last_book_id: i64,
}

/// Transaction handle. Holds the tables lock for its whole lifetime.
pub struct InMemoryTx {
    guard: OwnedMutexGuard<Tables>,
    staged: Tables,
}

impl InMemoryTx {
    pub fn tables(&self) -> &Tables {
        &self.staged
    }

    pub fn tables_mut(&mut self) -> &mut Tables {
        &mut self.staged
    }
}

#[derive(Default)]
pub struct InMemoryDatabase {
    tables: Arc<Mutex<Tables>>,
    is_offline: AtomicBool,
    fail_commit: AtomicBool,
    fail_rollback: AtomicBool,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_offline(&self, offline: bool) {
        self.is_offline.store(offline, Ordering::SeqCst);
    }

    pub fn set_commit_failure(&self, fail: bool) {
        self.fail_commit.store(fail, Ordering::SeqCst);
    }

    pub fn set_rollback_failure(&self, fail: bool) {
        self.fail_rollback.store(fail, Ordering::SeqCst);
    }

    /// Committed state of a book. Waits for any open transaction to finish.
    pub async fn book(&self, book_id: BookId) -> Option<Book> {
        self.tables.lock().await.books.get(&book_id).cloned()
    }

    /// Committed state of a user's cart. Waits for any open transaction to finish.
    pub async fn cart(&self, user_id: UserId) -> Option<Cart> {
        self.tables
            .lock()
            .await
            .carts
            .get(&user_id)
            .map(|row| row.cart.clone())
    }
}

#[async_trait::async_trait]
impl UnitOfWork for InMemoryDatabase {
    type Tx = InMemoryTx;

    async fn begin(&self) -> Result<InMemoryTx, StoreError> {
        if self.is_offline.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("database offline".into()));
        }
        let guard = Arc::clone(&self.tables).lock_owned().await;
        let staged = guard.clone();
        Ok(InMemoryTx { guard, staged })
    }

    async fn commit(&self, tx: InMemoryTx) -> Result<(), StoreError> {
        if self.fail_commit.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("commit rejected".into()));
        }
        let InMemoryTx { mut guard, staged } = tx;
        *guard = staged;
        Ok(())
    }

    async fn rollback(&self, tx: InMemoryTx) -> Result<(), StoreError> {
        drop(tx);
        if self.fail_rollback.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("rollback rejected".into()));
        }
        Ok(())
    }
}
