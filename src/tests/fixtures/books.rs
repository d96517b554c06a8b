// Shared book fixtures: a builder for catalog input and a helper that seeds
// committed stock into an in memory database.

use crate::modules::catalog::adapters::outbound::inventory_in_memory::InMemoryInventoryStore;
use crate::modules::catalog::adapters::outbound::inventory_store::InventoryStore;
use crate::modules::catalog::core::book::NewBook;
use crate::shared::core::primitives::BookId;
use crate::shared::infrastructure::database::in_memory::InMemoryDatabase;
use crate::shared::infrastructure::database::run_in_transaction;

pub struct NewBookBuilder {
    inner: NewBook,
}

impl Default for NewBookBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl NewBookBuilder {
    pub fn new() -> Self {
        Self {
            inner: NewBook {
                title: "Nineteen Eighty-Four".to_string(),
                year: 1949,
                author: "George Orwell".to_string(),
                price: 1299,
                stock: 10,
                category_id: 1,
            },
        }
    }

    pub fn title(mut self, v: impl Into<String>) -> Self {
        self.inner.title = v.into();
        self
    }

    pub fn author(mut self, v: impl Into<String>) -> Self {
        self.inner.author = v.into();
        self
    }

    pub fn year(mut self, v: i32) -> Self {
        self.inner.year = v;
        self
    }

    pub fn price(mut self, v: u64) -> Self {
        self.inner.price = v;
        self
    }

    pub fn stock(mut self, v: u32) -> Self {
        self.inner.stock = v;
        self
    }

    pub fn category_id(mut self, v: i64) -> Self {
        self.inner.category_id = v;
        self
    }

    pub fn build(self) -> NewBook {
        self.inner
    }
}

/// Commit a new book with `stock` units and return its id.
pub async fn seed_book(db: &InMemoryDatabase, stock: u32) -> BookId {
    let book = NewBookBuilder::new().stock(stock).build();
    let created = run_in_transaction(db, move |tx| {
        Box::pin(async move { InMemoryInventoryStore::new().create_book(tx, book).await })
    })
    .await
    .expect("seeding a book should succeed");
    created.id
}
