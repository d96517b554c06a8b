use crate::modules::accounts::core::user::User;
use crate::modules::carts::adapters::outbound::cart_store::CartStore;
use crate::modules::carts::core::cart::Cart;
use crate::modules::carts::engine::{CartConsistencyEngine, CartError};
use crate::modules::catalog::adapters::outbound::inventory_store::InventoryStore;
use crate::shared::core::primitives::{BookId, book_ids_from_raw};
use crate::shared::infrastructure::database::UnitOfWork;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Cart failures as shown to callers. Storage detail is logged, never returned.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CartServiceError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("not enough stock for book {0}")]
    NotEnoughStock(BookId),

    #[error("internal error")]
    Internal,
}

impl From<CartError> for CartServiceError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::InvalidInput(message) => CartServiceError::InvalidInput(message),
            CartError::NotFound(what) => CartServiceError::NotFound(what),
            CartError::NotEnoughStock(book_id) => CartServiceError::NotEnoughStock(book_id),
            CartError::TransactionFailure(detail) => {
                tracing::error!(error = %detail, "cart transaction failed");
                CartServiceError::Internal
            }
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CartService: Send + Sync {
    /// Replace the caller's cart with `book_ids`. Repeated ids are quantities.
    async fn update_cart(&self, user: &User, book_ids: Vec<i64>) -> Result<Cart, CartServiceError>;

    async fn get_cart(&self, user: &User) -> Result<Cart, CartServiceError>;

    /// Whether current stock covers the caller's cart.
    async fn check_stocks(&self, user: &User) -> Result<bool, CartServiceError>;

    async fn checkout(&self, user: &User) -> Result<(), CartServiceError>;

    /// Returns whether the caller had a cart.
    async fn delete_cart(&self, user: &User) -> Result<bool, CartServiceError>;

    /// Returns how many carts were removed.
    async fn clean_expired_carts(&self, max_age: Duration) -> Result<usize, CartServiceError>;
}

pub struct EngineCartService<TDb, TInventory, TCarts>
where
    TDb: UnitOfWork + 'static,
    TInventory: InventoryStore<TDb::Tx> + 'static,
    TCarts: CartStore<TDb::Tx> + 'static,
{
    engine: CartConsistencyEngine<TDb, TInventory, TCarts>,
}

impl<TDb, TInventory, TCarts> EngineCartService<TDb, TInventory, TCarts>
where
    TDb: UnitOfWork + 'static,
    TInventory: InventoryStore<TDb::Tx> + 'static,
    TCarts: CartStore<TDb::Tx> + 'static,
{
    pub fn new(engine: CartConsistencyEngine<TDb, TInventory, TCarts>) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl<TDb, TInventory, TCarts> CartService for EngineCartService<TDb, TInventory, TCarts>
where
    TDb: UnitOfWork + 'static,
    TInventory: InventoryStore<TDb::Tx> + 'static,
    TCarts: CartStore<TDb::Tx> + 'static,
{
    async fn update_cart(&self, user: &User, book_ids: Vec<i64>) -> Result<Cart, CartServiceError> {
        let book_ids = book_ids_from_raw(&book_ids).map_err(CartError::from)?;
        Ok(self.engine.update_cart_and_stocks(user.id, book_ids).await?)
    }

    async fn get_cart(&self, user: &User) -> Result<Cart, CartServiceError> {
        Ok(self.engine.get_cart(user.id).await?)
    }

    async fn check_stocks(&self, user: &User) -> Result<bool, CartServiceError> {
        let cart = self.engine.get_cart(user.id).await?;
        Ok(self.engine.check_stocks(&cart).await?)
    }

    async fn checkout(&self, user: &User) -> Result<(), CartServiceError> {
        self.engine.checkout(user.id).await?;
        Ok(())
    }

    async fn delete_cart(&self, user: &User) -> Result<bool, CartServiceError> {
        Ok(self.engine.delete_cart(user.id).await?)
    }

    async fn clean_expired_carts(&self, max_age: Duration) -> Result<usize, CartServiceError> {
        Ok(self.engine.clean_expired_carts(max_age).await?)
    }
}
