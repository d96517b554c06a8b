use crate::modules::carts::adapters::outbound::cart_store::CartStore;
use crate::modules::carts::core::cart::Cart;
use crate::modules::carts::core::diff::{CartDiff, StockChange};
use crate::modules::catalog::adapters::outbound::inventory_store::InventoryStore;
use crate::shared::core::primitives::{BookId, InvalidId, UserId};
use crate::shared::infrastructure::database::{
    StoreError, TransactionError, UnitOfWork, run_in_transaction,
};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CartError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("not enough stock for book {0}")]
    NotEnoughStock(BookId),

    #[error("{0}")]
    TransactionFailure(String),
}

impl From<InvalidId> for CartError {
    fn from(err: InvalidId) -> Self {
        CartError::InvalidInput(err.to_string())
    }
}

impl From<StoreError> for CartError {
    fn from(err: StoreError) -> Self {
        CartError::TransactionFailure(format!("failed executing transaction: {err}"))
    }
}

impl From<TransactionError<CartError>> for CartError {
    fn from(err: TransactionError<CartError>) -> Self {
        match err {
            TransactionError::Work(inner) => inner,
            other => CartError::TransactionFailure(other.to_string()),
        }
    }
}

/// Keeps carts and stock counters consistent. Every operation runs in one
/// transaction; a unit sitting in a cart is a unit missing from stock.
pub struct CartConsistencyEngine<TDb, TInventory, TCarts>
where
    TDb: UnitOfWork + 'static,
    TInventory: InventoryStore<TDb::Tx> + 'static,
    TCarts: CartStore<TDb::Tx> + 'static,
{
    db: Arc<TDb>,
    inventory: Arc<TInventory>,
    carts: Arc<TCarts>,
}

impl<TDb, TInventory, TCarts> CartConsistencyEngine<TDb, TInventory, TCarts>
where
    TDb: UnitOfWork + 'static,
    TInventory: InventoryStore<TDb::Tx> + 'static,
    TCarts: CartStore<TDb::Tx> + 'static,
{
    pub fn new(db: Arc<TDb>, inventory: Arc<TInventory>, carts: Arc<TCarts>) -> Self {
        Self {
            db,
            inventory,
            carts,
        }
    }

    /// Replace the user's cart with `book_ids` and move stock by the
    /// difference: units added are taken from stock, units dropped go back.
    /// An empty list removes the cart.
    pub async fn update_cart_and_stocks(
        &self,
        user_id: UserId,
        book_ids: Vec<BookId>,
    ) -> Result<Cart, CartError> {
        let inventory = Arc::clone(&self.inventory);
        let carts = Arc::clone(&self.carts);

        let (cart, diff) = run_in_transaction(&*self.db, move |tx| {
            Box::pin(async move {
                let next = Cart::new(user_id, book_ids);
                for book_id in next.quantities().keys() {
                    if inventory.get_book(tx, *book_id).await?.is_none() {
                        return Err(CartError::InvalidInput(format!(
                            "book {book_id} does not exist"
                        )));
                    }
                }

                let previous = carts.lock_cart(tx, user_id).await?;
                let previous_ids = previous.as_ref().map(Cart::book_ids).unwrap_or_default();
                let diff = CartDiff::between(previous_ids, next.book_ids());

                if next.is_empty() {
                    carts.delete_cart(tx, user_id).await?;
                } else {
                    carts.upsert_cart(tx, &next).await?;
                }
                apply_changes(&*inventory, tx, &diff).await?;

                Ok((next, diff))
            })
        })
        .await?;

        tracing::info!(
            user_id = %user_id,
            units = cart.units(),
            reserved = diff.reserved_units(),
            released = diff.released_units(),
            "cart updated"
        );
        Ok(cart)
    }

    /// Whether current stock covers every book in `cart`. Never mutates.
    pub async fn check_stocks(&self, cart: &Cart) -> Result<bool, CartError> {
        let inventory = Arc::clone(&self.inventory);
        let quantities = cart.quantities();

        let sufficient = run_in_transaction(&*self.db, move |tx| {
            Box::pin(async move {
                let mut sufficient = true;
                for (book_id, wanted) in quantities {
                    let book = inventory
                        .get_book(tx, book_id)
                        .await?
                        .ok_or_else(|| CartError::NotFound(format!("book {book_id}")))?;
                    sufficient &= book.stock >= wanted;
                }
                Ok::<_, CartError>(sufficient)
            })
        })
        .await?;

        Ok(sufficient)
    }

    /// Finalise the user's cart. Stock was reserved when the books were added,
    /// so the cart is only removed here.
    pub async fn checkout(&self, user_id: UserId) -> Result<Cart, CartError> {
        let carts = Arc::clone(&self.carts);

        let cart = run_in_transaction(&*self.db, move |tx| {
            Box::pin(async move {
                let cart = carts
                    .lock_cart(tx, user_id)
                    .await?
                    .filter(|cart| !cart.is_empty())
                    .ok_or_else(|| CartError::NotFound(format!("cart for user {user_id}")))?;
                carts.delete_cart(tx, user_id).await?;
                Ok::<_, CartError>(cart)
            })
        })
        .await?;

        tracing::info!(user_id = %user_id, units = cart.units(), "cart checked out");
        Ok(cart)
    }

    pub async fn get_cart(&self, user_id: UserId) -> Result<Cart, CartError> {
        let carts = Arc::clone(&self.carts);

        let cart = run_in_transaction(&*self.db, move |tx| {
            Box::pin(async move {
                carts
                    .find_cart(tx, user_id)
                    .await?
                    .ok_or_else(|| CartError::NotFound(format!("cart for user {user_id}")))
            })
        })
        .await?;

        Ok(cart)
    }

    /// Remove the user's cart and return its units to stock. Returns whether
    /// a cart existed.
    pub async fn delete_cart(&self, user_id: UserId) -> Result<bool, CartError> {
        let inventory = Arc::clone(&self.inventory);
        let carts = Arc::clone(&self.carts);

        let released = run_in_transaction(&*self.db, move |tx| {
            Box::pin(async move {
                let Some(cart) = carts.lock_cart(tx, user_id).await? else {
                    return Ok::<_, CartError>(None);
                };
                carts.delete_cart(tx, user_id).await?;
                let diff = CartDiff::between(cart.book_ids(), &[]);
                apply_changes(&*inventory, tx, &diff).await?;
                Ok(Some(diff.released_units()))
            })
        })
        .await?;

        if let Some(released) = released {
            tracing::info!(user_id = %user_id, released, "cart deleted");
        }
        Ok(released.is_some())
    }

    /// Delete every cart untouched for at least `max_age` and return its
    /// units to stock. Returns how many carts were removed.
    pub async fn clean_expired_carts(&self, max_age: Duration) -> Result<usize, CartError> {
        let age = chrono::Duration::from_std(max_age)
            .map_err(|e| CartError::InvalidInput(format!("max age out of range: {e}")))?;
        let cutoff = Utc::now()
            .checked_sub_signed(age)
            .ok_or_else(|| CartError::InvalidInput("max age out of range".into()))?;

        let inventory = Arc::clone(&self.inventory);
        let carts = Arc::clone(&self.carts);

        let (removed, released) = run_in_transaction(&*self.db, move |tx| {
            Box::pin(async move {
                let expired = carts.delete_inactive_since(tx, cutoff).await?;
                // One pass over all expired carts, so books are released in
                // ascending id order across carts too.
                let all: Vec<BookId> = expired
                    .iter()
                    .flat_map(|cart| cart.book_ids().iter().copied())
                    .collect();
                let diff = CartDiff::between(&all, &[]);
                apply_changes(&*inventory, tx, &diff).await?;
                Ok::<_, CartError>((expired.len(), diff.released_units()))
            })
        })
        .await?;

        if removed > 0 {
            tracing::info!(removed, released, %cutoff, "expired carts removed");
        }
        Ok(removed)
    }
}

/// Apply `diff` to stock in ascending book order, failing on the first book
/// that cannot cover a reservation.
async fn apply_changes<Tx, TInventory>(
    inventory: &TInventory,
    tx: &mut Tx,
    diff: &CartDiff,
) -> Result<(), CartError>
where
    Tx: Send,
    TInventory: InventoryStore<Tx> + ?Sized,
{
    for (book_id, change) in diff.changes() {
        match change {
            StockChange::Reserve(units) => {
                for _ in 0..units {
                    if !inventory.decrement_stock(tx, book_id).await? {
                        tracing::debug!(book_id = %book_id, "stock exhausted");
                        return Err(CartError::NotEnoughStock(book_id));
                    }
                }
            }
            StockChange::Release(units) => {
                for _ in 0..units {
                    inventory.increment_stock(tx, book_id).await?;
                }
            }
        }
    }
    Ok(())
}
