use crate::modules::carts::adapters::outbound::cart_store::CartStore;
use crate::modules::carts::core::cart::Cart;
use crate::shared::core::primitives::UserId;
use crate::shared::infrastructure::database::StoreError;
use crate::shared::infrastructure::database::in_memory::{CartRow, InMemoryTx};
use chrono::{DateTime, Utc};

/// Cart store over the in memory carts table. The database lock already
/// serialises transactions, so locking a cart is a plain read.
#[derive(Debug, Clone, Copy, Default)]
pub struct InMemoryCartStore;

impl InMemoryCartStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl CartStore<InMemoryTx> for InMemoryCartStore {
    async fn find_cart(
        &self,
        tx: &mut InMemoryTx,
        user_id: UserId,
    ) -> Result<Option<Cart>, StoreError> {
        Ok(tx.tables().carts.get(&user_id).map(|row| row.cart.clone()))
    }

    async fn lock_cart(
        &self,
        tx: &mut InMemoryTx,
        user_id: UserId,
    ) -> Result<Option<Cart>, StoreError> {
        self.find_cart(tx, user_id).await
    }

    async fn upsert_cart(&self, tx: &mut InMemoryTx, cart: &Cart) -> Result<(), StoreError> {
        tx.tables_mut().carts.insert(
            cart.user_id(),
            CartRow {
                cart: cart.clone(),
                updated_at: Utc::now(),
            },
        );
        Ok(())
    }

    async fn delete_cart(&self, tx: &mut InMemoryTx, user_id: UserId) -> Result<bool, StoreError> {
        Ok(tx.tables_mut().carts.remove(&user_id).is_some())
    }

    async fn delete_inactive_since(
        &self,
        tx: &mut InMemoryTx,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<Cart>, StoreError> {
        let carts = &mut tx.tables_mut().carts;
        let expired: Vec<UserId> = carts
            .iter()
            .filter(|(_, row)| row.updated_at <= cutoff)
            .map(|(user_id, _)| *user_id)
            .collect();

        let mut removed: Vec<Cart> = expired
            .iter()
            .filter_map(|user_id| carts.remove(user_id))
            .map(|row| row.cart)
            .collect();
        removed.sort_by_key(Cart::user_id);
        Ok(removed)
    }
}
