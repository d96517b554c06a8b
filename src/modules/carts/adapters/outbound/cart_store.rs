use crate::modules::carts::core::cart::Cart;
use crate::shared::core::primitives::UserId;
use crate::shared::infrastructure::database::StoreError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// One cart per user, persisted inside the caller's transaction `Tx`.
#[async_trait]
pub trait CartStore<Tx: Send>: Send + Sync {
    async fn find_cart(&self, tx: &mut Tx, user_id: UserId) -> Result<Option<Cart>, StoreError>;

    /// Like [`CartStore::find_cart`], but holds the user's cart exclusively
    /// until `tx` ends, so concurrent updates of one cart are serialised.
    async fn lock_cart(&self, tx: &mut Tx, user_id: UserId) -> Result<Option<Cart>, StoreError>;

    /// Insert or replace the user's book list and touch its activity timestamp.
    async fn upsert_cart(&self, tx: &mut Tx, cart: &Cart) -> Result<(), StoreError>;

    /// Returns whether a cart was deleted.
    async fn delete_cart(&self, tx: &mut Tx, user_id: UserId) -> Result<bool, StoreError>;

    /// Delete every cart last touched at or before `cutoff` and return them.
    async fn delete_inactive_since(
        &self,
        tx: &mut Tx,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<Cart>, StoreError>;
}
