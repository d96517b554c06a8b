use crate::modules::accounts::core::user::{StoredUser, User};
use crate::shared::infrastructure::database::StoreError;
use async_trait::async_trait;

/// Accounts keyed by a unique username.
#[async_trait]
pub trait UserStore<Tx: Send>: Send + Sync {
    /// Returns `None` if the username is already taken.
    async fn create_user(
        &self,
        tx: &mut Tx,
        username: &str,
        password_hash: &str,
        admin: bool,
    ) -> Result<Option<User>, StoreError>;

    async fn find_by_username(
        &self,
        tx: &mut Tx,
        username: &str,
    ) -> Result<Option<StoredUser>, StoreError>;
}
