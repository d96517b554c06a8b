use crate::modules::accounts::adapters::outbound::user_store::UserStore;
use crate::modules::accounts::core::user::{StoredUser, User};
use crate::shared::core::primitives::UserId;
use crate::shared::infrastructure::database::StoreError;
use crate::shared::infrastructure::database::in_memory::InMemoryTx;

#[derive(Debug, Clone, Copy, Default)]
pub struct InMemoryUserStore;

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl UserStore<InMemoryTx> for InMemoryUserStore {
    async fn create_user(
        &self,
        tx: &mut InMemoryTx,
        username: &str,
        password_hash: &str,
        admin: bool,
    ) -> Result<Option<User>, StoreError> {
        if self.find_by_username(tx, username).await?.is_some() {
            return Ok(None);
        }

        let tables = tx.tables_mut();
        let id = UserId::new(tables.last_user_id + 1)
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        tables.last_user_id = id.get();

        let user = User {
            id,
            username: username.to_string(),
            admin,
        };
        tables.users.insert(
            id,
            StoredUser {
                user: user.clone(),
                password_hash: password_hash.to_string(),
            },
        );
        Ok(Some(user))
    }

    async fn find_by_username(
        &self,
        tx: &mut InMemoryTx,
        username: &str,
    ) -> Result<Option<StoredUser>, StoreError> {
        Ok(tx
            .tables()
            .users
            .values()
            .find(|stored| stored.user.username == username)
            .cloned())
    }
}
