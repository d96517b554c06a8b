use crate::modules::accounts::adapters::outbound::token_resolver::{TokenIssuer, TokenResolver};
use crate::modules::accounts::adapters::outbound::user_store::UserStore;
use crate::modules::accounts::core::password::Passwords;
use crate::modules::accounts::service::{AccountService, StoreAccountService};
use crate::modules::carts::adapters::outbound::cart_store::CartStore;
use crate::modules::carts::engine::CartConsistencyEngine;
use crate::modules::carts::service::{CartService, EngineCartService};
use crate::modules::catalog::adapters::outbound::inventory_store::InventoryStore;
use crate::modules::catalog::service::{CatalogService, StoreCatalogService};
use crate::modules::categories::adapters::outbound::category_store::CategoryStore;
use crate::modules::categories::service::{CategoryService, StoreCategoryService};
use crate::shared::infrastructure::database::UnitOfWork;
use chrono::Duration;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<dyn AccountService>,
    pub categories: Arc<dyn CategoryService>,
    pub carts: Arc<dyn CartService>,
    pub catalog: Arc<dyn CatalogService>,
    pub tokens: Arc<dyn TokenResolver>,
}

/// One backing store and the repositories that run inside its transactions.
pub struct Stores<TDb, TUsers, TCategories, TInventory, TCarts> {
    pub db: Arc<TDb>,
    pub users: Arc<TUsers>,
    pub categories: Arc<TCategories>,
    pub inventory: Arc<TInventory>,
    pub carts: Arc<TCarts>,
}

/// How sessions are opened: password hashing, token store and token lifetime.
pub struct Sessions<TTokens> {
    pub passwords: Passwords,
    pub tokens: Arc<TTokens>,
    pub token_ttl: Duration,
}

impl AppState {
    /// Build every service over one backing store.
    pub fn from_stores<TDb, TUsers, TCategories, TInventory, TCarts, TTokens>(
        stores: Stores<TDb, TUsers, TCategories, TInventory, TCarts>,
        sessions: Sessions<TTokens>,
    ) -> Self
    where
        TDb: UnitOfWork + 'static,
        TUsers: UserStore<TDb::Tx> + 'static,
        TCategories: CategoryStore<TDb::Tx> + 'static,
        TInventory: InventoryStore<TDb::Tx> + 'static,
        TCarts: CartStore<TDb::Tx> + 'static,
        TTokens: TokenResolver + TokenIssuer + 'static,
    {
        let Stores {
            db,
            users,
            categories,
            inventory,
            carts,
        } = stores;
        let Sessions {
            passwords,
            tokens,
            token_ttl,
        } = sessions;

        let issuer: Arc<dyn TokenIssuer> = tokens.clone();
        let engine = CartConsistencyEngine::new(Arc::clone(&db), Arc::clone(&inventory), carts);
        Self {
            accounts: Arc::new(StoreAccountService::new(
                Arc::clone(&db),
                users,
                passwords,
                issuer,
                token_ttl,
            )),
            categories: Arc::new(StoreCategoryService::new(Arc::clone(&db), categories)),
            carts: Arc::new(EngineCartService::new(engine)),
            catalog: Arc::new(StoreCatalogService::new(db, inventory)),
            tokens,
        }
    }
}
