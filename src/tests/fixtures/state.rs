// In memory wiring of the whole application for HTTP tests.

use crate::modules::accounts::adapters::outbound::token_resolver_in_memory::{
    DEFAULT_TOKEN_TTL_MINUTES, InMemoryTokenResolver,
};
use crate::modules::accounts::adapters::outbound::user_store_in_memory::InMemoryUserStore;
use crate::modules::accounts::core::password::Passwords;
use crate::modules::accounts::core::user::User;
use crate::modules::carts::adapters::outbound::cart_store_in_memory::InMemoryCartStore;
use crate::modules::catalog::adapters::outbound::inventory_in_memory::InMemoryInventoryStore;
use crate::modules::categories::adapters::outbound::category_store_in_memory::InMemoryCategoryStore;
use crate::shared::core::primitives::UserId;
use crate::shared::infrastructure::database::in_memory::InMemoryDatabase;
use crate::shell::state::{AppState, Sessions, Stores};
use axum::body::Body;
use axum::http::{Request, Response};
use chrono::Duration;
use http_body_util::BodyExt;
use std::sync::Arc;

pub struct TestApp {
    pub state: AppState,
    pub db: Arc<InMemoryDatabase>,
    pub tokens: Arc<InMemoryTokenResolver>,
}

#[allow(dead_code)]
impl TestApp {
    pub fn new() -> Self {
        let db = Arc::new(InMemoryDatabase::new());
        let tokens = Arc::new(InMemoryTokenResolver::new());
        let state = AppState::from_stores(
            Stores {
                db: db.clone(),
                users: Arc::new(InMemoryUserStore::new()),
                categories: Arc::new(InMemoryCategoryStore::new()),
                inventory: Arc::new(InMemoryInventoryStore::new()),
                carts: Arc::new(InMemoryCartStore::new()),
            },
            Sessions {
                passwords: Passwords::fast(),
                tokens: tokens.clone(),
                token_ttl: Duration::minutes(DEFAULT_TOKEN_TTL_MINUTES),
            },
        );
        Self { state, db, tokens }
    }

    /// Bearer header value for a regular user. The user has no account row,
    /// only a session.
    pub async fn user_token(&self, raw_id: i64) -> String {
        let user = User::new(UserId::new(raw_id).unwrap(), format!("user-{raw_id}"));
        self.bearer(user).await
    }

    /// Bearer header value for an admin.
    pub async fn admin_token(&self, raw_id: i64) -> String {
        let user = User::admin(UserId::new(raw_id).unwrap(), format!("admin-{raw_id}"));
        self.bearer(user).await
    }

    async fn bearer(&self, user: User) -> String {
        let token = self.tokens.issue(user, Duration::minutes(DEFAULT_TOKEN_TTL_MINUTES)).await;
        format!("Bearer {token}")
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

pub fn json_request(method: &str, uri: &str, auth: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(auth) = auth {
        builder = builder.header("authorization", auth);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn empty_request(method: &str, uri: &str, auth: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header("authorization", auth);
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
