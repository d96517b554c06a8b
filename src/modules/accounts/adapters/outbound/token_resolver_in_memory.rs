use crate::modules::accounts::adapters::outbound::token_resolver::{
    TokenError, TokenIssuer, TokenResolver,
};
use crate::modules::accounts::core::user::User;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 15;

struct Session {
    user: User,
    expires_at: DateTime<Utc>,
}

#[derive(Default)]
pub struct InMemoryTokenResolver {
    sessions: RwLock<HashMap<String, Session>>,
    is_offline: AtomicBool,
}

impl InMemoryTokenResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&self) {
        self.is_offline.fetch_xor(true, Ordering::SeqCst);
    }

    /// Issue a fresh token for `user`, valid for `ttl`.
    pub async fn issue(&self, user: User, ttl: Duration) -> String {
        let token = Uuid::now_v7().to_string();
        self.register(token.clone(), user, ttl).await;
        token
    }

    /// Register a caller-chosen token, such as a bootstrap admin token.
    pub async fn register(&self, token: impl Into<String>, user: User, ttl: Duration) {
        let expires_at = Utc::now()
            .checked_add_signed(ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.sessions
            .write()
            .await
            .insert(token.into(), Session { user, expires_at });
    }
}

#[async_trait::async_trait]
impl TokenResolver for InMemoryTokenResolver {
    async fn resolve(&self, token: &str) -> Result<User, TokenError> {
        if self.is_offline.load(Ordering::SeqCst) {
            return Err(TokenError::Unavailable("token store offline".into()));
        }

        let sessions = self.sessions.read().await;
        let session = sessions.get(token).ok_or(TokenError::Unknown)?;
        if session.expires_at <= Utc::now() {
            return Err(TokenError::Expired);
        }
        Ok(session.user.clone())
    }
}

#[async_trait::async_trait]
impl TokenIssuer for InMemoryTokenResolver {
    async fn issue(&self, user: User, ttl: Duration) -> String {
        InMemoryTokenResolver::issue(self, user, ttl).await
    }
}
