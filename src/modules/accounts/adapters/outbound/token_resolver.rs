use crate::modules::accounts::core::user::User;
use async_trait::async_trait;
use chrono::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token is not recognised")]
    Unknown,

    #[error("token has expired")]
    Expired,

    #[error("identity backend unavailable: {0}")]
    Unavailable(String),
}

/// Resolves an opaque bearer token to the user it was issued for.
#[async_trait]
pub trait TokenResolver: Send + Sync {
    async fn resolve(&self, token: &str) -> Result<User, TokenError>;
}

/// Hands out bearer tokens that the matching [`TokenResolver`] accepts
/// until `ttl` has passed.
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    async fn issue(&self, user: User, ttl: Duration) -> String;
}
