use crate::modules::accounts::adapters::outbound::token_resolver::TokenIssuer;
use crate::modules::accounts::adapters::outbound::user_store::UserStore;
use crate::modules::accounts::core::password::{Passwords, UNUSABLE_PASSWORD_HASH};
use crate::modules::accounts::core::user::{Credentials, User, UserError};
use crate::shared::infrastructure::database::{
    StoreError, TransactionError, UnitOfWork, run_in_transaction,
};
use async_trait::async_trait;
use chrono::Duration;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("username {0} is taken")]
    UsernameTaken(String),

    /// Unknown username and wrong password look the same to the caller.
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("internal error")]
    Internal,
}

impl From<UserError> for AccountError {
    fn from(err: UserError) -> Self {
        AccountError::InvalidInput(err.to_string())
    }
}

impl From<StoreError> for AccountError {
    fn from(err: StoreError) -> Self {
        tracing::error!(error = %err, "user store failed");
        AccountError::Internal
    }
}

impl From<TransactionError<AccountError>> for AccountError {
    fn from(err: TransactionError<AccountError>) -> Self {
        match err {
            TransactionError::Work(inner) => inner,
            other => {
                tracing::error!(error = %other, "account transaction failed");
                AccountError::Internal
            }
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Register a regular (non admin) user.
    async fn sign_up(&self, credentials: Credentials) -> Result<User, AccountError>;

    /// Check the password and hand out a bearer token.
    async fn sign_in(&self, credentials: Credentials) -> Result<String, AccountError>;

    /// Find or create the admin account a bootstrap token is registered for.
    /// The account gets no usable password.
    async fn bootstrap_admin(&self, username: String) -> Result<User, AccountError>;
}

pub struct StoreAccountService<TDb, TUsers>
where
    TDb: UnitOfWork + 'static,
    TUsers: UserStore<TDb::Tx> + 'static,
{
    db: Arc<TDb>,
    users: Arc<TUsers>,
    passwords: Passwords,
    tokens: Arc<dyn TokenIssuer>,
    token_ttl: Duration,
}

impl<TDb, TUsers> StoreAccountService<TDb, TUsers>
where
    TDb: UnitOfWork + 'static,
    TUsers: UserStore<TDb::Tx> + 'static,
{
    pub fn new(
        db: Arc<TDb>,
        users: Arc<TUsers>,
        passwords: Passwords,
        tokens: Arc<dyn TokenIssuer>,
        token_ttl: Duration,
    ) -> Self {
        Self {
            db,
            users,
            passwords,
            tokens,
            token_ttl,
        }
    }

    async fn hash(&self, password: String) -> Result<String, AccountError> {
        let passwords = self.passwords.clone();
        let hashed = tokio::task::spawn_blocking(move || passwords.hash(&password))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "password hashing task failed");
                AccountError::Internal
            })?;
        hashed.map_err(|e| {
            tracing::error!(error = %e, "password hashing failed");
            AccountError::Internal
        })
    }

    async fn verify(&self, password: String, hash: String) -> Result<bool, AccountError> {
        let passwords = self.passwords.clone();
        tokio::task::spawn_blocking(move || passwords.verify(&password, &hash))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "password check task failed");
                AccountError::Internal
            })
    }
}

#[async_trait]
impl<TDb, TUsers> AccountService for StoreAccountService<TDb, TUsers>
where
    TDb: UnitOfWork + 'static,
    TUsers: UserStore<TDb::Tx> + 'static,
{
    async fn sign_up(&self, credentials: Credentials) -> Result<User, AccountError> {
        let Credentials { username, password } = credentials.validate()?;
        let password_hash = self.hash(password).await?;
        let users = Arc::clone(&self.users);

        let user = run_in_transaction(&*self.db, move |tx| {
            Box::pin(async move {
                let created = users.create_user(tx, &username, &password_hash, false).await?;
                created.ok_or(AccountError::UsernameTaken(username))
            })
        })
        .await?;

        tracing::info!(user_id = %user.id, "user signed up");
        Ok(user)
    }

    async fn sign_in(&self, credentials: Credentials) -> Result<String, AccountError> {
        let Credentials { username, password } = credentials.validate()?;
        let users = Arc::clone(&self.users);

        let stored = run_in_transaction(&*self.db, move |tx| {
            Box::pin(async move { Ok::<_, AccountError>(users.find_by_username(tx, &username).await?) })
        })
        .await?;

        let Some(stored) = stored else {
            return Err(AccountError::InvalidCredentials);
        };
        if !self.verify(password, stored.password_hash).await? {
            tracing::info!(user_id = %stored.user.id, "sign-in rejected");
            return Err(AccountError::InvalidCredentials);
        }

        let user_id = stored.user.id;
        let token = self.tokens.issue(stored.user, self.token_ttl).await;
        tracing::info!(user_id = %user_id, "user signed in");
        Ok(token)
    }

    async fn bootstrap_admin(&self, username: String) -> Result<User, AccountError> {
        let username = username.trim().to_string();
        if username.is_empty() {
            return Err(UserError::EmptyUsername.into());
        }
        let users = Arc::clone(&self.users);

        let admin = run_in_transaction(&*self.db, move |tx| {
            Box::pin(async move {
                let existing = users.find_by_username(tx, &username).await?;
                match existing {
                    Some(stored) if stored.user.admin => return Ok(stored.user),
                    Some(_) => return Err(AccountError::UsernameTaken(username)),
                    None => {}
                }
                let created = users
                    .create_user(tx, &username, UNUSABLE_PASSWORD_HASH, true)
                    .await?;
                created.ok_or(AccountError::UsernameTaken(username))
            })
        })
        .await?;

        tracing::info!(user_id = %admin.id, "bootstrap admin ready");
        Ok(admin)
    }
}
