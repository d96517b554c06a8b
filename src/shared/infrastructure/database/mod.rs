// Unit of work over the backing relational store.
//
// Every cart and stock mutation happens through a transaction handle acquired
// once per operation and passed to each store call, so a group of writes
// either commits together or leaves no trace.

use async_trait::async_trait;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("backend error: {0}")]
    Backend(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransactionError<E> {
    #[error("failed to begin transaction: {0}")]
    Begin(StoreError),

    #[error("failed to commit transaction: {0}")]
    Commit(StoreError),

    #[error("failed to roll back transaction: {0}")]
    Rollback(StoreError),

    #[error("failed executing transaction: {0}")]
    Work(E),
}

#[async_trait]
pub trait UnitOfWork: Send + Sync {
    type Tx: Send;

    async fn begin(&self) -> Result<Self::Tx, StoreError>;
    async fn commit(&self, tx: Self::Tx) -> Result<(), StoreError>;
    async fn rollback(&self, tx: Self::Tx) -> Result<(), StoreError>;
}

pub type TxFuture<'t, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 't>>;

/// Run `work` inside one transaction.
///
/// Commits when `work` succeeds. When it fails the transaction is rolled back
/// and the work error is returned, unless the rollback itself fails, in which
/// case the rollback error wins. Dropping the returned future before it
/// completes drops the handle uncommitted, which every backend treats as a
/// rollback.
pub async fn run_in_transaction<TDb, T, E, F>(
    db: &TDb,
    work: F,
) -> Result<T, TransactionError<E>>
where
    TDb: UnitOfWork + ?Sized,
    T: Send,
    E: Send,
    F: for<'t> FnOnce(&'t mut TDb::Tx) -> TxFuture<'t, T, E> + Send,
{
    let mut tx = db.begin().await.map_err(TransactionError::Begin)?;

    match work(&mut tx).await {
        Ok(value) => {
            db.commit(tx).await.map_err(TransactionError::Commit)?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = db.rollback(tx).await {
                tracing::error!(error = %rollback_err, "rollback failed");
                return Err(TransactionError::Rollback(rollback_err));
            }
            Err(TransactionError::Work(err))
        }
    }
}

pub mod in_memory;
pub mod postgres;
