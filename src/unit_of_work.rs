use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    CompletionObservers, Executor, ScopeId, TransactionError, TransactionResult, TransactionScope,
    TransactionSynchronization, STATUS_COMMITTED, STATUS_ROLLED_BACK, STATUS_UNKNOWN,
};

/// Unit of Work pattern for managing database transactions.
///
/// The UnitOfWork manages the lifecycle of database transactions and provides
/// a factory method to create new transaction sessions.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    type Session: UnitOfWorkSession;

    /// Begin a new transaction session.
    async fn begin(&self) -> TransactionResult<Self::Session>;
}

/// Represents a single database transaction session.
///
/// A session is a [`TransactionScope`]: observers registered on it are told
/// the completion status once the session commits, rolls back or is dropped
/// while still open.
#[async_trait]
pub trait UnitOfWorkSession: TransactionScope {
    /// Get the executor for this session (provides access to the transaction).
    fn executor(&self) -> &Executor;

    /// Commit the transaction and notify all registered observers.
    async fn commit(self) -> TransactionResult<()>;

    /// Rollback the transaction and notify all registered observers.
    async fn rollback(self) -> TransactionResult<()>;
}

/// Default implementation of UnitOfWork for PostgreSQL.
pub struct PostgresUnitOfWork {
    pool: Arc<PgPool>,
}

impl PostgresUnitOfWork {
    /// Create a new PostgresUnitOfWork with the given connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UnitOfWork for PostgresUnitOfWork {
    type Session = PostgresUnitOfWorkSession;

    async fn begin(&self) -> TransactionResult<Self::Session> {
        let tx = self.pool.begin().await?;
        Ok(PostgresUnitOfWorkSession::new(tx))
    }
}

/// Default implementation of UnitOfWorkSession for PostgreSQL.
pub struct PostgresUnitOfWorkSession {
    id: ScopeId,
    executor: Executor,
    observers: CompletionObservers,
}

impl PostgresUnitOfWorkSession {
    /// Create a new session from a PostgreSQL transaction.
    pub fn new(tx: sqlx::Transaction<'static, sqlx::Postgres>) -> Self {
        Self {
            id: Uuid::new_v4(),
            executor: Executor::new(tx),
            observers: CompletionObservers::new(),
        }
    }

    fn complete(&self, status: i32) {
        self.observers.complete(self.id, status);
    }
}

impl TransactionScope for PostgresUnitOfWorkSession {
    fn scope_id(&self) -> ScopeId {
        self.id
    }

    fn is_transaction_active(&self) -> bool {
        !self.observers.is_completed()
    }

    fn register_synchronization(&self, synchronization: Arc<dyn TransactionSynchronization>) {
        self.observers.register(synchronization);
    }
}

#[async_trait]
impl UnitOfWorkSession for PostgresUnitOfWorkSession {
    fn executor(&self) -> &Executor {
        &self.executor
    }

    async fn commit(self) -> TransactionResult<()> {
        // Take ownership of the transaction
        let tx = self.executor.take_transaction().await?;

        // A failed commit leaves the server-side outcome undetermined
        let committed = tx.commit().await;
        let status = if committed.is_ok() {
            STATUS_COMMITTED
        } else {
            STATUS_UNKNOWN
        };
        self.complete(status);

        committed.map_err(|e| TransactionError::CommitFailed(e.to_string()))
    }

    async fn rollback(self) -> TransactionResult<()> {
        // Take ownership of the transaction
        let tx = self.executor.take_transaction().await?;

        let rolled_back = tx.rollback().await;
        self.complete(STATUS_ROLLED_BACK);

        rolled_back.map_err(|e| TransactionError::RollbackFailed(e.to_string()))
    }
}

impl Drop for PostgresUnitOfWorkSession {
    fn drop(&mut self) {
        if !self.is_transaction_active() {
            return;
        }
        // sqlx rolls back a transaction dropped without commit
        match self.executor.tx.try_lock() {
            Ok(mut slot) => {
                slot.take();
            }
            Err(_) => tracing::warn!(
                scope = %self.id,
                "session dropped while its transaction is in use, reporting rollback before it ends"
            ),
        }
        self.complete(STATUS_ROLLED_BACK);
    }
}
