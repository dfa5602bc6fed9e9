use parking_lot::Mutex;
use std::sync::Arc;
use uuid::Uuid;

use post_action_tx::{
    ActionResult, CompletionObservers, ScopeId, TransactionScope, TransactionSynchronization,
    LOWEST_PRECEDENCE,
};

/// In-memory transaction scope that completes when told to.
pub struct InMemoryScope {
    id: ScopeId,
    observers: CompletionObservers,
}

impl InMemoryScope {
    pub fn begin() -> Self {
        Self {
            id: Uuid::new_v4(),
            observers: CompletionObservers::new(),
        }
    }

    /// Finish the transaction with `status` and notify observers.
    pub fn complete(&self, status: i32) {
        self.observers.complete(self.id, status);
    }

    /// How many observers were attached to this scope.
    pub fn registrations(&self) -> usize {
        self.observers.count()
    }
}

impl TransactionScope for InMemoryScope {
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

/// Ordered record of what ran, shared between actions and assertions.
#[derive(Clone, Default)]
pub struct ExecutionLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl ExecutionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, entry: impl Into<String>) {
        self.entries.lock().push(entry.into());
    }

    /// An action that appends `name` when run.
    pub fn record(&self, name: &'static str) -> impl FnOnce() -> ActionResult + Send + 'static {
        let log = self.clone();
        move || {
            log.push(name);
            Ok(())
        }
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().clone()
    }
}

/// Observer that logs the status it saw.
pub struct StatusObserver {
    log: ExecutionLog,
    label: &'static str,
    order: i32,
}

impl StatusObserver {
    pub fn new(log: ExecutionLog) -> Arc<Self> {
        Self::with_order(log, LOWEST_PRECEDENCE)
    }

    pub fn with_order(log: ExecutionLog, order: i32) -> Arc<Self> {
        Self::labelled(log, "observer", order)
    }

    pub fn labelled(log: ExecutionLog, label: &'static str, order: i32) -> Arc<Self> {
        Arc::new(Self { log, label, order })
    }
}

impl TransactionSynchronization for StatusObserver {
    fn order(&self) -> i32 {
        self.order
    }

    fn after_completion(&self, status: i32) {
        self.log.push(format!("{}:{status}", self.label));
    }
}
