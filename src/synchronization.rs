use parking_lot::RwLock;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use uuid::Uuid;

/// Identity of one transaction scope, the unit that owns pending actions.
pub type ScopeId = Uuid;

/// Order value of observers that must run before every other observer.
pub const HIGHEST_PRECEDENCE: i32 = i32::MIN;

/// Order value of observers with no ordering requirement.
pub const LOWEST_PRECEDENCE: i32 = i32::MAX;

/// Trait for components that need to be notified when a transaction finishes.
///
/// A transaction manager calls `after_completion` exactly once per
/// transaction, with one of the `STATUS_*` codes from [`crate::outcome`].
/// Observers are best-effort: there is no channel to report failure back.
pub trait TransactionSynchronization: Send + Sync {
    /// Position of this observer among those of the same transaction.
    /// Lower values run first.
    fn order(&self) -> i32 {
        LOWEST_PRECEDENCE
    }

    /// Called after the transaction committed, rolled back or ended in an
    /// unknown state.
    fn after_completion(&self, status: i32);
}

/// A transaction in flight, as seen by components that defer work to its end.
pub trait TransactionScope: Send + Sync {
    /// Stable identity of this scope for its whole lifetime.
    fn scope_id(&self) -> ScopeId;

    /// Whether the transaction is still open.
    fn is_transaction_active(&self) -> bool;

    /// Attach an observer to be notified on completion.
    fn register_synchronization(&self, synchronization: Arc<dyn TransactionSynchronization>);
}

/// Notifies `synchronizations` of completion in ascending `order()`.
///
/// Registration order breaks ties. A panicking observer is logged and
/// does not keep the others from running.
pub fn trigger_after_completion(
    scope: ScopeId,
    synchronizations: &[Arc<dyn TransactionSynchronization>],
    status: i32,
) {
    let mut ordered = synchronizations.to_vec();
    ordered.sort_by_key(|synchronization| synchronization.order());

    for synchronization in ordered {
        let notified = panic::catch_unwind(AssertUnwindSafe(|| {
            synchronization.after_completion(status)
        }));
        if notified.is_err() {
            tracing::error!(%scope, status, "transaction synchronization panicked in after_completion");
        }
    }
}

/// Observers of one transaction, notified at most once.
///
/// Transaction managers hold one of these per transaction and call
/// [`complete`](Self::complete) when it ends.
#[derive(Default)]
pub struct CompletionObservers {
    synchronizations: RwLock<Vec<Arc<dyn TransactionSynchronization>>>,
    completed: AtomicBool,
}

impl CompletionObservers {
    /// Create an empty, not yet completed list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an observer.
    pub fn register(&self, synchronization: Arc<dyn TransactionSynchronization>) {
        self.synchronizations.write().push(synchronization);
    }

    /// Number of registered observers.
    pub fn count(&self) -> usize {
        self.synchronizations.read().len()
    }

    /// Whether completion was already reported.
    pub fn is_completed(&self) -> bool {
        self.completed.load(Ordering::Acquire)
    }

    /// Notify every observer of `status`. Only the first call does anything;
    /// returns whether this call was it.
    pub fn complete(&self, scope: ScopeId, status: i32) -> bool {
        if self.completed.swap(true, Ordering::AcqRel) {
            tracing::debug!(%scope, status, "completion already reported, ignoring");
            return false;
        }
        let synchronizations = self.synchronizations.read().clone();
        tracing::debug!(
            %scope,
            status,
            observers = synchronizations.len(),
            "transaction completed"
        );
        trigger_after_completion(scope, &synchronizations, status);
        true
    }
}
