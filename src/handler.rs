use parking_lot::Mutex;
use std::any::Any;
use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::{
    Action, ActionError, ActionRegistry, ActionResult, HandlerConfig, Outcome,
    PostActionSynchronization, ScopeId, TransactionScope,
};

/// Defers actions registered inside a transaction until it completes, then
/// runs them according to the outcome.
///
/// The first registration in a scope attaches a [`PostActionSynchronization`]
/// to it. When the transaction manager reports completion, the actions of
/// the matching outcome run first, then the `All` actions, each group in
/// registration order. A failing action aborts the rest of its own group
/// only. Afterwards the scope's actions and hook flag are cleared, whatever
/// happened.
///
/// Cloning is cheap; clones share the same pending state.
#[derive(Clone, Default)]
pub struct PostActionHandler {
    registry: Arc<ActionRegistry>,
    attached: Arc<Mutex<HashSet<ScopeId>>>,
    config: HandlerConfig,
}

impl PostActionHandler {
    /// Create a handler with the given configuration.
    pub fn new(config: HandlerConfig) -> Self {
        Self {
            registry: Arc::new(ActionRegistry::new()),
            attached: Arc::new(Mutex::new(HashSet::new())),
            config,
        }
    }

    /// Configuration this handler was built with.
    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    /// Whether `scope` still has an open transaction. Registering against a
    /// finished scope is accepted but the action is discarded unrun.
    pub fn is_actual_transaction_active(&self, scope: &dyn TransactionScope) -> bool {
        scope.is_transaction_active()
    }

    /// Defers `action` until `scope` completes with `outcome`.
    pub fn register<F>(&self, scope: &dyn TransactionScope, action: F, outcome: Outcome)
    where
        F: FnOnce() -> ActionResult + Send + 'static,
    {
        self.register_action(scope, Action::new(action), outcome);
    }

    /// Same as [`register`](Self::register) for an already built [`Action`].
    ///
    /// A scope whose transaction already finished will never complete
    /// again, so the action is dropped without attaching anything.
    pub fn register_action(&self, scope: &dyn TransactionScope, action: Action, outcome: Outcome) {
        let scope_id = scope.scope_id();
        if !scope.is_transaction_active() {
            warn!(
                scope = %scope_id,
                %outcome,
                action = action.label(),
                "no active transaction, discarding post-completion action"
            );
            return;
        }
        self.attach_if_needed(scope, scope_id);
        self.registry.add(scope_id, action, outcome);
    }

    fn attach_if_needed(&self, scope: &dyn TransactionScope, scope_id: ScopeId) {
        let newly_attached = self.attached.lock().insert(scope_id);
        if newly_attached {
            debug!(scope = %scope_id, "attaching post-action synchronization");
            scope.register_synchronization(Arc::new(PostActionSynchronization::new(
                self.clone(),
                scope_id,
            )));
        }
    }

    /// Whether a completion hook is attached for `scope`.
    pub fn is_attached(&self, scope: ScopeId) -> bool {
        self.attached.lock().contains(&scope)
    }

    /// Number of actions waiting in `scope` for `outcome`.
    pub fn pending(&self, scope: ScopeId, outcome: Outcome) -> usize {
        self.registry.pending(scope, outcome)
    }

    /// Runs the actions of `scope` for the completion `status`.
    ///
    /// Called by the completion hook. Nothing raised by an action escapes.
    pub fn dispatch(&self, scope: ScopeId, status: i32) {
        let _cleanup = ScopeCleanup {
            handler: self,
            scope,
        };

        match Outcome::classify(Some(status)) {
            Some(Outcome::All) => {}
            Some(outcome) => self.execute_group(scope, outcome),
            None => warn!(%scope, status, "unrecognised completion status, running only `all` actions"),
        }
        self.execute_group(scope, Outcome::All);
    }

    fn execute_group(&self, scope: ScopeId, outcome: Outcome) {
        let actions = self.registry.get(scope, outcome);
        if actions.is_empty() {
            return;
        }
        info!(%scope, %outcome, count = actions.len(), "begin executing post-completion actions");

        let run = || -> ActionResult {
            for action in actions {
                debug!(%scope, %outcome, action = action.label(), "executing action");
                action.execute()?;
            }
            Ok(())
        };

        let result = if self.config.catch_panics {
            panic::catch_unwind(AssertUnwindSafe(run))
                .unwrap_or_else(|payload| Err(ActionError::Panicked(panic_message(payload))))
        } else {
            run()
        };

        if let Err(err) = result {
            error!(%scope, %outcome, error = %err, "executing actions after transaction completion failed");
        }
    }

    fn cleanup(&self, scope: ScopeId) {
        self.registry.clear(scope);
        self.attached.lock().remove(&scope);
        debug!(%scope, "post-action state cleared");
    }
}

struct ScopeCleanup<'a> {
    handler: &'a PostActionHandler,
    scope: ScopeId,
}

impl Drop for ScopeCleanup<'_> {
    fn drop(&mut self) {
        self.handler.cleanup(self.scope);
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
