use crate::{PostActionHandler, ScopeId, TransactionSynchronization};

/// Completion hook attached to a transaction on behalf of a
/// [`PostActionHandler`]. It forwards the completion status untouched.
pub struct PostActionSynchronization {
    handler: PostActionHandler,
    scope: ScopeId,
}

impl PostActionSynchronization {
    pub(crate) fn new(handler: PostActionHandler, scope: ScopeId) -> Self {
        Self { handler, scope }
    }

    /// Scope this hook dispatches for.
    pub fn scope(&self) -> ScopeId {
        self.scope
    }
}

impl TransactionSynchronization for PostActionSynchronization {
    fn order(&self) -> i32 {
        self.handler.config().hook_order
    }

    fn after_completion(&self, status: i32) {
        self.handler.dispatch(self.scope, status);
    }
}
