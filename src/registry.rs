use parking_lot::Mutex;
use std::collections::HashMap;

use crate::{Action, Outcome, ScopeId};

type RegistryEntry = HashMap<Outcome, Vec<Action>>;

/// Pending actions, partitioned by transaction scope and then by outcome.
///
/// Each scope owns its own entry, created on the first `add` and dropped by
/// `clear`. Groups keep insertion order and allow duplicates.
#[derive(Default)]
pub struct ActionRegistry {
    entries: Mutex<HashMap<ScopeId, RegistryEntry>>,
}

impl ActionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `action` to the scope's group for `outcome`.
    pub fn add(&self, scope: ScopeId, action: Action, outcome: Outcome) {
        self.entries
            .lock()
            .entry(scope)
            .or_insert_with(|| HashMap::with_capacity(Outcome::ALL_OUTCOMES.len()))
            .entry(outcome)
            .or_default()
            .push(action);
    }

    /// Hands out the scope's group for `outcome` in registration order.
    ///
    /// Actions are one-shot, so the group leaves the registry. Returns an
    /// empty vec when the scope or the group does not exist.
    pub fn get(&self, scope: ScopeId, outcome: Outcome) -> Vec<Action> {
        self.entries
            .lock()
            .get_mut(&scope)
            .and_then(|entry| entry.remove(&outcome))
            .unwrap_or_default()
    }

    /// Number of actions pending for `outcome` in the scope.
    pub fn pending(&self, scope: ScopeId, outcome: Outcome) -> usize {
        self.entries
            .lock()
            .get(&scope)
            .and_then(|entry| entry.get(&outcome))
            .map_or(0, Vec::len)
    }

    /// Whether the scope has an entry at all.
    pub fn contains(&self, scope: ScopeId) -> bool {
        self.entries.lock().contains_key(&scope)
    }

    /// Drops the scope's entry entirely.
    pub fn clear(&self, scope: ScopeId) {
        self.entries.lock().remove(&scope);
    }
}
