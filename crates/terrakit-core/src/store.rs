//! Observable state store.
//!
//! Holds a single state value and notifies synchronous subscribers on every
//! transition with both the previous and the next state, so observers can
//! diff without polling. Transitions that produce an equal state are
//! swallowed (no notification), which makes idempotent reducers observable
//! as no-ops.

use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

/// Subscription handle for unsubscribing from state changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    /// Create a new unique subscription ID
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", &self.0.to_string()[..8])
    }
}

/// Type alias for change handler functions, invoked with (previous, next)
type ChangeHandler<S> = Box<dyn Fn(&S, &S) + Send + Sync>;

/// Observable store for a single state slice
///
/// The store is the single source of truth; everything attached to a render
/// surface is a derived, best-effort mirror of it.
pub struct Store<S> {
    /// Current state
    state: RwLock<S>,
    /// Registered synchronous handlers
    handlers: RwLock<HashMap<SubscriptionId, ChangeHandler<S>>>,
}

impl<S: Clone + PartialEq> Store<S> {
    /// Create a new store with the given initial state
    pub fn new(initial: S) -> Self {
        Self {
            state: RwLock::new(initial),
            handlers: RwLock::new(HashMap::new()),
        }
    }

    /// Get a snapshot of the current state
    pub fn state(&self) -> S {
        self.state.read().clone()
    }

    /// Apply a transition function to the current state
    ///
    /// The handler set is notified with the full previous and next state.
    /// Returns `true` if the state actually changed; a transition yielding
    /// an equal state notifies nobody.
    pub fn update<F>(&self, transition: F) -> bool
    where
        F: FnOnce(&S) -> S,
    {
        let (previous, next) = {
            let mut state = self.state.write();
            let next = transition(&state);
            if *state == next {
                return false;
            }
            let previous = std::mem::replace(&mut *state, next.clone());
            (previous, next)
        };

        // Notify outside the state lock so handlers may read or dispatch.
        let handlers = self.handlers.read();
        for (_, handler) in handlers.iter() {
            handler(&previous, &next);
        }
        true
    }

    /// Subscribe to state changes with a synchronous handler
    ///
    /// The handler will be called on the dispatching thread, so it should
    /// return quickly to avoid blocking further dispatch.
    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&S, &S) + Send + Sync + 'static,
    {
        let id = SubscriptionId::new();
        let mut handlers = self.handlers.write();
        handlers.insert(id, Box::new(handler));
        tracing::debug!("Subscription {} added", id);
        id
    }

    /// Unsubscribe from state changes
    ///
    /// Returns true if the subscription was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.write();
        let removed = handlers.remove(&id).is_some();
        if removed {
            tracing::debug!("Subscription {} removed", id);
        }
        removed
    }

    /// Get the number of active subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.handlers.read().len()
    }
}

impl<S: Clone + PartialEq + Default> Default for Store<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S: std::fmt::Debug> std::fmt::Debug for Store<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &*self.state.read())
            .field("subscribers", &self.handlers.read().len())
            .finish()
    }
}
