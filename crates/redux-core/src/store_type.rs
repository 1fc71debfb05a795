//! Store-facing contracts
//!
//! Code that only needs to dispatch depends on [`DispatchAction`]; code that
//! observes state depends on [`StoreType`].

use std::sync::Arc;

use crate::listener::Listener;
use crate::store::Unsubscribe;

/// Anything actions can be dispatched to: a store, or a middleware's dispatcher
pub trait DispatchAction<A> {
    /// Dispatching an action is the only way to change a store's state
    fn dispatch(&self, action: A);
}

/// Role-specific contract of a store
///
/// Stores receive actions and use a reducer to compute state changes.
/// Upon every state change a store informs all of its subscribers.
pub trait StoreType<S, A>: DispatchAction<A> {
    /// The current state
    fn state(&self) -> Arc<S>;

    /// Subscribe to `(old, new)` state pairs
    ///
    /// The listener immediately receives `(None, current)`.
    fn subscribe<L>(&self, listener: L) -> Unsubscribe
    where
        L: Fn(Option<&S>, &S) + Send + Sync + 'static;

    /// Subscribe to a projection of the state
    ///
    /// The selector is applied to old and new independently.
    fn subscribe_with_selector<T, F, L>(&self, selector: F, listener: L) -> Unsubscribe
    where
        T: 'static,
        F: Fn(&S) -> T + Send + Sync + 'static,
        L: Fn(Option<&T>, &T) + Send + Sync + 'static;

    /// Subscribe an object listener to every new state
    fn subscribe_listener<O>(&self, listener: Arc<O>) -> Unsubscribe
    where
        O: Listener<S> + ?Sized + 'static,
    {
        self.subscribe(move |_old: Option<&S>, new: &S| listener.new_state(new))
    }

    /// Subscribe an object listener to every new projected state
    fn subscribe_listener_with_selector<T, F, O>(&self, selector: F, listener: Arc<O>) -> Unsubscribe
    where
        T: 'static,
        F: Fn(&S) -> T + Send + Sync + 'static,
        O: Listener<T> + ?Sized + 'static,
    {
        self.subscribe_with_selector(selector, move |_old: Option<&T>, new: &T| listener.new_state(new))
    }
}
