//! Dispatcher - re-entrant dispatch handle handed to middleware
//!
//! Actions sent through a Dispatcher enter the store's middleware chain from
//! the top, exactly like [`Store::dispatch`](crate::Store::dispatch). The
//! handle holds the store weakly, so middleware keeping one never keeps the
//! store alive.

use std::fmt;
use std::sync::Weak;

use crate::action::Action;
use crate::error::StoreError;
use crate::store_type::DispatchAction;

/// Receiver of dispatched actions behind a [`Dispatcher`]
pub(crate) trait DispatchTarget<A>: Send + Sync {
    fn dispatch_action(&self, action: A);
}

/// Target of a dispatcher that was never bound to a store
struct Unbound;

impl<A: Action> DispatchTarget<A> for Unbound {
    fn dispatch_action(&self, _action: A) {}
}

/// Handle for dispatching actions into a store from middleware or background tasks
pub struct Dispatcher<A> {
    target: Weak<dyn DispatchTarget<A>>,
}

impl<A: Action> Dispatcher<A> {
    pub(crate) fn new(target: Weak<dyn DispatchTarget<A>>) -> Self {
        Self { target }
    }

    /// A dispatcher bound to no store; every dispatch reports [`StoreError::StoreDropped`]
    ///
    /// Useful for driving a middleware in isolation.
    pub fn detached() -> Self {
        let target: Weak<dyn DispatchTarget<A>> = Weak::<Unbound>::new();
        Self { target }
    }

    /// Dispatch an action through the full middleware chain
    ///
    /// If the store is gone the action is dropped and a warning is logged.
    pub fn dispatch(&self, action: A) {
        if let Err(e) = self.try_dispatch(action) {
            log::warn!("Dispatcher: {}", e);
        }
    }

    /// Dispatch an action, reporting whether the store was still alive
    pub fn try_dispatch(&self, action: A) -> Result<(), StoreError> {
        let target = self.target.upgrade().ok_or(StoreError::StoreDropped)?;
        target.dispatch_action(action);
        Ok(())
    }

    /// Whether the store behind this handle still exists
    pub fn is_connected(&self) -> bool {
        self.target.strong_count() > 0
    }

    /// Dispatch an action from a spawned tokio task
    ///
    /// Must be called from within a tokio runtime. The dispatch runs on
    /// whichever worker picks the task up.
    pub fn spawn_dispatch(self, action: A) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            self.dispatch(action);
        })
    }
}

impl<A> Clone for Dispatcher<A> {
    fn clone(&self) -> Self {
        Self {
            target: self.target.clone(),
        }
    }
}

impl<A> fmt::Debug for Dispatcher<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("connected", &(self.target.strong_count() > 0))
            .finish()
    }
}

impl<A: Action> DispatchAction<A> for Dispatcher<A> {
    fn dispatch(&self, action: A) {
        Dispatcher::dispatch(self, action);
    }
}
