//! Middleware system
//!
//! Middleware sits between action dispatch and reducer execution, allowing
//! side effects, logging, action rewriting and other cross-cutting concerns
//! to be handled in a composable way.
//!
//! ## Design
//!
//! ```text
//! Action → middleware[0] → middleware[1] → … → reducer → State
//! ```
//!
//! Each middleware wraps the next stage of the chain once, when the chain is
//! built, and returns its own stage. A stage can:
//! - Inspect the action and current state
//! - Rewrite the action before passing it on
//! - Dispatch new actions (they re-enter at the top of the chain)
//! - Block the action by never calling `next`
//!
//! The first middleware in the list is the outermost and sees every action first.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use redux_core::{middleware, Dispatcher, DispatchFn, StateAccessor};
//!
//! let doubling = middleware::from_fn(
//!     |_state: StateAccessor<i64>, _dispatcher: Dispatcher<i64>, next: DispatchFn<i64>| -> DispatchFn<i64> {
//!         Arc::new(move |amount: i64| next(amount * 2))
//!     },
//! );
//! # let _ = doubling;
//! ```

use std::fmt;
use std::sync::{Arc, Weak};

use crate::action::Action;
use crate::dispatcher::Dispatcher;

mod logging;

pub use logging::LoggingMiddleware;

/// One stage of the dispatch chain
pub type DispatchFn<A> = Arc<dyn Fn(A) + Send + Sync>;

/// Middleware trait - wraps the next stage of the dispatch chain
///
/// `wrap` is called whenever the chain is (re)built, never per action.
/// The returned stage is cached and called for every dispatched action.
///
/// # Parameters
/// - `state`: Read access to the store's current state (not a snapshot)
/// - `dispatcher`: Dispatches new actions from the top of the chain
/// - `next`: The next middleware, or the reducer stage for the innermost one
pub trait Middleware<S, A>: Send + Sync {
    fn wrap(
        &self,
        state: StateAccessor<S>,
        dispatcher: Dispatcher<A>,
        next: DispatchFn<A>,
    ) -> DispatchFn<A>;
}

/// Middleware built from a closure with the same shape as [`Middleware::wrap`]
struct FnMiddleware<F>(F);

impl<S, A, F> Middleware<S, A> for FnMiddleware<F>
where
    F: Fn(StateAccessor<S>, Dispatcher<A>, DispatchFn<A>) -> DispatchFn<A> + Send + Sync,
{
    fn wrap(
        &self,
        state: StateAccessor<S>,
        dispatcher: Dispatcher<A>,
        next: DispatchFn<A>,
    ) -> DispatchFn<A> {
        (self.0)(state, dispatcher, next)
    }
}

/// Create middleware from a closure
pub fn from_fn<S, A, F>(wrap: F) -> Box<dyn Middleware<S, A>>
where
    S: 'static,
    A: Action,
    F: Fn(StateAccessor<S>, Dispatcher<A>, DispatchFn<A>) -> DispatchFn<A> + Send + Sync + 'static,
{
    Box::new(FnMiddleware(wrap))
}

/// Create a dispatch stage from a closure
pub fn stage<A, F>(handle: F) -> DispatchFn<A>
where
    F: Fn(A) + Send + Sync + 'static,
{
    Arc::new(handle)
}

/// Source of the current state behind a [`StateAccessor`]
pub(crate) trait StateSource<S>: Send + Sync {
    fn current_state(&self) -> Option<Arc<S>>;
}

struct NoState;

impl<S> StateSource<S> for NoState {
    fn current_state(&self) -> Option<Arc<S>> {
        None
    }
}

/// Read-only access to a store's state for middleware
///
/// Always returns the state at the time of the call. Returns `None` while the
/// store is still resolving its first state, or once the store is gone.
pub struct StateAccessor<S> {
    source: Weak<dyn StateSource<S>>,
}

impl<S: 'static> StateAccessor<S> {
    pub(crate) fn new(source: Weak<dyn StateSource<S>>) -> Self {
        Self { source }
    }

    /// An accessor bound to no store; always returns `None`
    pub fn detached() -> Self {
        let source: Weak<dyn StateSource<S>> = Weak::<NoState>::new();
        Self { source }
    }

    pub fn get(&self) -> Option<Arc<S>> {
        self.source.upgrade()?.current_state()
    }
}

impl<S> Clone for StateAccessor<S> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
        }
    }
}

impl<S> fmt::Debug for StateAccessor<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateAccessor")
            .field("connected", &(self.source.strong_count() > 0))
            .finish()
    }
}
