//! Store - holds application state and manages the dispatch loop
//!
//! ```text
//! dispatch(action)
//!   → middleware chain (cached, outermost first)
//!   → reducer stage (guarded, serialised)
//!   → state replaced
//!   → every sink receives (old, new)
//! ```
//!
//! # Threading
//!
//! A store is a shared handle and can be dispatched to from any thread.
//! Reducer runs are serialised by a transition lock. A dispatch from the
//! thread that is currently inside the reducer is a programming error and
//! panics. Subscribers are notified after the lock is released, so they may
//! read [`Store::state`] or dispatch; with several threads dispatching at
//! once, each notification pair is consistent but notifications may
//! interleave across threads.
//!
//! A subscription joins the sink set inside the transition lock, at the
//! state its catch-up reports. Every later transition reaches it, and the
//! `old` of the first one is the catch-up value. The catch-up itself is
//! delivered after the lock is released, so on a busy store it may arrive
//! after that first pair.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, Weak};
use std::thread::{self, ThreadId};

use crate::action::{Action, BuiltInAction};
use crate::dispatcher::{DispatchTarget, Dispatcher};
use crate::error::StoreError;
use crate::middleware::{DispatchFn, Middleware, StateAccessor, StateSource};
use crate::reducer::{self, Reducer};
use crate::sink::{Sink, SinkId};
use crate::store_type::{DispatchAction, StoreType};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Detects a dispatch from inside the reducer and serialises reducer runs
#[derive(Default)]
struct DispatchGuard {
    transition: Mutex<()>,
    reducing_on: Mutex<Option<ThreadId>>,
}

impl DispatchGuard {
    fn is_reducing_on(&self, thread: ThreadId) -> bool {
        *lock(&self.reducing_on) == Some(thread)
    }

    fn enter(&self, thread: ThreadId) -> Reducing<'_> {
        *lock(&self.reducing_on) = Some(thread);
        Reducing { guard: self }
    }
}

/// Marks the guard busy until dropped, including on unwind
struct Reducing<'a> {
    guard: &'a DispatchGuard,
}

impl Drop for Reducing<'_> {
    fn drop(&mut self) {
        *lock(&self.guard.reducing_on) = None;
    }
}

struct Inner<S, A> {
    state: RwLock<Option<Arc<S>>>,
    reducer: Reducer<S, A>,
    middleware: Mutex<Vec<Box<dyn Middleware<S, A>>>>,
    chain: RwLock<DispatchFn<A>>,
    sinks: Mutex<BTreeMap<SinkId, Sink<S>>>,
    next_sink_id: AtomicU64,
    guard: DispatchGuard,
}

impl<S, A> Inner<S, A>
where
    S: Send + Sync + 'static,
    A: Action,
{
    fn current_state(&self) -> Option<Arc<S>> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Build the dispatch chain by folding the middleware right to left
    /// around the reducer stage
    fn build_chain(this: &Weak<Self>, middleware: &[Box<dyn Middleware<S, A>>]) -> DispatchFn<A> {
        let terminal = this.clone();
        let reducer_stage: DispatchFn<A> = Arc::new(move |action: A| {
            if let Some(inner) = terminal.upgrade() {
                inner.apply(action);
            }
        });

        middleware.iter().rev().fold(reducer_stage, |next, layer| {
            let state_source: Weak<dyn StateSource<S>> = this.clone();
            let dispatch_target: Weak<dyn DispatchTarget<A>> = this.clone();
            layer.wrap(
                StateAccessor::new(state_source),
                Dispatcher::new(dispatch_target),
                next,
            )
        })
    }

    fn dispatch(&self, action: A) {
        let chain = self
            .chain
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        chain(action);
    }

    /// Reducer stage: run the reducer, replace the state, notify sinks
    fn apply(&self, action: A) {
        let current = thread::current().id();
        if self.guard.is_reducing_on(current) {
            let err = StoreError::ReentrantDispatch {
                action: format!("{:?}", action),
            };
            log::error!("{}", err);
            panic!("{}", err);
        }

        let (old, new, sinks) = {
            let _transition = lock(&self.guard.transition);
            let old = self.current_state();
            let new = {
                let _reducing = self.guard.enter(current);
                Arc::new((self.reducer)(&action, old.as_deref()))
            };
            *self.state.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&new));
            (old, new, self.sink_snapshot())
        };

        Self::publish(&sinks, old.as_deref(), &new);
    }

    /// Sinks registered at this point; taken under the transition lock
    fn sink_snapshot(&self) -> Vec<Sink<S>> {
        lock(&self.sinks).values().cloned().collect()
    }

    fn publish(sinks: &[Sink<S>], old: Option<&S>, new: &S) {
        log::trace!("Store: notifying {} subscriber(s)", sinks.len());
        for sink in sinks {
            sink.forward(old, new);
        }
    }

    fn issue_sink_id(&self) -> SinkId {
        SinkId::new(self.next_sink_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Register `sink`, then deliver `(None, current)` to it
    ///
    /// State read and insertion share the transition lock so no transition
    /// falls between them. The catch-up runs after the lock is released.
    fn insert_sink(&self, sink: Sink<S>) -> SinkId {
        let id = sink.id();
        let state = {
            let _transition = lock(&self.guard.transition);
            lock(&self.sinks).insert(id, sink.clone());
            self.current_state()
        };
        log::debug!("Store: subscribed {}", id);

        if let Some(state) = state {
            sink.forward(None, &state);
        }
        id
    }
}

impl<S, A> StateSource<S> for Inner<S, A>
where
    S: Send + Sync + 'static,
    A: Action,
{
    fn current_state(&self) -> Option<Arc<S>> {
        Inner::current_state(self)
    }
}

impl<S, A> DispatchTarget<A> for Inner<S, A>
where
    S: Send + Sync + 'static,
    A: Action,
{
    fn dispatch_action(&self, action: A) {
        self.dispatch(action);
    }
}

/// Removal side of the subscription set, independent of the state type
trait SinkRegistry: Send + Sync {
    fn remove_sink(&self, id: SinkId) -> bool;
}

impl<S, A> SinkRegistry for Inner<S, A>
where
    S: Send + Sync + 'static,
    A: Action,
{
    fn remove_sink(&self, id: SinkId) -> bool {
        let removed = lock(&self.sinks).remove(&id).is_some();
        if removed {
            log::debug!("Store: unsubscribed {}", id);
        }
        removed
    }
}

/// Capability to remove exactly one subscription
///
/// Dropping it keeps the subscription active.
#[must_use = "dropping an Unsubscribe keeps the subscription; call `unsubscribe` to remove it"]
pub struct Unsubscribe {
    id: SinkId,
    registry: Weak<dyn SinkRegistry>,
}

impl Unsubscribe {
    /// Identity of the subscription this handle removes
    pub fn id(&self) -> SinkId {
        self.id
    }

    /// Remove the subscription; no further notifications reach its listener
    ///
    /// Returns `false` if the store is gone or the subscription was already removed.
    pub fn unsubscribe(self) -> bool {
        match self.registry.upgrade() {
            Some(registry) => registry.remove_sink(self.id),
            None => false,
        }
    }
}

impl fmt::Debug for Unsubscribe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unsubscribe").field("id", &self.id).finish()
    }
}

/// Store - single source of truth, mutated only through its reducer
///
/// Cloning a store clones the handle; all clones share one state.
pub struct Store<S, A> {
    inner: Arc<Inner<S, A>>,
}

impl<S, A> Store<S, A>
where
    S: Send + Sync + 'static,
    A: Action,
{
    /// Create a store, resolving the first state from [`BuiltInAction::Initialize`]
    /// if none is given
    ///
    /// `Initialize` travels through the full middleware chain, so middleware
    /// observe the bootstrap like any other action (their state accessor
    /// returns `None` at that point). If a middleware keeps `Initialize` from
    /// reaching the reducer, the reducer stage is applied directly afterwards
    /// so the store never exists without a state.
    ///
    /// The fallback is decided as soon as the synchronous dispatch returns.
    /// A middleware that defers `Initialize` (for example through
    /// [`Dispatcher::spawn_dispatch`]) and forwards it later makes the reducer
    /// see `Initialize` a second time, now with the resolved state.
    pub fn new<R>(
        state: Option<S>,
        reduce: R,
        middleware: Vec<Box<dyn Middleware<S, A>>>,
    ) -> Self
    where
        A: From<BuiltInAction>,
        R: Fn(&A, Option<&S>) -> S + Send + Sync + 'static,
    {
        let bootstrap = state.is_none();
        let store = Self::build(state, reducer::reducer(reduce), middleware);

        if bootstrap {
            log::debug!("Store: no initial state, dispatching {:?}", BuiltInAction::Initialize);
            store.dispatch(A::from(BuiltInAction::Initialize));

            if store.inner.current_state().is_none() {
                log::warn!("Store: middleware did not forward Initialize, applying reducer directly");
                store.inner.apply(A::from(BuiltInAction::Initialize));
            }
        }

        store
    }

    /// Create a store with an initial state; the reducer is not called
    pub fn with_state<R>(
        state: S,
        reduce: R,
        middleware: Vec<Box<dyn Middleware<S, A>>>,
    ) -> Self
    where
        R: Fn(&A, Option<&S>) -> S + Send + Sync + 'static,
    {
        Self::build(Some(state), reducer::reducer(reduce), middleware)
    }

    fn build(
        state: Option<S>,
        reducer: Reducer<S, A>,
        middleware: Vec<Box<dyn Middleware<S, A>>>,
    ) -> Self {
        let inner = Arc::new_cyclic(|this: &Weak<Inner<S, A>>| {
            let chain = Inner::build_chain(this, &middleware);
            Inner {
                state: RwLock::new(state.map(Arc::new)),
                reducer,
                middleware: Mutex::new(middleware),
                chain: RwLock::new(chain),
                sinks: Mutex::new(BTreeMap::new()),
                next_sink_id: AtomicU64::new(1),
                guard: DispatchGuard::default(),
            }
        });

        Self { inner }
    }

    /// Get the current state
    pub fn state(&self) -> Arc<S> {
        self.inner
            .current_state()
            .expect("store state is resolved during construction")
    }

    /// Dispatch an action through the middleware chain and reducer
    pub fn dispatch(&self, action: A) {
        self.inner.dispatch(action);
    }

    /// Dispatcher handing actions back to this store from middleware or background tasks
    pub fn dispatcher(&self) -> Dispatcher<A> {
        let inner: Weak<Inner<S, A>> = Arc::downgrade(&self.inner);
        let target: Weak<dyn DispatchTarget<A>> = inner;
        Dispatcher::new(target)
    }

    /// Replace the middleware list and rebuild the dispatch chain
    ///
    /// Dispatches already running keep the chain they started with.
    pub fn set_middleware(&self, middleware: Vec<Box<dyn Middleware<S, A>>>) {
        let mut current = lock(&self.inner.middleware);
        *current = middleware;
        self.rebuild_chain(&current);
    }

    /// Append a middleware as the innermost stage and rebuild the dispatch chain
    pub fn add_middleware<M: Middleware<S, A> + 'static>(&self, middleware: M) {
        let mut current = lock(&self.inner.middleware);
        current.push(Box::new(middleware));
        self.rebuild_chain(&current);
    }

    fn rebuild_chain(&self, middleware: &[Box<dyn Middleware<S, A>>]) {
        let chain = Inner::build_chain(&Arc::downgrade(&self.inner), middleware);
        *self
            .inner
            .chain
            .write()
            .unwrap_or_else(PoisonError::into_inner) = chain;
        log::debug!("Store: rebuilt dispatch chain with {} middleware", middleware.len());
    }

    pub fn middleware_count(&self) -> usize {
        lock(&self.inner.middleware).len()
    }

    /// Subscribe to `(old, new)` state pairs
    ///
    /// The listener receives `(None, current)` before this returns.
    pub fn subscribe<L>(&self, listener: L) -> Unsubscribe
    where
        L: Fn(Option<&S>, &S) + Send + Sync + 'static,
    {
        let sink = Sink::new(self.inner.issue_sink_id(), listener);
        self.register(sink)
    }

    /// Subscribe to a projection of the state
    ///
    /// The listener receives `(None, selector(current))` before this returns,
    /// then `(selector(old), selector(new))` on every change.
    pub fn subscribe_with_selector<T, F, L>(&self, selector: F, listener: L) -> Unsubscribe
    where
        T: 'static,
        F: Fn(&S) -> T + Send + Sync + 'static,
        L: Fn(Option<&T>, &T) + Send + Sync + 'static,
    {
        let sink = Sink::new(self.inner.issue_sink_id(), listener).select(selector);
        self.register(sink)
    }

    fn register(&self, sink: Sink<S>) -> Unsubscribe {
        let id = self.inner.insert_sink(sink);
        let inner: Weak<Inner<S, A>> = Arc::downgrade(&self.inner);
        let registry: Weak<dyn SinkRegistry> = inner;
        Unsubscribe { id, registry }
    }

    /// Number of active subscriptions
    pub fn subscriber_count(&self) -> usize {
        lock(&self.inner.sinks).len()
    }
}

impl<S, A> Clone for Store<S, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S, A> fmt::Debug for Store<S, A>
where
    S: fmt::Debug + Send + Sync + 'static,
    A: Action,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.inner.current_state())
            .field("middleware", &self.middleware_count())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl<S, A> DispatchAction<A> for Store<S, A>
where
    S: Send + Sync + 'static,
    A: Action,
{
    fn dispatch(&self, action: A) {
        Store::dispatch(self, action);
    }
}

impl<S, A> StoreType<S, A> for Store<S, A>
where
    S: Send + Sync + 'static,
    A: Action,
{
    fn state(&self) -> Arc<S> {
        Store::state(self)
    }

    fn subscribe<L>(&self, listener: L) -> Unsubscribe
    where
        L: Fn(Option<&S>, &S) + Send + Sync + 'static,
    {
        Store::subscribe(self, listener)
    }

    fn subscribe_with_selector<T, F, L>(&self, selector: F, listener: L) -> Unsubscribe
    where
        T: 'static,
        F: Fn(&S) -> T + Send + Sync + 'static,
        L: Fn(Option<&T>, &T) + Send + Sync + 'static,
    {
        Store::subscribe_with_selector(self, selector, listener)
    }
}
