//! Unidirectional state management core
//!
//! This crate provides:
//! - A [`Store`] holding exactly one state value, replaced only by a pure reducer
//! - A middleware chain that intercepts every action before it reaches the reducer
//! - Subscriptions ([`Sink`]s) that receive `(old, new)` pairs, optionally projected
//!   through a selector
//!
//! ## Flow
//!
//! ```text
//! dispatch(action) → middleware[0] → middleware[1] → … → reducer → state → sinks
//! ```
//!
//! ## Example
//!
//! ```rust
//! use redux_core::{BuiltInAction, Store};
//!
//! #[derive(Debug)]
//! enum Action {
//!     Initialize,
//!     Increment,
//! }
//!
//! impl From<BuiltInAction> for Action {
//!     fn from(_: BuiltInAction) -> Self {
//!         Action::Initialize
//!     }
//! }
//!
//! let store = Store::new(
//!     None,
//!     |action: &Action, state: Option<&i64>| match action {
//!         Action::Initialize => state.copied().unwrap_or_default(),
//!         Action::Increment => state.copied().unwrap_or_default() + 1,
//!     },
//!     Vec::new(),
//! );
//!
//! store.dispatch(Action::Increment);
//! assert_eq!(*store.state(), 1);
//! ```

pub mod action;
pub mod dispatcher;
pub mod error;
pub mod listener;
pub mod middleware;
pub mod reducer;
pub mod sink;
pub mod store;
pub mod store_type;

pub use action::{Action, BuiltInAction};
pub use dispatcher::Dispatcher;
pub use error::StoreError;
pub use listener::Listener;
pub use middleware::{DispatchFn, LoggingMiddleware, Middleware, StateAccessor};
pub use reducer::Reducer;
pub use sink::{Observer, Sink, SinkId};
pub use store::{Store, Unsubscribe};
pub use store_type::{DispatchAction, StoreType};
