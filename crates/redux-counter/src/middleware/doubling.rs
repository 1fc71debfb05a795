//! DoublingMiddleware - doubles every `Add` payload before it reaches the reducer

use std::sync::Arc;

use redux_core::{DispatchFn, Dispatcher, Middleware, StateAccessor};

use crate::actions::CounterAction;
use crate::state::CounterState;

pub struct DoublingMiddleware;

impl DoublingMiddleware {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DoublingMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl Middleware<CounterState, CounterAction> for DoublingMiddleware {
    fn wrap(
        &self,
        _state: StateAccessor<CounterState>,
        _dispatcher: Dispatcher<CounterAction>,
        next: DispatchFn<CounterAction>,
    ) -> DispatchFn<CounterAction> {
        Arc::new(move |action: CounterAction| match action {
            CounterAction::Add(amount) => next(CounterAction::Add(amount.saturating_mul(2))),
            other => next(other),
        })
    }
}
