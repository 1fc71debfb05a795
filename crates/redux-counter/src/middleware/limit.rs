//! LimitMiddleware - blocks actions that would push the counter above a maximum

use std::sync::Arc;

use redux_core::{DispatchFn, Dispatcher, Middleware, StateAccessor};

use crate::actions::CounterAction;
use crate::state::CounterState;

pub struct LimitMiddleware {
    max: i64,
}

impl LimitMiddleware {
    pub fn new(max: i64) -> Self {
        Self { max }
    }
}

/// Value the counter would take after `action`, for actions that can raise it
fn projected_value(state: &CounterState, action: &CounterAction) -> Option<i64> {
    match action {
        CounterAction::Increment => Some(state.value.saturating_add(state.step)),
        CounterAction::Decrement => Some(state.value.saturating_sub(state.step)),
        CounterAction::Add(amount) => Some(state.value.saturating_add(*amount)),
        CounterAction::Reset => Some(state.start),
        CounterAction::Initialize | CounterAction::Quit => None,
    }
}

impl Middleware<CounterState, CounterAction> for LimitMiddleware {
    fn wrap(
        &self,
        state: StateAccessor<CounterState>,
        _dispatcher: Dispatcher<CounterAction>,
        next: DispatchFn<CounterAction>,
    ) -> DispatchFn<CounterAction> {
        let max = self.max;
        Arc::new(move |action: CounterAction| {
            let current = state.get();
            let projected = current.as_deref().and_then(|s| projected_value(s, &action));

            // Only block moves that go up past the limit, so an over-limit
            // counter can still be brought back down.
            if let (Some(current), Some(projected)) = (current, projected) {
                if projected > max && projected > current.value {
                    log::warn!(
                        "LimitMiddleware: blocked {:?} ({} would exceed {})",
                        action,
                        projected,
                        max
                    );
                    return;
                }
            }

            next(action);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reducer::counter_reducer;
    use redux_core::Store;

    fn limited_store(start: i64, max: i64) -> Store<CounterState, CounterAction> {
        Store::with_state(
            CounterState::new(start, 2),
            counter_reducer(2),
            vec![Box::new(LimitMiddleware::new(max))],
        )
    }

    #[test]
    fn test_blocks_increment_past_max() {
        let store = limited_store(8, 10);

        store.dispatch(CounterAction::Increment);
        assert_eq!(store.state().value, 10);

        store.dispatch(CounterAction::Increment);
        assert_eq!(store.state().value, 10);

        store.dispatch(CounterAction::Add(1));
        assert_eq!(store.state().value, 10);
    }

    #[test]
    fn test_allows_moving_down() {
        let store = limited_store(20, 10);

        store.dispatch(CounterAction::Decrement);
        assert_eq!(store.state().value, 18);

        store.dispatch(CounterAction::Add(1));
        assert_eq!(store.state().value, 18);
    }

    #[test]
    fn test_passes_through_without_state() {
        let store: Store<CounterState, CounterAction> = Store::new(
            None,
            counter_reducer(1),
            vec![Box::new(LimitMiddleware::new(0))],
        );
        assert_eq!(store.state().value, 0);
    }
}
