use crate::actions::CounterAction;
use crate::state::CounterState;

/// Reducer - pure function that produces new state from current state + action
///
/// Without a current state (store bootstrap) the counter starts at zero with `step`.
pub fn reduce(action: &CounterAction, state: Option<&CounterState>, step: i64) -> CounterState {
    let mut state = state.cloned().unwrap_or_else(|| CounterState::new(0, step));
    let before = state.value;

    match action {
        CounterAction::Initialize => {}
        CounterAction::Increment => state.value = state.value.saturating_add(state.step),
        CounterAction::Decrement => state.value = state.value.saturating_sub(state.step),
        CounterAction::Add(amount) => state.value = state.value.saturating_add(*amount),
        CounterAction::Reset => state.value = state.start,
        CounterAction::Quit => {
            // Consumed by QuitMiddleware
        }
    }

    if state.value != before {
        state.changes += 1;
    }

    state
}

/// Reducer for a store, bootstrapping with `step`
pub fn counter_reducer(
    step: i64,
) -> impl Fn(&CounterAction, Option<&CounterState>) -> CounterState + Send + Sync + 'static {
    move |action: &CounterAction, state: Option<&CounterState>| reduce(action, state, step)
}
