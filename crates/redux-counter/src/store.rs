use redux_core::{LoggingMiddleware, Middleware, Store};

use crate::actions::CounterAction;
use crate::config::CounterConfig;
use crate::middleware::{DoublingMiddleware, LimitMiddleware, QuitMiddleware};
use crate::reducer::counter_reducer;
use crate::state::CounterState;

pub type CounterStore = Store<CounterState, CounterAction>;

/// Middleware in dispatch order for `config`
pub fn middleware_for(
    config: &CounterConfig,
    quit: QuitMiddleware,
) -> Vec<Box<dyn Middleware<CounterState, CounterAction>>> {
    let mut middleware: Vec<Box<dyn Middleware<CounterState, CounterAction>>> = Vec::new();

    if config.log_actions {
        middleware.push(Box::new(LoggingMiddleware::new()));
    }
    middleware.push(Box::new(quit));
    if config.double_payloads {
        middleware.push(Box::new(DoublingMiddleware::new()));
    }
    if let Some(max) = config.max_value {
        middleware.push(Box::new(LimitMiddleware::new(max)));
    }

    middleware
}

/// Create the counter store described by `config`
pub fn create_store(config: &CounterConfig, quit: QuitMiddleware) -> CounterStore {
    let middleware = middleware_for(config, quit);
    let initial = config
        .initial_value
        .map(|value| CounterState::new(value, config.step));

    Store::new(initial, counter_reducer(config.step), middleware)
}
