//! LoggingMiddleware - logs all actions for debugging

use std::sync::Arc;

use super::{DispatchFn, Middleware, StateAccessor};
use crate::action::Action;
use crate::dispatcher::Dispatcher;

/// LoggingMiddleware - logs every action passing through, then forwards it unchanged
#[derive(Debug, Clone, Copy)]
pub struct LoggingMiddleware {
    level: log::Level,
}

impl LoggingMiddleware {
    pub fn new() -> Self {
        Self {
            level: log::Level::Debug,
        }
    }

    /// Log at `level` instead of `Debug`
    pub fn with_level(level: log::Level) -> Self {
        Self { level }
    }

    pub fn level(&self) -> log::Level {
        self.level
    }
}

impl Default for LoggingMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, A: Action> Middleware<S, A> for LoggingMiddleware {
    fn wrap(
        &self,
        _state: StateAccessor<S>,
        _dispatcher: Dispatcher<A>,
        next: DispatchFn<A>,
    ) -> DispatchFn<A> {
        let level = self.level;
        Arc::new(move |action: A| {
            log::log!(level, "Action: {:?}", action);
            next(action);
        })
    }
}
