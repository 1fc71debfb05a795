//! QuitMiddleware - consumes `Quit` and flags the main loop to stop

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use redux_core::{DispatchFn, Dispatcher, Middleware, StateAccessor};

use crate::actions::CounterAction;
use crate::state::CounterState;

pub struct QuitMiddleware {
    running: Arc<AtomicBool>,
}

impl QuitMiddleware {
    pub fn new() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Flag cleared once `Quit` has been dispatched
    pub fn running(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }
}

impl Default for QuitMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl Middleware<CounterState, CounterAction> for QuitMiddleware {
    fn wrap(
        &self,
        _state: StateAccessor<CounterState>,
        _dispatcher: Dispatcher<CounterAction>,
        next: DispatchFn<CounterAction>,
    ) -> DispatchFn<CounterAction> {
        let running = Arc::clone(&self.running);
        Arc::new(move |action: CounterAction| {
            if action == CounterAction::Quit {
                log::info!("QuitMiddleware: quit requested");
                running.store(false, Ordering::SeqCst);
                return;
            }
            next(action);
        })
    }
}
