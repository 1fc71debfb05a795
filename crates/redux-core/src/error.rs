use thiserror::Error;

/// Errors surfaced by the store
///
/// `ReentrantDispatch` is never returned: it is the message of the panic raised
/// when the reducer's own thread dispatches into the store mid-transition.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("reentrant dispatch of {action} while the reducer is running; reducers must not dispatch")]
    ReentrantDispatch { action: String },

    #[error("store has been dropped")]
    StoreDropped,
}
