/// Object-style subscriber receiving each new state
///
/// Stores accept listeners through
/// [`StoreType::subscribe_listener`](crate::StoreType::subscribe_listener),
/// which adapts them into a plain callback that ignores the previous value.
pub trait Listener<S>: Send + Sync {
    fn new_state(&self, state: &S);
}
