//! Action contract
//!
//! Actions are caller-defined values describing an intended state change.
//! The store only needs to move them across threads and log them.

use std::fmt::Debug;

/// Marker for values that can be dispatched to a [`Store`](crate::Store)
///
/// Implemented for every `Debug + Send + 'static` type, so application action
/// enums need no extra boilerplate.
pub trait Action: Debug + Send + 'static {}

impl<T> Action for T where T: Debug + Send + 'static {}

/// Actions the store dispatches on its own
///
/// Action types opt into bootstrapping a store without an initial state by
/// implementing `From<BuiltInAction>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltInAction {
    /// Forces a reducer run when the store is created without a state
    Initialize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum TestAction {
        Initialize,
        Other,
    }

    impl From<BuiltInAction> for TestAction {
        fn from(action: BuiltInAction) -> Self {
            match action {
                BuiltInAction::Initialize => TestAction::Initialize,
            }
        }
    }

    fn assert_action<A: Action>(_: &A) {}

    #[test]
    fn test_blanket_action_impl() {
        assert_action(&TestAction::Other);
        assert_action(&42_u8);
        assert_action(&String::from("custom"));
    }

    #[test]
    fn test_initialize_converts_into_caller_action() {
        let action: TestAction = BuiltInAction::Initialize.into();
        assert_eq!(action, TestAction::Initialize);
    }
}
