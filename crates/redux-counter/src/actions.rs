use redux_core::BuiltInAction;

/// Actions represent all possible state changes of the counter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CounterAction {
    /// Store bootstrap, resolves the starting value
    Initialize,
    /// Add the configured step
    Increment,
    /// Subtract the configured step
    Decrement,
    /// Add an arbitrary amount
    Add(i64),
    /// Back to the starting value
    Reset,
    /// Stop the application (never reaches the reducer)
    Quit,
}

impl From<BuiltInAction> for CounterAction {
    fn from(action: BuiltInAction) -> Self {
        match action {
            BuiltInAction::Initialize => CounterAction::Initialize,
        }
    }
}
