use std::sync::Arc;

/// Reducer - pure function that produces new state from an action and the current state
///
/// The state is `None` only while the store resolves its first state from
/// [`BuiltInAction::Initialize`](crate::BuiltInAction::Initialize).
/// Reducers must not dispatch; doing so from the reducer's own thread is fatal.
pub type Reducer<S, A> = Arc<dyn Fn(&A, Option<&S>) -> S + Send + Sync>;

/// Box a reducer function into a shareable [`Reducer`]
pub fn reducer<S, A, F>(reduce: F) -> Reducer<S, A>
where
    F: Fn(&A, Option<&S>) -> S + Send + Sync + 'static,
{
    Arc::new(reduce)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reducer_is_pure() {
        let reduce: Reducer<i32, i32> =
            reducer(|delta: &i32, state: Option<&i32>| state.copied().unwrap_or(10) + delta);

        assert_eq!(reduce(&5, Some(&1)), 6);
        assert_eq!(reduce(&5, Some(&1)), reduce(&5, Some(&1)));
        assert_eq!(reduce(&5, None), 15);
    }
}
