//! Counter State

/// Application state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterState {
    pub value: i64,
    /// Value restored by `Reset`
    pub start: i64,
    /// Amount added by `Increment` and removed by `Decrement`
    pub step: i64,
    /// Number of reducer runs that changed `value`
    pub changes: u64,
}

impl CounterState {
    pub fn new(start: i64, step: i64) -> Self {
        Self {
            value: start,
            start,
            step,
            changes: 0,
        }
    }

    pub fn is_even(&self) -> bool {
        self.value % 2 == 0
    }
}

impl Default for CounterState {
    fn default() -> Self {
        Self::new(0, 1)
    }
}
