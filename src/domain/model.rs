/// Values at or above this bound are dropped before reducing.
pub const DEFAULT_UPPER_BOUND: i64 = 1000;

/// Integers extracted from a body, in body order.
pub type NumberList = Vec<i64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalcSettings {
    /// Exclusive upper bound; values `>= upper_bound` are ignored.
    pub upper_bound: i64,
}

impl Default for CalcSettings {
    fn default() -> Self {
        Self {
            upper_bound: DEFAULT_UPPER_BOUND,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
}
