//! Wall-clock budget tracking for timed searches.

use std::time::{Duration, Instant};

/// Tracks a single deadline from the moment of construction.
#[derive(Clone, Copy, Debug)]
pub struct TimeKeeper {
    deadline: Instant,
}

impl TimeKeeper {
    pub fn new(budget: Duration) -> Self {
        TimeKeeper {
            deadline: Instant::now() + budget,
        }
    }

    /// Whether the budget has run out.
    pub fn is_timeout(&self) -> bool {
        Instant::now() >= self.deadline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_after_budget() {
        let keeper = TimeKeeper::new(Duration::from_millis(0));
        assert!(keeper.is_timeout());

        let keeper = TimeKeeper::new(Duration::from_secs(3600));
        assert!(!keeper.is_timeout());
    }
}
