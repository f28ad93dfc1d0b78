//! Wall-clock termination.

use std::time::Duration;

use super::Termination;
use crate::scope::PassScope;

/// Terminates once the run has used its time budget.
///
/// Measured from the start of the run, so the budget is shared by all passes.
#[derive(Debug, Clone, Copy)]
pub struct TimeTermination {
    limit: Duration,
}

impl TimeTermination {
    pub fn new(limit: Duration) -> Self {
        Self { limit }
    }

    pub fn millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }
}

impl Termination for TimeTermination {
    fn is_terminated(&self, pass_scope: &PassScope) -> bool {
        pass_scope.elapsed() >= self.limit
    }
}
