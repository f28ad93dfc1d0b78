//! Step count termination.

use super::Termination;
use crate::scope::PassScope;

/// Terminates after a fixed number of steps in the pass.
///
/// # Example
///
/// ```
/// use teamforge_solver::termination::StepCountTermination;
///
/// let term = StepCountTermination::new(200);
/// assert_eq!(term.limit(), 200);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct StepCountTermination {
    limit: u64,
}

impl StepCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }
}

impl Termination for StepCountTermination {
    fn is_terminated(&self, pass_scope: &PassScope) -> bool {
        pass_scope.step_count() >= self.limit
    }
}
