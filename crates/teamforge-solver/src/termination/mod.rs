//! Termination conditions for local-search passes.

mod composite;
mod step_count;
mod time;

use std::fmt::Debug;

use crate::scope::PassScope;

pub use composite::OrTermination;
pub use step_count::StepCountTermination;
pub use time::TimeTermination;

/// Decides when a pass stops taking steps.
pub trait Termination: Send + Debug {
    /// Returns true if the pass should stop.
    fn is_terminated(&self, pass_scope: &PassScope) -> bool;
}

/// An absent condition never fires.
impl<T: Termination> Termination for Option<T> {
    fn is_terminated(&self, pass_scope: &PassScope) -> bool {
        self.as_ref().is_some_and(|t| t.is_terminated(pass_scope))
    }
}
