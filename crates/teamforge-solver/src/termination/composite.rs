//! Composite termination.

use super::Termination;
use crate::scope::PassScope;

/// Terminates when either condition does.
#[derive(Debug, Clone)]
pub struct OrTermination<A, B> {
    first: A,
    second: B,
}

impl<A, B> OrTermination<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: Termination, B: Termination> Termination for OrTermination<A, B> {
    fn is_terminated(&self, pass_scope: &PassScope) -> bool {
        self.first.is_terminated(pass_scope) || self.second.is_terminated(pass_scope)
    }
}
