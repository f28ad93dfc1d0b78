//! Search engines.
//!
//! - [`ExhaustiveSearch`]: scores every spread-constrained candidate in parallel
//! - [`LocalSearchPhase`]: seeded draft followed by multi-pass swap descent

pub mod exhaustive;
pub mod localsearch;

use std::fmt::Debug;

use teamforge_config::BalanceConfig;
use teamforge_core::Result;
use teamforge_scoring::{Pool, Scorer, Split};

use crate::guard::PositionGuard;
use crate::partition::Partition;
use crate::scope::SolverScope;

pub use exhaustive::ExhaustiveSearch;
pub use localsearch::LocalSearchPhase;

/// Read-only inputs shared by every engine of one run.
#[derive(Debug, Clone, Copy)]
pub struct SearchContext<'a> {
    pub pool: &'a Pool,
    pub partition: &'a Partition,
    pub scorer: Scorer<'a>,
    pub guard: PositionGuard,
    pub config: &'a BalanceConfig,
}

impl<'a> SearchContext<'a> {
    pub fn new(pool: &'a Pool, partition: &'a Partition, config: &'a BalanceConfig) -> Self {
        Self {
            pool,
            partition,
            scorer: Scorer::new(pool, config),
            guard: PositionGuard::new(config.constraints.max_position_gap),
            config,
        }
    }
}

/// A search engine.
///
/// A phase returns the best guard-valid split it found, or an error when
/// none exists. Trace events, statistics and warnings go to the scope.
pub trait Phase: Debug {
    fn solve(&mut self, solver_scope: &mut SolverScope) -> Result<Split>;

    fn phase_type_name(&self) -> &'static str;
}
