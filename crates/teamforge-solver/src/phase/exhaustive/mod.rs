//! Exhaustive search over the spread-constrained candidate space.
//!
//! Candidates are scored in parallel on a dedicated rayon pool and reduced
//! under a total order: lower total first, then the lexicographically
//! smallest Team A. The order is associative and commutative, so the result
//! does not depend on how many workers ran or how they were scheduled.

use std::cmp::Ordering;

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use teamforge_core::{BalanceError, ImbalanceScore, Result, Team};
use teamforge_scoring::Split;
use tracing::{debug, info, trace, warn};

use super::{Phase, SearchContext};
use crate::event::TraceEvent;
use crate::partition::{remainder_policy_holds, CandidateSpace};
use crate::scope::SolverScope;

/// Optimal search within the spread constraint.
#[derive(Debug)]
pub struct ExhaustiveSearch<'a> {
    context: SearchContext<'a>,
    threads: usize,
    max_candidates: u64,
}

impl<'a> ExhaustiveSearch<'a> {
    pub fn new(context: SearchContext<'a>) -> Self {
        Self {
            threads: context.config.exact.thread_count.resolve(),
            max_candidates: context.config.exact.max_candidates,
            context,
        }
    }

    /// Overrides the configured worker count.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    fn check_ceiling(&self, space: &CandidateSpace<'_>) -> Result<()> {
        if space.count() > self.max_candidates {
            return Err(BalanceError::CandidateCeilingExceeded {
                candidates: space.count(),
                ceiling: self.max_candidates,
            });
        }
        Ok(())
    }

    fn search(
        &self,
        space: &CandidateSpace<'_>,
        enforce_remainder_policy: bool,
        solver_scope: &mut SolverScope,
    ) -> Result<Option<Split>> {
        solver_scope.record(TraceEvent::ExactSearchStarted {
            candidates: space.count(),
            relaxed: space.is_relaxed(),
        });

        let workers = ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .build()
            .map_err(|e| {
                BalanceError::Configuration(format!(
                    "cannot start {} search workers: {e}",
                    self.threads
                ))
            })?;

        let context = self.context;
        let reduction = workers.install(|| {
            (0..space.count())
                .into_par_iter()
                .fold(Reduction::default, |acc, index| {
                    acc.visit(&context, space, index, enforce_remainder_policy)
                })
                .reduce(Reduction::default, Reduction::merge)
        });

        let stats = solver_scope.stats_mut();
        stats.candidates_total += space.count();
        stats.candidates_evaluated += reduction.evaluated;
        stats.guard_rejections += reduction.guard_rejected;
        stats.remainder_rejections += reduction.remainder_rejected;
        stats.score_calculations += reduction.evaluated;

        solver_scope.record(TraceEvent::CandidatesRejected {
            guard: reduction.guard_rejected,
            remainder_policy: reduction.remainder_rejected,
        });
        solver_scope.record(TraceEvent::ExactSearchFinished {
            evaluated: reduction.evaluated,
            best_total: reduction.best.as_ref().map(|(score, _)| score.value()),
        });
        debug!(
            event = "candidates_reduced",
            relaxed = space.is_relaxed(),
            evaluated = reduction.evaluated,
            guard_rejected = reduction.guard_rejected,
            remainder_rejected = reduction.remainder_rejected,
        );

        Ok(reduction.best.map(|(_, split)| split))
    }
}

impl Phase for ExhaustiveSearch<'_> {
    fn solve(&mut self, solver_scope: &mut SolverScope) -> Result<Split> {
        let partition = self.context.partition;
        let strict = CandidateSpace::strict(partition);
        self.check_ceiling(&strict)?;

        info!(
            event = "phase_start",
            phase = self.phase_type_name(),
            candidates = strict.count(),
            workers = self.threads,
        );

        let found = if strict.is_empty() {
            None
        } else {
            self.search(&strict, partition.remainder_policy_applies(), solver_scope)?
        };
        if let Some(split) = found {
            info!(
                event = "phase_end",
                phase = self.phase_type_name(),
                relaxed = false,
                duration_ms = solver_scope.elapsed().as_millis() as u64,
            );
            return Ok(split);
        }

        let reason = if strict.is_empty() {
            "bucket halves cannot meet the team sizes"
        } else {
            "no strict candidate satisfies the position guard and remainder policy"
        };
        warn!(event = "spread_relaxed", reason = reason);
        solver_scope.record(TraceEvent::SpreadRelaxed {
            reason: reason.to_string(),
        });

        let relaxed = CandidateSpace::relaxed(partition);
        self.check_ceiling(&relaxed)?;
        let split = self.search(&relaxed, false, solver_scope)?.ok_or_else(|| {
            BalanceError::InfeasibleConstraint(format!(
                "none of {} relaxed candidates satisfies the position guard",
                relaxed.count()
            ))
        })?;

        info!(
            event = "phase_end",
            phase = self.phase_type_name(),
            relaxed = true,
            duration_ms = solver_scope.elapsed().as_millis() as u64,
        );
        Ok(split)
    }

    fn phase_type_name(&self) -> &'static str {
        "Exhaustive Search"
    }
}

/// Partial result of a worker's share of the candidates.
#[derive(Debug, Default)]
struct Reduction {
    best: Option<(ImbalanceScore, Split)>,
    evaluated: u64,
    guard_rejected: u64,
    remainder_rejected: u64,
}

impl Reduction {
    fn visit(
        mut self,
        context: &SearchContext<'_>,
        space: &CandidateSpace<'_>,
        index: u64,
        enforce_remainder_policy: bool,
    ) -> Self {
        let split = space.candidate(index);
        if !context.guard.allows(context.pool, &split) {
            trace!(event = "candidate", index = index, rejected = "guard");
            self.guard_rejected += 1;
            return self;
        }
        if enforce_remainder_policy
            && !remainder_policy_holds(context.pool, context.partition, &split)
        {
            trace!(event = "candidate", index = index, rejected = "remainder_policy");
            self.remainder_rejected += 1;
            return self;
        }
        let score = context.scorer.score(&split).score();
        trace!(event = "candidate", index = index, score = %score);
        self.evaluated += 1;
        self.offer(score, split);
        self
    }

    fn offer(&mut self, score: ImbalanceScore, split: Split) {
        let replace = match &self.best {
            None => true,
            Some((best_score, best_split)) => {
                compare_candidates((&score, &split), (best_score, best_split)) == Ordering::Less
            }
        };
        if replace {
            self.best = Some((score, split));
        }
    }

    fn merge(mut self, other: Self) -> Self {
        self.evaluated += other.evaluated;
        self.guard_rejected += other.guard_rejected;
        self.remainder_rejected += other.remainder_rejected;
        if let Some((score, split)) = other.best {
            self.offer(score, split);
        }
        self
    }
}

/// Total order on scored candidates: lower score, then smaller Team A.
///
/// Pool indices are id ranks, so comparing sorted index lists compares the
/// sorted id lists.
fn compare_candidates(a: (&ImbalanceScore, &Split), b: (&ImbalanceScore, &Split)) -> Ordering {
    a.0.cmp(b.0)
        .then_with(|| a.1.members(Team::A).cmp(b.1.members(Team::A)))
}

#[cfg(test)]
mod tests;
