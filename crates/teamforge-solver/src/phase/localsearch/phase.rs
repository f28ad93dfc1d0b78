//! Multi-pass swap descent.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use teamforge_core::{BalanceError, BalanceWarning, NonConvergenceReason, Result, ScoreBreakdown};
use teamforge_scoring::Split;
use tracing::{debug, info, trace, warn};

use super::acceptor::{BalanceAcceptor, MoveEvaluation};
use super::construction::{derive_seed, DraftConstruction};
use super::forager::BestMoveForager;
use super::moves::{swap_moves, SwapMove};
use super::penalty::{PenaltyAssessment, SoftPenalty};
use crate::event::{AcceptanceRule, RejectionReason, TraceEvent};
use crate::partition::remainder_policy_holds;
use crate::phase::{Phase, SearchContext};
use crate::scope::{PassScope, SolverScope};
use crate::termination::{OrTermination, StepCountTermination, Termination, TimeTermination};

/// Weights for pass `pass` of `passes`.
///
/// The first pass multiplies the core-ratings weight by
/// `1 + skill_emphasis` and renormalises; later passes blend linearly back
/// and the final pass uses `nominal` exactly.
pub fn pass_weights(nominal: &[f64; 5], skill_emphasis: f64, pass: usize, passes: usize) -> [f64; 5] {
    if passes <= 1 || pass + 1 >= passes {
        return *nominal;
    }
    let mut emphasised = *nominal;
    emphasised[0] *= 1.0 + skill_emphasis;
    let sum: f64 = emphasised.iter().sum();
    if sum > 0.0 {
        for weight in &mut emphasised {
            *weight /= sum;
        }
    }
    let lambda = pass as f64 / (passes - 1) as f64;
    std::array::from_fn(|i| (1.0 - lambda) * emphasised[i] + lambda * nominal[i])
}

/// A swap that passed its preconditions and the acceptor.
#[derive(Debug)]
struct Chosen {
    swap: SwapMove,
    split: Split,
    breakdown: ScoreBreakdown,
    assessment: PenaltyAssessment,
    rule: AcceptanceRule,
    net: f64,
}

/// Heuristic engine: seeded draft, then swap descent over several passes.
#[derive(Debug)]
pub struct LocalSearchPhase<'a> {
    context: SearchContext<'a>,
    acceptor: BalanceAcceptor,
    penalty: SoftPenalty,
}

impl<'a> LocalSearchPhase<'a> {
    pub fn new(context: SearchContext<'a>) -> Self {
        let heuristic = &context.config.heuristic;
        Self {
            acceptor: BalanceAcceptor::new(heuristic),
            penalty: SoftPenalty::new(heuristic.penalty),
            context,
        }
    }

    /// Evaluates every swap from `current` and returns the one to apply.
    fn select_move(
        &self,
        current: &Split,
        current_breakdown: &ScoreBreakdown,
        current_penalty: &PenaltyAssessment,
        weights: &[f64; 5],
        pass_scope: &mut PassScope,
        solver_scope: &mut SolverScope,
    ) -> Option<Chosen> {
        let pool = self.context.pool;
        let current_excess = self.context.guard.excess(pool, current);

        let mut forager = BestMoveForager::new();
        forager.step_started();
        for swap in swap_moves(self.context.partition, current) {
            let verdict = self.evaluate(
                swap,
                current,
                current_breakdown,
                current_penalty,
                current_excess,
                weights,
                pass_scope.failed_attempts(),
            );
            match verdict {
                Ok((excess, chosen)) => {
                    solver_scope.stats_mut().record_score_calculation();
                    solver_scope.stats_mut().record_move(true);
                    trace!(
                        event = "move",
                        team_a_player = swap.team_a_player,
                        team_b_player = swap.team_b_player,
                        net = chosen.net,
                        accepted = true,
                    );
                    forager.add_move((-(excess as f64), chosen.net), chosen);
                }
                Err(reason) => {
                    if reason == RejectionReason::NotAccepted {
                        solver_scope.stats_mut().record_score_calculation();
                    }
                    solver_scope.stats_mut().record_move(false);
                    pass_scope.record_failure();
                    trace!(
                        event = "move",
                        team_a_player = swap.team_a_player,
                        team_b_player = swap.team_b_player,
                        accepted = false,
                        reason = ?reason,
                    );
                    solver_scope.record(TraceEvent::SwapRejected {
                        pass: pass_scope.pass_index(),
                        step: pass_scope.step_count(),
                        team_a_player: pool.player(swap.team_a_player).id.clone(),
                        team_b_player: pool.player(swap.team_b_player).id.clone(),
                        reason,
                    });
                }
            }
        }
        forager.pick_move()
    }

    /// Checks the preconditions of one swap, then asks the acceptor.
    ///
    /// While `current` violates the guard only swaps that shrink the guard
    /// excess qualify, and they skip the acceptor.
    #[allow(clippy::too_many_arguments)]
    fn evaluate(
        &self,
        swap: SwapMove,
        current: &Split,
        current_breakdown: &ScoreBreakdown,
        current_penalty: &PenaltyAssessment,
        current_excess: usize,
        weights: &[f64; 5],
        failed_attempts: u64,
    ) -> std::result::Result<(usize, Chosen), RejectionReason> {
        let SearchContext {
            pool,
            partition,
            scorer,
            guard,
            ..
        } = self.context;
        let candidate = swap.apply(current);

        if partition.remainder_policy_applies()
            && !remainder_policy_holds(pool, partition, &candidate)
        {
            return Err(RejectionReason::RemainderPolicy);
        }
        let assessment = self.penalty.assess(pool, partition, &candidate);
        if assessment.catastrophic {
            return Err(RejectionReason::Catastrophic);
        }
        let repairing = current_excess > 0;
        let excess = guard.excess(pool, &candidate);
        if (repairing && excess >= current_excess) || (!repairing && excess > 0) {
            return Err(RejectionReason::Guard);
        }

        let breakdown = scorer.score_with(&candidate, weights);
        let evaluation = MoveEvaluation::new(
            current_breakdown,
            &breakdown,
            current_penalty.penalty,
            assessment.penalty,
        );
        let rule = if repairing {
            AcceptanceRule::Repair
        } else {
            self.acceptor
                .accept(&evaluation, failed_attempts)
                .ok_or(RejectionReason::NotAccepted)?
        };
        Ok((
            excess,
            Chosen {
                swap,
                split: candidate,
                breakdown,
                assessment,
                rule,
                net: evaluation.net_improvement(self.acceptor.penalty_weight()),
            },
        ))
    }
}

impl Phase for LocalSearchPhase<'_> {
    fn solve(&mut self, solver_scope: &mut SolverScope) -> Result<Split> {
        let SearchContext {
            pool,
            partition,
            scorer,
            guard,
            config,
        } = self.context;
        let heuristic = &config.heuristic;

        let seed = heuristic.seed.unwrap_or_else(|| derive_seed(pool));
        solver_scope.trace_mut().set_seed(seed);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let (mut current, first_pick) = DraftConstruction::new(pool, partition).construct(&mut rng);
        solver_scope.record(TraceEvent::HeuristicSeeded { seed, first_pick });

        let nominal = *scorer.weights();
        let initial_valid = guard.allows(pool, &current);
        let initial_total = scorer.score(&current).total();
        solver_scope.stats_mut().record_score_calculation();
        solver_scope.record(TraceEvent::ConstructionCompleted {
            total: initial_total,
            guard_valid: initial_valid,
        });
        info!(
            event = "phase_start",
            phase = self.phase_type_name(),
            seed = seed,
            initial_total = initial_total,
            guard_valid = initial_valid,
        );

        let mut best: Option<(f64, Split)> = initial_valid.then(|| (initial_total, current.clone()));

        let termination = OrTermination::new(
            StepCountTermination::new(heuristic.max_steps_per_pass),
            config.time_limit().map(TimeTermination::new),
        );
        let passes = heuristic.passes.max(1);
        let mut budget_exhausted = false;

        for pass in 0..passes {
            let weights = pass_weights(&nominal, heuristic.skill_emphasis, pass, passes);
            solver_scope.stats_mut().record_pass();
            solver_scope.record(TraceEvent::PassStarted { pass, weights });

            let mut pass_scope = PassScope::new(pass, solver_scope.start_time());
            let mut current_breakdown = scorer.score_with(&current, &weights);
            let mut current_penalty = self.penalty.assess(pool, partition, &current);
            let mut converged = false;

            loop {
                if termination.is_terminated(&pass_scope) {
                    budget_exhausted = true;
                    break;
                }
                let Some(chosen) = self.select_move(
                    &current,
                    &current_breakdown,
                    &current_penalty,
                    &weights,
                    &mut pass_scope,
                    solver_scope,
                ) else {
                    converged = true;
                    break;
                };

                let step = pass_scope.increment_step_count();
                solver_scope.stats_mut().record_step();
                solver_scope.record(TraceEvent::SwapAccepted {
                    pass,
                    step,
                    team_a_player: pool.player(chosen.swap.team_a_player).id.clone(),
                    team_b_player: pool.player(chosen.swap.team_b_player).id.clone(),
                    rule: chosen.rule,
                    net_improvement: chosen.net,
                    total: chosen.breakdown.total(),
                });
                trace!(
                    event = "step",
                    pass = pass,
                    step = step,
                    rule = ?chosen.rule,
                    total = chosen.breakdown.total(),
                );

                current = chosen.split;
                current_breakdown = chosen.breakdown;
                current_penalty = chosen.assessment;

                if guard.allows(pool, &current) {
                    let nominal_total = current_breakdown.weighted_total(&nominal);
                    let improved = match &best {
                        None => true,
                        Some((total, _)) => nominal_total < *total,
                    };
                    if improved {
                        solver_scope.record(TraceEvent::BestImproved {
                            total: nominal_total,
                        });
                        best = Some((nominal_total, current.clone()));
                    }
                }
            }

            solver_scope.record(TraceEvent::PassFinished {
                pass,
                steps: pass_scope.step_count(),
                converged,
            });
            debug!(
                event = "pass_end",
                pass = pass,
                steps = pass_scope.step_count(),
                failed_attempts = pass_scope.failed_attempts(),
                converged = converged,
                best_total = best.as_ref().map(|(total, _)| *total),
            );
        }

        let Some((best_total, best_split)) = best else {
            return Err(BalanceError::InfeasibleConstraint(
                "local search reached no split that satisfies the position guard".to_string(),
            ));
        };

        if best_total > heuristic.quality_target {
            let reason = if budget_exhausted {
                NonConvergenceReason::BudgetExhausted
            } else {
                NonConvergenceReason::ConvergedAboveTarget
            };
            warn!(
                event = "non_convergence",
                best_total = best_total,
                quality_target = heuristic.quality_target,
                reason = ?reason,
            );
            solver_scope.record(TraceEvent::NonConvergence {
                best_total,
                quality_target: heuristic.quality_target,
            });
            solver_scope.warn(BalanceWarning::NonConvergence {
                best_total,
                quality_target: heuristic.quality_target,
                reason,
            });
        }

        info!(
            event = "phase_end",
            phase = self.phase_type_name(),
            duration_ms = solver_scope.elapsed().as_millis() as u64,
            steps = solver_scope.stats().step_count,
            score = best_total,
        );
        Ok(best_split)
    }

    fn phase_type_name(&self) -> &'static str {
        "Local Search"
    }
}
