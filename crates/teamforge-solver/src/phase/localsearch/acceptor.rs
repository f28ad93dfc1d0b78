//! Swap acceptance with a dynamic improvement threshold.

use teamforge_config::{AcceptanceConfig, LocalSearchConfig};
use teamforge_core::ScoreBreakdown;

use crate::event::AcceptanceRule;

/// Slack allowed on a component that was already zero.
const ZERO_COMPONENT_SLACK: f64 = 1e-9;

/// Before and after values of one candidate swap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveEvaluation {
    pub components_before: [f64; 5],
    pub components_after: [f64; 5],
    pub total_before: f64,
    pub total_after: f64,
    pub penalty_before: f64,
    pub penalty_after: f64,
}

impl MoveEvaluation {
    pub fn new(
        before: &ScoreBreakdown,
        after: &ScoreBreakdown,
        penalty_before: f64,
        penalty_after: f64,
    ) -> Self {
        Self {
            components_before: before.components(),
            components_after: after.components(),
            total_before: before.total(),
            total_after: after.total(),
            penalty_before,
            penalty_after,
        }
    }

    /// Score gain minus the weighted penalty increase.
    pub fn net_improvement(&self, penalty_weight: f64) -> f64 {
        (self.total_before - self.total_after)
            - penalty_weight * (self.penalty_after - self.penalty_before)
    }
}

/// Accepts a swap when several components improve together, or when its
/// net improvement clears a threshold that relaxes with failed attempts and
/// with how unbalanced the current split is.
#[derive(Debug, Clone, Copy)]
pub struct BalanceAcceptor {
    acceptance: AcceptanceConfig,
    penalty_weight: f64,
    penalty_cutoff: f64,
}

impl BalanceAcceptor {
    pub fn new(config: &LocalSearchConfig) -> Self {
        Self {
            acceptance: config.acceptance,
            penalty_weight: config.penalty.weight,
            penalty_cutoff: config.penalty.cutoff,
        }
    }

    pub fn penalty_weight(&self) -> f64 {
        self.penalty_weight
    }

    /// Required net improvement, as a fraction of the current total.
    pub fn dynamic_threshold(&self, failed_attempts: u64, current_total: f64) -> f64 {
        let a = &self.acceptance;
        let interval = a.relaxation_interval.max(1) as f64;
        let relaxed = a.min_relative_improvement
            / (1.0 + failed_attempts as f64 / interval)
            / (1.0 + current_total.max(0.0) / a.balance_reference);
        relaxed.max(a.threshold_floor)
    }

    pub fn accept(&self, evaluation: &MoveEvaluation, failed_attempts: u64) -> Option<AcceptanceRule> {
        let net = evaluation.net_improvement(self.penalty_weight);
        if self.multi_component(evaluation) && net > 0.0 {
            return Some(AcceptanceRule::MultiComponent);
        }
        let threshold = self.dynamic_threshold(failed_attempts, evaluation.total_before);
        if net > threshold * evaluation.total_before {
            return Some(AcceptanceRule::NetImprovement);
        }
        None
    }

    fn multi_component(&self, evaluation: &MoveEvaluation) -> bool {
        if evaluation.penalty_after >= self.penalty_cutoff {
            return false;
        }
        let limit = self.acceptance.max_component_regression;
        let mut improved = 0;
        for (&before, &after) in evaluation
            .components_before
            .iter()
            .zip(&evaluation.components_after)
        {
            if after < before {
                improved += 1;
                continue;
            }
            let allowed = if before > 0.0 {
                before * limit
            } else {
                ZERO_COMPONENT_SLACK + limit * evaluation.total_before
            };
            if after - before > allowed {
                return false;
            }
        }
        improved >= 2
    }
}
