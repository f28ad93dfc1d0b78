//! Error types for teamforge

use serde::Serialize;
use thiserror::Error;

/// Main error type for balancing requests.
///
/// Every variant is fatal for the request. `Sizing`, `Data` and
/// `Configuration` are raised before any search begins.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BalanceError {
    /// Pool too small, or cannot be split into two teams after pinning.
    #[error("Sizing error: {0}")]
    Sizing(String),

    /// A required source is missing or a record is out of range.
    #[error("Data error: {0}")]
    Data(String),

    /// Weights or thresholds are invalid.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// No split satisfies the spread and hard constraints, even after relaxation.
    #[error("Infeasible constraint: {0}")]
    InfeasibleConstraint(String),

    /// The exact engine refuses a candidate space larger than its ceiling.
    #[error("Candidate count {candidates} exceeds exact search ceiling {ceiling}")]
    CandidateCeilingExceeded { candidates: u64, ceiling: u64 },
}

impl BalanceError {
    /// Returns true if the heuristic engine can take over from this error.
    pub fn is_fallback_signal(&self) -> bool {
        matches!(self, BalanceError::CandidateCeilingExceeded { .. })
    }
}

/// Result type alias for teamforge operations
pub type Result<T> = std::result::Result<T, BalanceError>;

/// Non-fatal conditions attached to a successful result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BalanceWarning {
    /// The heuristic engine stopped without reaching the quality target.
    NonConvergence {
        best_total: f64,
        quality_target: f64,
        reason: NonConvergenceReason,
    },
}

/// Why the heuristic engine stopped above its quality target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NonConvergenceReason {
    /// Step, pass or time budget ran out.
    BudgetExhausted,
    /// Every pass ended with no acceptable swap.
    ConvergedAboveTarget,
}

impl std::fmt::Display for BalanceWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BalanceWarning::NonConvergence {
                best_total,
                quality_target,
                reason,
            } => write!(
                f,
                "heuristic search stopped at {:.4} above target {:.4} ({:?})",
                best_total, quality_target, reason
            ),
        }
    }
}
