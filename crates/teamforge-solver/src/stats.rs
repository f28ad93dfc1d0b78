//! Solver statistics.

use std::time::{Duration, Instant};

use serde::Serialize;

/// Counters for one balancing run.
///
/// # Example
///
/// ```
/// use teamforge_solver::stats::SolverStats;
///
/// let mut stats = SolverStats::default();
/// stats.start();
/// stats.record_move(true);
/// stats.record_move(false);
/// stats.record_step();
///
/// assert_eq!(stats.moves_evaluated, 2);
/// assert_eq!(stats.moves_accepted, 1);
/// assert_eq!(stats.step_count, 1);
/// assert_eq!(stats.acceptance_rate(), 0.5);
/// ```
#[derive(Debug, Clone, Default, Serialize)]
pub struct SolverStats {
    #[serde(skip)]
    start_time: Option<Instant>,
    /// Size of the candidate space handed to the exact engine.
    pub candidates_total: u64,
    /// Candidates that passed every filter and were scored.
    pub candidates_evaluated: u64,
    pub guard_rejections: u64,
    pub remainder_rejections: u64,
    pub moves_evaluated: u64,
    pub moves_accepted: u64,
    pub step_count: u64,
    pub pass_count: u64,
    pub score_calculations: u64,
    /// Wall-clock time, frozen by [`finish`](Self::finish).
    pub elapsed: Duration,
}

impl SolverStats {
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.map(|t| t.elapsed()).unwrap_or_default()
    }

    pub fn finish(&mut self) {
        self.elapsed = self.elapsed();
    }

    pub fn record_move(&mut self, accepted: bool) {
        self.moves_evaluated += 1;
        if accepted {
            self.moves_accepted += 1;
        }
    }

    pub fn record_step(&mut self) {
        self.step_count += 1;
    }

    pub fn record_pass(&mut self) {
        self.pass_count += 1;
    }

    pub fn record_score_calculation(&mut self) {
        self.score_calculations += 1;
    }

    pub fn acceptance_rate(&self) -> f64 {
        if self.moves_evaluated == 0 {
            0.0
        } else {
            self.moves_accepted as f64 / self.moves_evaluated as f64
        }
    }
}
