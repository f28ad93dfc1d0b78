//! Solve- and pass-level state shared by the engines.

use std::time::{Duration, Instant};

use teamforge_core::BalanceWarning;

use crate::event::{SolveTrace, TraceEvent};
use crate::stats::SolverStats;

/// State owned by one balancing run.
#[derive(Debug)]
pub struct SolverScope {
    start_time: Instant,
    stats: SolverStats,
    trace: SolveTrace,
    warnings: Vec<BalanceWarning>,
}

impl SolverScope {
    pub fn new(max_events: usize) -> Self {
        let mut stats = SolverStats::default();
        stats.start();
        Self {
            start_time: Instant::now(),
            stats,
            trace: SolveTrace::new(max_events),
            warnings: Vec::new(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn start_time(&self) -> Instant {
        self.start_time
    }

    pub fn stats(&self) -> &SolverStats {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut SolverStats {
        &mut self.stats
    }

    pub fn trace(&self) -> &SolveTrace {
        &self.trace
    }

    pub fn trace_mut(&mut self) -> &mut SolveTrace {
        &mut self.trace
    }

    pub fn record(&mut self, event: TraceEvent) {
        self.trace.record(event);
    }

    pub fn warn(&mut self, warning: BalanceWarning) {
        self.warnings.push(warning);
    }

    /// Freezes the statistics and hands back everything collected.
    pub fn finish(mut self) -> (SolverStats, SolveTrace, Vec<BalanceWarning>) {
        self.stats.finish();
        (self.stats, self.trace, self.warnings)
    }
}

/// State of one local-search pass.
#[derive(Debug, Clone)]
pub struct PassScope {
    pass_index: usize,
    step_count: u64,
    failed_attempts: u64,
    solve_start: Instant,
}

impl PassScope {
    pub fn new(pass_index: usize, solve_start: Instant) -> Self {
        Self {
            pass_index,
            step_count: 0,
            failed_attempts: 0,
            solve_start,
        }
    }

    pub fn pass_index(&self) -> usize {
        self.pass_index
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn increment_step_count(&mut self) -> u64 {
        self.step_count += 1;
        self.step_count
    }

    /// Rejected move evaluations so far in this pass.
    pub fn failed_attempts(&self) -> u64 {
        self.failed_attempts
    }

    pub fn record_failure(&mut self) {
        self.failed_attempts += 1;
    }

    /// Time since the whole run started, not just this pass.
    pub fn elapsed(&self) -> Duration {
        self.solve_start.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_scope_counters() {
        let mut scope = PassScope::new(2, Instant::now());
        assert_eq!(scope.increment_step_count(), 1);
        scope.record_failure();
        scope.record_failure();
        assert_eq!(scope.pass_index(), 2);
        assert_eq!(scope.step_count(), 1);
        assert_eq!(scope.failed_attempts(), 2);
    }

    #[test]
    fn test_finish_freezes_elapsed() {
        let mut scope = SolverScope::new(4);
        scope.record(TraceEvent::BestImproved { total: 0.1 });
        let (stats, trace, warnings) = scope.finish();
        assert!(stats.elapsed >= Duration::ZERO);
        assert_eq!(trace.events().len(), 1);
        assert!(warnings.is_empty());
    }
}
