//! Structured trace of a balancing run.
//!
//! The trace is data, not text: callers render it however they like. It is
//! capped at `trace.max_events`; events past the cap are counted but dropped.

use serde::Serialize;
use teamforge_core::{PlayerId, Team};

/// Which rule accepted a swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AcceptanceRule {
    /// Several components improved and none regressed too far.
    MultiComponent,
    /// Net improvement cleared the dynamic threshold.
    NetImprovement,
    /// Reduced the guard excess of a split that violates the guard.
    Repair,
}

/// Why a swap was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    Guard,
    RemainderPolicy,
    Catastrophic,
    NotAccepted,
}

/// One recorded decision or milestone.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraceEvent {
    SolveStarted {
        players: usize,
        pinned: usize,
    },
    PlayerPinned {
        player: PlayerId,
        team: Team,
        explicit: bool,
    },
    ExactSearchStarted {
        candidates: u64,
        relaxed: bool,
    },
    CandidatesRejected {
        guard: u64,
        remainder_policy: u64,
    },
    ExactSearchFinished {
        evaluated: u64,
        best_total: Option<f64>,
    },
    SpreadRelaxed {
        reason: String,
    },
    FallbackToHeuristic {
        candidates: u64,
        ceiling: u64,
    },
    HeuristicSeeded {
        seed: u64,
        first_pick: Team,
    },
    ConstructionCompleted {
        total: f64,
        guard_valid: bool,
    },
    PassStarted {
        pass: usize,
        weights: [f64; 5],
    },
    SwapAccepted {
        pass: usize,
        step: u64,
        team_a_player: PlayerId,
        team_b_player: PlayerId,
        rule: AcceptanceRule,
        net_improvement: f64,
        total: f64,
    },
    SwapRejected {
        pass: usize,
        step: u64,
        team_a_player: PlayerId,
        team_b_player: PlayerId,
        reason: RejectionReason,
    },
    BestImproved {
        total: f64,
    },
    PassFinished {
        pass: usize,
        steps: u64,
        converged: bool,
    },
    NonConvergence {
        best_total: f64,
        quality_target: f64,
    },
}

/// Bounded list of [`TraceEvent`]s plus the heuristic seed, if any.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolveTrace {
    events: Vec<TraceEvent>,
    dropped: u64,
    #[serde(skip)]
    max_events: usize,
    seed: Option<u64>,
}

impl SolveTrace {
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Vec::new(),
            dropped: 0,
            max_events,
            seed: None,
        }
    }

    pub fn record(&mut self, event: TraceEvent) {
        if self.events.len() < self.max_events {
            self.events.push(event);
        } else {
            self.dropped += 1;
        }
    }

    pub fn set_seed(&mut self, seed: u64) {
        self.seed = Some(seed);
    }

    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// Events lost to the cap.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Seed of the heuristic draft, when the heuristic engine ran.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn contains(&self, predicate: impl Fn(&TraceEvent) -> bool) -> bool {
        self.events.iter().any(predicate)
    }
}
