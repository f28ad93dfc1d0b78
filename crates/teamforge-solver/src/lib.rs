//! Constrained two-team search for teamforge.
//!
//! [`Balancer`] is the entry point. It validates a request, partitions the
//! pool into skill tiers and runs one of two engines:
//! - [`ExhaustiveSearch`](phase::ExhaustiveSearch) scores every candidate
//!   that takes half of each tier, in parallel, and returns the optimum
//! - [`LocalSearchPhase`](phase::LocalSearchPhase) drafts a split from a
//!   seeded draw and improves it by swaps when the space is too large
//!
//! Both engines respect the [`PositionGuard`](guard::PositionGuard) and
//! never move pinned players.

pub mod event;
pub mod guard;
pub mod partition;
pub mod phase;
pub mod scope;
pub mod solver;
pub mod stats;
pub mod summary;
pub mod termination;

pub use event::{AcceptanceRule, RejectionReason, SolveTrace, TraceEvent};
pub use guard::PositionGuard;
pub use partition::{CandidateSpace, Partition};
pub use solver::{BalanceRequest, BalanceResult, Balancer, EngineKind};
pub use stats::SolverStats;
pub use summary::TeamSummary;
