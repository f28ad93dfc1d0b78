//! Local search for pools too large to enumerate.
//!
//! A seeded tier draft builds the first split; swap descent then improves it
//! over several passes whose weights move from skill-heavy to nominal.

mod acceptor;
mod construction;
mod forager;
mod moves;
mod penalty;
mod phase;

pub use acceptor::{BalanceAcceptor, MoveEvaluation};
pub use construction::{derive_seed, DraftConstruction};
pub use forager::BestMoveForager;
pub use moves::{swap_moves, SwapMove};
pub use penalty::{PenaltyAssessment, SoftPenalty};
pub use phase::{pass_weights, LocalSearchPhase};
