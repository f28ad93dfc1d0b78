//! teamforge Core - domain types and scores for two-team balancing
//!
//! This crate provides the fundamental abstractions shared by every other
//! teamforge crate:
//! - Player records, position preferences and relation records
//! - Team labels and complete team assignments
//! - The imbalance score and its component breakdown
//! - The error and warning taxonomy

pub mod domain;
pub mod error;
pub mod score;

pub use domain::{
    AttributeKind, CoreRatings, PairChemistry, Player, PlayerId, PlaystyleAttributes, Position,
    PositionCategory, PositionPreference, RatingKind, RecentForm, RivalryEdge, Team,
    TeamAssignment, TrioChemistry, MAX_POSITION_PREFERENCES,
};
pub use error::{BalanceError, BalanceWarning, NonConvergenceReason, Result};
pub use score::{ChemistryBreakdown, Component, ImbalanceScore, ScoreBreakdown};
