//! Multi-component imbalance scoring for teamforge.
//!
//! This crate turns a request snapshot into a canonical [`Pool`] and scores
//! any [`Split`] of it:
//! - [`Pool`] resolves neutral defaults and validates every record once
//! - [`RelationIndex`] keeps only relations at or above their sample thresholds
//! - [`Scorer`] is a pure function from a split to a [`ScoreBreakdown`]
//!
//! [`ScoreBreakdown`]: teamforge_core::ScoreBreakdown

pub mod component;
pub mod pool;
pub mod relation;
pub mod scorer;
pub mod split;

pub use pool::{Pool, PoolPlayer};
pub use relation::{RelationIndex, Relations};
pub use scorer::Scorer;
pub use split::Split;
