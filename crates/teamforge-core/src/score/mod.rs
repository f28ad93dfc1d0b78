//! Imbalance scores.
//!
//! Unlike most solver scores, lower is better: a total of zero means the two
//! teams are indistinguishable under every component.

mod breakdown;
mod imbalance;

pub use breakdown::{ChemistryBreakdown, Component, ScoreBreakdown};
pub use imbalance::ImbalanceScore;
