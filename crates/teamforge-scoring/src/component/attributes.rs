//! Playstyle attributes component.

use teamforge_core::{AttributeKind, Team};

use super::{normalized_gap, team_mean};
use crate::pool::Pool;
use crate::split::Split;

/// Mean absolute gap of team-average attributes. Attributes are already in `[0, 1]`.
pub fn attributes_imbalance(pool: &Pool, split: &Split) -> f64 {
    let total: f64 = AttributeKind::ALL
        .iter()
        .map(|kind| {
            let k = kind.index();
            normalized_gap(
                team_mean(pool, split.members(Team::A), |p| p.attributes[k]),
                team_mean(pool, split.members(Team::B), |p| p.attributes[k]),
                1.0,
            )
        })
        .sum();
    total / AttributeKind::ALL.len() as f64
}
