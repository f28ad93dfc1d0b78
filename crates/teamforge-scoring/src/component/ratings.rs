//! Core-ratings component.

use teamforge_core::{RatingKind, Team};

use super::{normalized_gap, team_mean};
use crate::pool::Pool;
use crate::split::Split;

/// Mean absolute gap of team-average core ratings, normalised by the scale.
pub fn core_ratings_imbalance(pool: &Pool, split: &Split, scale_max: f64) -> f64 {
    let total: f64 = RatingKind::ALL
        .iter()
        .map(|kind| {
            let k = kind.index();
            normalized_gap(
                team_mean(pool, split.members(Team::A), |p| p.ratings[k]),
                team_mean(pool, split.members(Team::B), |p| p.ratings[k]),
                scale_max,
            )
        })
        .sum();
    total / RatingKind::ALL.len() as f64
}
