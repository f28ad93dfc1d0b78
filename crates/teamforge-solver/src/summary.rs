//! Per-team summaries for external rendering.

use serde::Serialize;
use teamforge_core::{PositionCategory, RatingKind, Team};
use teamforge_scoring::component::category_counts;
use teamforge_scoring::{Pool, Split};

/// Aggregate view of one team.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamSummary {
    pub team: Team,
    pub size: usize,
    /// Team-average core ratings, in `RatingKind::ALL` order.
    pub average_ratings: [f64; 4],
    pub average_skill: f64,
    pub total_skill: f64,
    pub experienced: usize,
    /// Head count per category, in `PositionCategory::ALL` order.
    pub category_counts: [usize; 4],
}

impl TeamSummary {
    pub fn of(pool: &Pool, split: &Split, team: Team) -> Self {
        let members = split.members(team);
        let size = members.len();
        let divisor = size.max(1) as f64;

        let mut average_ratings = [0.0; 4];
        for kind in RatingKind::ALL {
            let k = kind.index();
            average_ratings[k] =
                members.iter().map(|&i| pool.player(i).ratings[k]).sum::<f64>() / divisor;
        }
        let total_skill: f64 = members.iter().map(|&i| pool.player(i).skill).sum();
        let experienced = members
            .iter()
            .filter(|&&i| pool.player(i).experienced)
            .count();

        Self {
            team,
            size,
            average_ratings,
            average_skill: total_skill / divisor,
            total_skill,
            experienced,
            category_counts: category_counts(pool, split)[team.index()],
        }
    }

    pub fn category_count(&self, category: PositionCategory) -> usize {
        self.category_counts[category.index()]
    }
}
