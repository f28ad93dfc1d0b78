//! Position component.

use teamforge_config::PositionConfig;
use teamforge_core::{PositionCategory, Team};

use crate::pool::Pool;
use crate::split::Split;

/// Head count per category for each team, indexed `[team][category]`.
pub fn category_counts(pool: &Pool, split: &Split) -> [[usize; 4]; 2] {
    let mut counts = [[0usize; 4]; 2];
    for (team_index, team) in [Team::A, Team::B].into_iter().enumerate() {
        for &i in split.members(team) {
            if let Some(category) = pool.player(i).category {
                counts[team_index][category.index()] += 1;
            }
        }
    }
    counts
}

/// Weighted mix of attacking-slot balance, category balance and missing categories.
pub fn position_imbalance(pool: &Pool, split: &Split, config: &PositionConfig) -> f64 {
    let larger = split
        .team_size(Team::A)
        .max(split.team_size(Team::B))
        .max(1) as f64;

    let slots = |team: Team| -> f64 {
        split
            .members(team)
            .iter()
            .map(|&i| pool.player(i).attacking_slot)
            .sum()
    };
    let attacking = ((slots(Team::A) - slots(Team::B)).abs() / larger).min(1.0);

    let counts = category_counts(pool, split);
    let category_gap: f64 = PositionCategory::ALL
        .iter()
        .map(|c| counts[0][c.index()].abs_diff(counts[1][c.index()]) as f64 / larger)
        .sum();
    let category_balance = (category_gap / PositionCategory::ALL.len() as f64).min(1.0);

    let totals = pool.category_totals();
    let mut eligible = 0usize;
    let mut missing = 0usize;
    for category in PositionCategory::OUTFIELD {
        let c = category.index();
        if totals[c] < 2 {
            continue;
        }
        eligible += 1;
        missing += counts.iter().filter(|team| team[c] == 0).count();
    }
    let missing_category = if eligible == 0 {
        0.0
    } else {
        missing as f64 / (2 * eligible) as f64
    };

    config.attacking_slot_weight * attacking
        + config.category_balance_weight * category_balance
        + config.missing_category_weight * missing_category
}
