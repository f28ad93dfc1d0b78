//! Recent-form component.

use teamforge_config::PerformanceConfig;
use teamforge_core::Team;

use crate::pool::Pool;
use crate::split::Split;

const WIN_RATE_SCALE: f64 = 100.0;

/// Average of the win-rate gap and the goal-differential gap.
///
/// Only players whose form window met the minimum games contribute. A team
/// with no such player is read as neutral.
pub fn performance_imbalance(pool: &Pool, split: &Split, config: &PerformanceConfig) -> f64 {
    let (win_a, gd_a) = team_form(pool, split.members(Team::A), config);
    let (win_b, gd_b) = team_form(pool, split.members(Team::B), config);

    let win_gap = ((win_a - win_b).abs() / WIN_RATE_SCALE).min(1.0);
    let gd_gap = ((gd_a - gd_b).abs() / config.goal_differential_scale).min(1.0);
    (win_gap + gd_gap) / 2.0
}

fn team_form(pool: &Pool, members: &[usize], config: &PerformanceConfig) -> (f64, f64) {
    let mut win_sum = 0.0;
    let mut gd_sum = 0.0;
    let mut count = 0usize;
    for &i in members {
        if let Some((win_rate, goal_differential)) = pool.player(i).form {
            win_sum += win_rate;
            gd_sum += goal_differential;
            count += 1;
        }
    }
    if count == 0 {
        (config.neutral_win_rate, 0.0)
    } else {
        (win_sum / count as f64, gd_sum / count as f64)
    }
}
