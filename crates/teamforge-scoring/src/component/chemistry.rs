//! Chemistry component: pairwise, rivalry and trio sub-scores.

use teamforge_config::ChemistryConfig;
use teamforge_core::{ChemistryBreakdown, Team};

use crate::pool::Pool;
use crate::split::Split;

/// Running `(sum, count)` per team.
type TeamAccumulator = [(f64, usize); 2];

/// Scores chemistry over qualifying relations only.
///
/// With no qualifying relations at all every sub-score is zero, so a pool
/// without chemistry data contributes nothing rather than failing.
pub fn chemistry_imbalance(
    pool: &Pool,
    split: &Split,
    config: &ChemistryConfig,
) -> ChemistryBreakdown {
    let relations = pool.relations();

    let mut pair_acc: TeamAccumulator = [(0.0, 0); 2];
    for &(i, j, strength) in relations.pairs() {
        let side = split.side(i);
        if side == split.side(j) {
            let slot = &mut pair_acc[side.index()];
            slot.0 += strength;
            slot.1 += 1;
        }
    }

    // Net advantage from Team A's point of view, over cross-team pairs.
    let mut rivalry_sum = 0.0;
    let mut rivalry_count = 0usize;
    for &(i, j, net) in relations.rivalries() {
        let side = split.side(i);
        if side != split.side(j) {
            rivalry_sum += if side == Team::A { net } else { -net };
            rivalry_count += 1;
        }
    }

    let mut trio_acc: TeamAccumulator = [(0.0, 0); 2];
    for &([i, j, k], strength) in relations.trios() {
        let side = split.side(i);
        if side == split.side(j) && side == split.side(k) {
            let slot = &mut trio_acc[side.index()];
            slot.0 += strength;
            slot.1 += 1;
        }
    }

    let pairwise = same_team_gap(pair_acc, config);
    let rivalry = if rivalry_count == 0 {
        0.0
    } else {
        ((rivalry_sum / rivalry_count as f64).abs() / config.strength_scale).min(1.0)
    };
    let trio = same_team_gap(trio_acc, config);

    ChemistryBreakdown {
        pairwise,
        rivalry,
        trio,
        combined: config.pairwise_weight * pairwise
            + config.rivalry_weight * rivalry
            + config.trio_weight * trio,
    }
}

fn same_team_gap(acc: TeamAccumulator, config: &ChemistryConfig) -> f64 {
    if acc[0].1 == 0 && acc[1].1 == 0 {
        return 0.0;
    }
    let average = |(sum, count): (f64, usize)| {
        if count == 0 {
            config.neutral_strength
        } else {
            sum / count as f64
        }
    };
    ((average(acc[0]) - average(acc[1])).abs() / config.strength_scale).min(1.0)
}
