//! Relation fixtures.

use teamforge_core::{PairChemistry, Player, RivalryEdge, TrioChemistry};
use teamforge_scoring::Relations;

/// Deterministic pairs, rivalries and trios over consecutive players.
pub fn chemistry_web(players: &[Player]) -> Relations {
    let mut relations = Relations::new();
    for (i, window) in players.windows(2).enumerate() {
        let strength = 30.0 + (i * 17 % 60) as f64;
        relations = relations.with_pair(PairChemistry::new(
            window[0].id.clone(),
            window[1].id.clone(),
            5,
            strength,
        ));
        if i % 2 == 0 {
            relations = relations.with_rivalry(RivalryEdge::new(
                window[0].id.clone(),
                window[1].id.clone(),
                4,
                (i as f64 * 13.0) % 40.0 - 20.0,
            ));
        }
    }
    for (i, window) in players.windows(3).enumerate().step_by(3) {
        relations = relations.with_trio(TrioChemistry::new(
            window[0].id.clone(),
            window[1].id.clone(),
            window[2].id.clone(),
            4,
            40.0 + (i * 11 % 50) as f64,
        ));
    }
    relations
}

/// Strong pairs among the players of `left` and among those of `right`.
pub fn clustered_pairs(left: &[&str], right: &[&str]) -> Relations {
    let mut relations = Relations::new();
    for group in [left, right] {
        for (i, a) in group.iter().enumerate() {
            for b in &group[i + 1..] {
                relations = relations.with_pair(PairChemistry::new(*a, *b, 10, 95.0));
            }
        }
    }
    relations
}
