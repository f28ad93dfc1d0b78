//! Swap moves between adjacent tiers.

use teamforge_core::Team;
use teamforge_scoring::Split;

use crate::partition::Partition;

/// Exchanges an unpinned Team A player with an unpinned Team B player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapMove {
    pub team_a_player: usize,
    pub team_b_player: usize,
}

impl SwapMove {
    pub fn apply(&self, split: &Split) -> Split {
        split.swapped(self.team_a_player, self.team_b_player)
    }
}

/// All swaps whose players' tiers differ by at most one.
///
/// Generated by Team A index, then Team B index. Pinned players have no
/// tier and never appear.
pub fn swap_moves(partition: &Partition, split: &Split) -> Vec<SwapMove> {
    let mut moves = Vec::new();
    for &a in split.members(Team::A) {
        let Some(tier_a) = partition.tier_of(a) else {
            continue;
        };
        for &b in split.members(Team::B) {
            let Some(tier_b) = partition.tier_of(b) else {
                continue;
            };
            if tier_a.abs_diff(tier_b) <= 1 {
                moves.push(SwapMove {
                    team_a_player: a,
                    team_b_player: b,
                });
            }
        }
    }
    moves
}
