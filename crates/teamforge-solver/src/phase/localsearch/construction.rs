//! Seeded alternating draft over skill tiers.

use rand::Rng;
use teamforge_core::Team;
use teamforge_scoring::{Pool, Split};

use crate::partition::{remainder_policy_holds, Partition};

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Deterministic seed from the sorted player ids (FNV-1a).
pub fn derive_seed(pool: &Pool) -> u64 {
    let mut hash = FNV_OFFSET;
    for player in pool.players() {
        for &byte in player.id.as_str().as_bytes() {
            hash ^= u64::from(byte);
            hash = hash.wrapping_mul(FNV_PRIME);
        }
        // Separator so "ab","c" and "a","bc" differ.
        hash ^= 0xff;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Builds the initial split.
///
/// Tiers are drafted strongest first. Inside a tier the teams alternate
/// picks; the first picker is drawn once and alternates tier to tier. A
/// team at capacity passes its pick to the other. For an odd pool whose
/// larger team is still open, the weakest unpinned player sits out the
/// draft and joins the team the remainder policy allows, Team A first.
#[derive(Debug, Clone, Copy)]
pub struct DraftConstruction<'a> {
    pool: &'a Pool,
    partition: &'a Partition,
}

impl<'a> DraftConstruction<'a> {
    pub fn new(pool: &'a Pool, partition: &'a Partition) -> Self {
        Self { pool, partition }
    }

    /// Returns the split and the team that picked first.
    pub fn construct<R: Rng>(&self, rng: &mut R) -> (Split, Team) {
        let partition = self.partition;
        let n = partition.player_count();

        let held_out = if partition.remainder_policy_applies() {
            partition.weakest_unpinned()
        } else {
            None
        };
        let capacity = match (held_out, partition.orientations().first()) {
            (Some(_), _) | (None, None) => [n / 2, n / 2],
            (None, Some(targets)) => [targets.team_a, targets.team_b],
        };

        let mut sides: Vec<Team> = partition
            .pins()
            .iter()
            .map(|pin| pin.unwrap_or(Team::A))
            .collect();
        let mut counts = [partition.pinned_count(Team::A), partition.pinned_count(Team::B)];

        let first_pick = if rng.random_bool(0.5) { Team::A } else { Team::B };
        for (tier, bucket) in partition.buckets().iter().enumerate() {
            let mut turn = if tier % 2 == 0 {
                first_pick
            } else {
                first_pick.other()
            };
            for &player in bucket {
                if Some(player) == held_out {
                    continue;
                }
                let team = if counts[turn.index()] < capacity[turn.index()] {
                    turn
                } else {
                    turn.other()
                };
                sides[player] = team;
                counts[team.index()] += 1;
                turn = turn.other();
            }
        }

        if let Some(extra) = held_out {
            sides[extra] = Team::A;
            let with_a = Split::from_sides(sides.clone());
            if remainder_policy_holds(self.pool, partition, &with_a) {
                return (with_a, first_pick);
            }
            sides[extra] = Team::B;
        }
        (Split::from_sides(sides), first_pick)
    }
}
