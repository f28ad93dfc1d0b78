//! Constraint partitioning: pins, skill buckets and team targets.
//!
//! The partition removes pinned players from the pool, sorts the rest by
//! skill proxy and cuts them into `bucket_count` tiers. A valid split takes
//! half of every tier for each team; see [`CandidateSpace`] for the
//! enumeration and [`remainder_policy_holds`] for odd pools.

mod candidates;
mod combinatorics;
mod remainder;

use smallvec::SmallVec;
use teamforge_config::ConstraintConfig;
use teamforge_core::{BalanceError, Result, Team};
use teamforge_scoring::Pool;

pub use candidates::{CandidateSpace, Shape};
pub use combinatorics::{binomial, unrank_combination};
pub use remainder::remainder_policy_holds;

/// Final team sizes for one orientation of the split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamTargets {
    pub team_a: usize,
    pub team_b: usize,
}

impl TeamTargets {
    pub fn of(self, team: Team) -> usize {
        match team {
            Team::A => self.team_a,
            Team::B => self.team_b,
        }
    }
}

/// Pins, tiers and admissible team sizes for one pool.
#[derive(Debug, Clone)]
pub struct Partition {
    pins: Vec<Option<Team>>,
    pinned_counts: [usize; 2],
    buckets: Vec<Vec<usize>>,
    tier_of: Vec<Option<usize>>,
    orientations: SmallVec<[TeamTargets; 2]>,
}

impl Partition {
    /// Builds the partition for `pool` with `pins` indexed by pool index.
    ///
    /// # Errors
    ///
    /// Returns `BalanceError::Sizing` when the pool cannot form two teams of
    /// `min_team_size`, or when the pins do not fit any admissible team sizes.
    pub fn new(pool: &Pool, pins: Vec<Option<Team>>, constraints: &ConstraintConfig) -> Result<Self> {
        let n = pool.len();
        debug_assert_eq!(pins.len(), n);

        if n < 2 * constraints.min_team_size {
            return Err(BalanceError::Sizing(format!(
                "pool of {n} players cannot form two teams of at least {} players",
                constraints.min_team_size
            )));
        }

        let mut pinned_counts = [0usize; 2];
        for team in pins.iter().flatten() {
            pinned_counts[team.index()] += 1;
        }

        let small = n / 2;
        let large = n - small;
        let mut orientations: SmallVec<[TeamTargets; 2]> = SmallVec::new();
        let candidates = if small == large {
            [Some(TeamTargets { team_a: small, team_b: small }), None]
        } else {
            [
                Some(TeamTargets { team_a: large, team_b: small }),
                Some(TeamTargets { team_a: small, team_b: large }),
            ]
        };
        for targets in candidates.into_iter().flatten() {
            if pinned_counts[0] <= targets.team_a && pinned_counts[1] <= targets.team_b {
                orientations.push(targets);
            }
        }
        if orientations.is_empty() {
            return Err(BalanceError::Sizing(format!(
                "{} players pinned to team A and {} to team B do not fit teams of {small} and {large}",
                pinned_counts[0], pinned_counts[1]
            )));
        }

        let mut unpinned: Vec<usize> = (0..n).filter(|&i| pins[i].is_none()).collect();
        // Strongest first; equal skill keeps id order.
        unpinned.sort_by(|&a, &b| {
            pool.player(b)
                .skill
                .total_cmp(&pool.player(a).skill)
                .then(a.cmp(&b))
        });

        let sizes = bucket_sizes(unpinned.len(), constraints.bucket_count);
        let mut buckets = Vec::with_capacity(sizes.len());
        let mut tier_of = vec![None; n];
        let mut rest = unpinned.as_slice();
        for (tier, size) in sizes.into_iter().enumerate() {
            let (bucket, tail) = rest.split_at(size);
            for &i in bucket {
                tier_of[i] = Some(tier);
            }
            buckets.push(bucket.to_vec());
            rest = tail;
        }

        Ok(Self {
            pins,
            pinned_counts,
            buckets,
            tier_of,
            orientations,
        })
    }

    pub fn player_count(&self) -> usize {
        self.pins.len()
    }

    pub fn pin(&self, index: usize) -> Option<Team> {
        self.pins[index]
    }

    pub fn pins(&self) -> &[Option<Team>] {
        &self.pins
    }

    pub fn is_pinned(&self, index: usize) -> bool {
        self.pins[index].is_some()
    }

    pub fn pinned_count(&self, team: Team) -> usize {
        self.pinned_counts[team.index()]
    }

    /// Unpinned players per tier, strongest tier first, each in skill order.
    pub fn buckets(&self) -> &[Vec<usize>] {
        &self.buckets
    }

    pub fn tier_of(&self, index: usize) -> Option<usize> {
        self.tier_of[index]
    }

    /// Admissible team sizes. Two entries for an odd pool when either team
    /// may take the extra player.
    pub fn orientations(&self) -> &[TeamTargets] {
        &self.orientations
    }

    /// The remainder policy only binds when the pins leave the choice of
    /// the larger team open.
    pub fn remainder_policy_applies(&self) -> bool {
        self.orientations.len() == 2
    }

    /// The weakest unpinned player, by skill proxy then id.
    pub fn weakest_unpinned(&self) -> Option<usize> {
        self.buckets.iter().rev().find_map(|bucket| bucket.last().copied())
    }
}

/// Bucket sizes for `m` players over `k` tiers.
///
/// The `m % k` extra players go to the tiers nearest the median tier, the
/// weaker tier first when two are equally near.
pub fn bucket_sizes(m: usize, k: usize) -> Vec<usize> {
    let k = k.max(1);
    let mut sizes = vec![m / k; k];
    let mut order: Vec<usize> = (0..k).collect();
    order.sort_by_key(|&i| ((2 * i).abs_diff(k - 1), std::cmp::Reverse(i)));
    for &tier in order.iter().take(m % k) {
        sizes[tier] += 1;
    }
    sizes
}
