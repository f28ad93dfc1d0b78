//! Soft penalties for the swap search.

use teamforge_config::SoftPenaltyConfig;
use teamforge_core::{PositionCategory, Team};
use teamforge_scoring::component::category_counts;
use teamforge_scoring::{Pool, Split};

use crate::partition::Partition;

/// Penalty of one split.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenaltyAssessment {
    /// Sum of squared excess over each dimension's threshold.
    pub penalty: f64,
    /// Largest gap on any penalised dimension.
    pub worst_gap: usize,
    /// Some gap exceeds the catastrophic limit.
    pub catastrophic: bool,
}

/// Penalises tier clustering, outfield-category concentration and
/// experience imbalance.
#[derive(Debug, Clone, Copy)]
pub struct SoftPenalty {
    config: SoftPenaltyConfig,
}

impl SoftPenalty {
    pub fn new(config: SoftPenaltyConfig) -> Self {
        Self { config }
    }

    pub fn assess(&self, pool: &Pool, partition: &Partition, split: &Split) -> PenaltyAssessment {
        let mut penalty = 0.0;
        let mut worst_gap = 0usize;
        let mut add = |gap: usize, threshold: u32| {
            let excess = gap.saturating_sub(threshold as usize) as f64;
            penalty += excess * excess;
            worst_gap = worst_gap.max(gap);
        };

        for bucket in partition.buckets() {
            let on_a = bucket.iter().filter(|&&i| split.side(i) == Team::A).count();
            add(on_a.abs_diff(bucket.len() - on_a), self.config.tier_spread_threshold);
        }

        let counts = category_counts(pool, split);
        for category in PositionCategory::OUTFIELD {
            let c = category.index();
            add(counts[0][c].abs_diff(counts[1][c]), self.config.position_threshold);
        }

        let experienced = |team: Team| {
            split
                .members(team)
                .iter()
                .filter(|&&i| pool.player(i).experienced)
                .count()
        };
        add(
            experienced(Team::A).abs_diff(experienced(Team::B)),
            self.config.experience_threshold,
        );

        PenaltyAssessment {
            penalty,
            worst_gap,
            catastrophic: worst_gap > self.config.catastrophic_gap as usize,
        }
    }
}
