//! Hard position-count constraint.

use teamforge_core::PositionCategory;
use teamforge_scoring::component::category_counts;
use teamforge_scoring::{Pool, Split};

/// Rejects any split whose per-category head-count gap reaches `max_gap`.
///
/// Applies to all four categories, goalkeepers included. Players without a
/// position preference are not counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionGuard {
    max_gap: usize,
}

impl PositionGuard {
    pub fn new(max_gap: u32) -> Self {
        Self {
            max_gap: max_gap as usize,
        }
    }

    pub fn max_gap(&self) -> usize {
        self.max_gap
    }

    /// Head-count gap per category, in `PositionCategory::ALL` order.
    pub fn gaps(&self, pool: &Pool, split: &Split) -> [usize; 4] {
        let counts = category_counts(pool, split);
        let mut gaps = [0usize; 4];
        for category in PositionCategory::ALL {
            let c = category.index();
            gaps[c] = counts[0][c].abs_diff(counts[1][c]);
        }
        gaps
    }

    pub fn allows(&self, pool: &Pool, split: &Split) -> bool {
        self.excess(pool, split) == 0
    }

    /// Total amount by which the gaps exceed the largest allowed gap.
    ///
    /// Zero exactly when the split is allowed.
    pub fn excess(&self, pool: &Pool, split: &Split) -> usize {
        let allowed = self.max_gap.saturating_sub(1);
        self.gaps(pool, split)
            .iter()
            .map(|gap| gap.saturating_sub(allowed))
            .sum()
    }
}
