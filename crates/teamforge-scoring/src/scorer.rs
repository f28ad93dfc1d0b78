//! Pure split scorer.

use teamforge_config::{BalanceConfig, ChemistryConfig, PerformanceConfig, PositionConfig};
use teamforge_core::ScoreBreakdown;

use crate::component::{
    attributes_imbalance, chemistry_imbalance, core_ratings_imbalance, performance_imbalance,
    position_imbalance,
};
use crate::pool::Pool;
use crate::split::Split;

/// Scores splits of one pool.
///
/// Holds only shared references and copied config, so a single scorer can be
/// handed to every worker of a parallel search.
#[derive(Debug, Clone, Copy)]
pub struct Scorer<'p> {
    pool: &'p Pool,
    weights: [f64; 5],
    scale_max: f64,
    chemistry: ChemistryConfig,
    performance: PerformanceConfig,
    position: PositionConfig,
}

impl<'p> Scorer<'p> {
    pub fn new(pool: &'p Pool, config: &BalanceConfig) -> Self {
        Self {
            pool,
            weights: config.weights.as_array(),
            scale_max: config.ratings.scale_max,
            chemistry: config.chemistry,
            performance: config.performance,
            position: config.position,
        }
    }

    pub fn pool(&self) -> &'p Pool {
        self.pool
    }

    /// The nominal weight vector.
    pub fn weights(&self) -> &[f64; 5] {
        &self.weights
    }

    /// Scores `split` under the nominal weights.
    pub fn score(&self, split: &Split) -> ScoreBreakdown {
        self.score_with(split, &self.weights)
    }

    /// Scores `split` under an arbitrary weight vector.
    pub fn score_with(&self, split: &Split, weights: &[f64; 5]) -> ScoreBreakdown {
        debug_assert_eq!(split.player_count(), self.pool.len());
        ScoreBreakdown::new(
            core_ratings_imbalance(self.pool, split, self.scale_max),
            chemistry_imbalance(self.pool, split, &self.chemistry),
            performance_imbalance(self.pool, split, &self.performance),
            position_imbalance(self.pool, split, &self.position),
            attributes_imbalance(self.pool, split),
            weights,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relation::Relations;
    use teamforge_core::{CoreRatings, PairChemistry, Player, Team};

    fn rated(id: &str, value: f64) -> Player {
        Player::new(id).with_ratings(CoreRatings::new(value, value, value, value))
    }

    fn split_by_ids(pool: &Pool, team_a: &[&str]) -> Split {
        let sides = pool
            .players()
            .iter()
            .map(|p| {
                if team_a.contains(&p.id.as_str()) {
                    Team::A
                } else {
                    Team::B
                }
            })
            .collect();
        Split::from_sides(sides)
    }

    #[test]
    fn test_input_order_does_not_change_score() {
        let config = BalanceConfig::default();
        let forward = vec![rated("a", 8.0), rated("b", 3.0), rated("c", 6.0), rated("d", 5.0)];
        let mut backward = forward.clone();
        backward.reverse();
        let relations = Relations::new().with_pair(PairChemistry::new("a", "d", 5, 70.0));

        let pool_f = Pool::new(&forward, &relations, &config).unwrap();
        let pool_b = Pool::new(&backward, &relations, &config).unwrap();
        let score_f = Scorer::new(&pool_f, &config).score(&split_by_ids(&pool_f, &["a", "b"]));
        let score_b = Scorer::new(&pool_b, &config).score(&split_by_ids(&pool_b, &["a", "b"]));
        assert_eq!(score_f.total().to_bits(), score_b.total().to_bits());
    }

    #[test]
    fn test_total_is_weighted_sum() {
        let config = BalanceConfig::default();
        let players = vec![rated("a", 9.0), rated("b", 2.0), rated("c", 6.0), rated("d", 5.0)];
        let pool = Pool::new(&players, &Relations::default(), &config).unwrap();
        let scorer = Scorer::new(&pool, &config);
        let breakdown = scorer.score(&split_by_ids(&pool, &["a", "b"]));
        let expected: f64 = breakdown
            .components()
            .iter()
            .zip(scorer.weights())
            .map(|(c, w)| c * w)
            .sum();
        assert!((breakdown.total() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_score_with_uses_given_weights() {
        let config = BalanceConfig::default();
        let players = vec![rated("a", 9.0), rated("b", 2.0), rated("c", 6.0), rated("d", 5.0)];
        let pool = Pool::new(&players, &Relations::default(), &config).unwrap();
        let scorer = Scorer::new(&pool, &config);
        let split = split_by_ids(&pool, &["a", "c"]);
        let only_ratings = scorer.score_with(&split, &[1.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(only_ratings.total(), only_ratings.core_ratings());
        // 9 + 6 vs 2 + 5 on every rating: |7.5 - 3.5| / 10.
        assert!((only_ratings.core_ratings() - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_scorer_is_sync() {
        fn assert_sync<T: Sync + Send>() {}
        assert_sync::<Scorer<'static>>();
    }
}
