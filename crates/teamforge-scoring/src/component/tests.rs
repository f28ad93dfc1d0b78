use teamforge_config::BalanceConfig;
use teamforge_core::{
    CoreRatings, PairChemistry, Player, Position, RecentForm, RivalryEdge, Team, TrioChemistry,
};

use super::*;
use crate::pool::Pool;
use crate::relation::Relations;
use crate::scorer::Scorer;
use crate::split::Split;

fn rated(id: &str, value: f64) -> Player {
    Player::new(id).with_ratings(CoreRatings::new(value, value, value, value))
}

fn uniform(ids: &[&str]) -> Vec<Player> {
    ids.iter().map(|id| rated(id, 5.0)).collect()
}

fn split_by_ids(pool: &Pool, team_a: &[&str]) -> Split {
    Split::from_sides(
        pool.players()
            .iter()
            .map(|p| {
                if team_a.contains(&p.id.as_str()) {
                    Team::A
                } else {
                    Team::B
                }
            })
            .collect(),
    )
}

fn pool(players: &[Player], relations: &Relations) -> Pool {
    Pool::new(players, relations, &BalanceConfig::default()).unwrap()
}

#[test]
fn test_no_relations_means_zero_chemistry() {
    let pool = pool(&uniform(&["a", "b", "c", "d"]), &Relations::default());
    let split = split_by_ids(&pool, &["a", "b"]);
    let chemistry = chemistry_imbalance(&pool, &split, &BalanceConfig::default().chemistry);
    assert_eq!(chemistry.combined, 0.0);
    assert_eq!(chemistry.pairwise, 0.0);
    assert_eq!(chemistry.rivalry, 0.0);
    assert_eq!(chemistry.trio, 0.0);
}

#[test]
fn test_pairwise_team_without_pairs_is_neutral() {
    let relations = Relations::new().with_pair(PairChemistry::new("a", "b", 6, 80.0));
    let pool = pool(&uniform(&["a", "b", "c", "d"]), &relations);
    let split = split_by_ids(&pool, &["a", "b"]);
    let chemistry = chemistry_imbalance(&pool, &split, &BalanceConfig::default().chemistry);
    // Team A averages 80, Team B has no pair and reads as 50.
    assert!((chemistry.pairwise - 0.3).abs() < 1e-12);
    assert!((chemistry.combined - 0.15).abs() < 1e-12);
}

#[test]
fn test_pairs_below_min_games_are_ignored() {
    let relations = Relations::new().with_pair(PairChemistry::new("a", "b", 2, 95.0));
    let pool = pool(&uniform(&["a", "b", "c", "d"]), &relations);
    let split = split_by_ids(&pool, &["a", "b"]);
    let chemistry = chemistry_imbalance(&pool, &split, &BalanceConfig::default().chemistry);
    assert_eq!(chemistry.pairwise, 0.0);
}

#[test]
fn test_rivalry_counts_cross_team_pairs_only() {
    let relations = Relations::new()
        .with_rivalry(RivalryEdge::new("a", "c", 5, 40.0))
        .with_rivalry(RivalryEdge::new("a", "b", 5, 90.0));
    let pool = pool(&uniform(&["a", "b", "c", "d"]), &relations);
    let split = split_by_ids(&pool, &["a", "b"]);
    let chemistry = chemistry_imbalance(&pool, &split, &BalanceConfig::default().chemistry);
    // Only a vs c crosses teams.
    assert!((chemistry.rivalry - 0.4).abs() < 1e-12);

    let swapped = split_by_ids(&pool, &["c", "d"]);
    let mirrored = chemistry_imbalance(&pool, &swapped, &BalanceConfig::default().chemistry);
    assert!((mirrored.rivalry - 0.4).abs() < 1e-12);
}

#[test]
fn test_trio_requires_all_three_together() {
    let relations = Relations::new().with_trio(TrioChemistry::new("a", "b", "c", 4, 90.0));
    let players = uniform(&["a", "b", "c", "d", "e", "f"]);
    let pool = pool(&players, &relations);
    let config = BalanceConfig::default().chemistry;

    let together = chemistry_imbalance(&pool, &split_by_ids(&pool, &["a", "b", "c"]), &config);
    assert!((together.trio - 0.4).abs() < 1e-12);

    let apart = chemistry_imbalance(&pool, &split_by_ids(&pool, &["a", "b", "d"]), &config);
    assert_eq!(apart.trio, 0.0);
}

#[test]
fn test_chemistry_alone_ranks_otherwise_identical_splits() {
    let relations = Relations::new()
        .with_pair(PairChemistry::new("a", "b", 10, 90.0))
        .with_pair(PairChemistry::new("c", "d", 10, 20.0));
    let pool = pool(&uniform(&["a", "b", "c", "d"]), &relations);
    let config = BalanceConfig::default();
    let scorer = Scorer::new(&pool, &config);

    let clustered = scorer.score(&split_by_ids(&pool, &["a", "b"]));
    let mixed = scorer.score(&split_by_ids(&pool, &["a", "c"]));

    assert_eq!(clustered.core_ratings(), mixed.core_ratings());
    assert_eq!(clustered.performance(), mixed.performance());
    assert_eq!(clustered.position(), mixed.position());
    assert_eq!(clustered.attributes(), mixed.attributes());
    assert!(clustered.chemistry().combined > mixed.chemistry().combined);
    assert!(mixed.score().is_better_than(&clustered.score()));
}

#[test]
fn test_performance_neutral_without_form() {
    let pool = pool(&uniform(&["a", "b", "c", "d"]), &Relations::default());
    let split = split_by_ids(&pool, &["a", "b"]);
    let value = performance_imbalance(&pool, &split, &BalanceConfig::default().performance);
    assert_eq!(value, 0.0);
}

#[test]
fn test_performance_gaps() {
    let players = vec![
        rated("a", 5.0).with_form(RecentForm::new(80.0, 2.0, 10)),
        rated("b", 5.0).with_form(RecentForm::new(60.0, 1.0, 10)),
        rated("c", 5.0).with_form(RecentForm::new(40.0, -1.0, 10)),
        rated("d", 5.0),
    ];
    let pool = pool(&players, &Relations::default());
    let split = split_by_ids(&pool, &["a", "b"]);
    let value = performance_imbalance(&pool, &split, &BalanceConfig::default().performance);
    // Win rate 70 vs 40, goal differential 1.5 vs -1.0.
    let expected = (0.3 + 2.5 / 5.0) / 2.0;
    assert!((value - expected).abs() < 1e-12);
}

#[test]
fn test_position_missing_category_penalised() {
    let players = vec![
        rated("a", 5.0).with_position(Position::CenterBack, 100.0),
        rated("b", 5.0).with_position(Position::FullBack, 100.0),
        rated("c", 5.0).with_position(Position::CentralMidfield, 100.0),
        rated("d", 5.0).with_position(Position::DefensiveMidfield, 100.0),
    ];
    let pool = pool(&players, &Relations::default());
    let config = BalanceConfig::default().position;

    let stacked = position_imbalance(&pool, &split_by_ids(&pool, &["a", "b"]), &config);
    let spread = position_imbalance(&pool, &split_by_ids(&pool, &["a", "c"]), &config);
    assert_eq!(spread, 0.0);
    assert!(stacked > spread);

    let counts = category_counts(&pool, &split_by_ids(&pool, &["a", "b"]));
    assert_eq!(counts[0], [0, 2, 0, 0]);
    assert_eq!(counts[1], [0, 0, 2, 0]);
}

#[test]
fn test_attacking_slot_balance() {
    let players = vec![
        rated("a", 5.0).with_position(Position::Striker, 100.0),
        rated("b", 5.0).with_position(Position::Striker, 100.0),
        rated("c", 5.0),
        rated("d", 5.0),
    ];
    let pool = pool(&players, &Relations::default());
    let config = BalanceConfig::default().position;
    let stacked = position_imbalance(&pool, &split_by_ids(&pool, &["a", "b"]), &config);
    let spread = position_imbalance(&pool, &split_by_ids(&pool, &["a", "c"]), &config);
    assert!(spread < stacked);
    assert_eq!(spread, 0.0);
}

#[test]
fn test_components_stay_in_unit_range() {
    let players = vec![rated("a", 10.0), rated("b", 10.0), rated("c", 0.0), rated("d", 0.0)];
    let pool = pool(&players, &Relations::default());
    let split = split_by_ids(&pool, &["a", "b"]);
    assert_eq!(core_ratings_imbalance(&pool, &split, 10.0), 1.0);
    assert_eq!(attributes_imbalance(&pool, &split), 0.0);
}
