use teamforge_config::{BalanceConfig, ConstraintConfig};
use teamforge_core::{BalanceError, Player, Team};
use teamforge_scoring::{Pool, Relations, Split};
use teamforge_test::{balanced_pool, chemistry_web, rated};

use super::*;
use crate::partition::Partition;

fn solve_with(
    players: &[Player],
    relations: &Relations,
    pins: Option<Vec<Option<Team>>>,
    config: &BalanceConfig,
    threads: usize,
) -> (Result<Split>, Pool, SolverScope) {
    let pool = Pool::new(players, relations, config).unwrap();
    let pins = pins.unwrap_or_else(|| vec![None; pool.len()]);
    let partition = Partition::new(&pool, pins, &config.constraints).unwrap();
    let mut scope = SolverScope::new(64);
    let result = {
        let context = SearchContext::new(&pool, &partition, config);
        ExhaustiveSearch::new(context)
            .with_threads(threads)
            .solve(&mut scope)
    };
    (result, pool, scope)
}

#[test]
fn test_result_is_optimal_within_space() {
    let players = balanced_pool(10);
    let relations = chemistry_web(&players);
    let config = BalanceConfig::default();
    let (result, pool, _) = solve_with(&players, &relations, None, &config, 2);
    let chosen = result.unwrap();

    let partition = Partition::new(&pool, vec![None; pool.len()], &config.constraints).unwrap();
    let context = SearchContext::new(&pool, &partition, &config);
    let chosen_total = context.scorer.score(&chosen).total();
    let space = CandidateSpace::strict(&partition);
    for index in 0..space.count() {
        let split = space.candidate(index);
        if context.guard.allows(&pool, &split) {
            assert!(context.scorer.score(&split).total() >= chosen_total);
        }
    }
}

#[test]
fn test_worker_count_does_not_change_result() {
    let players = balanced_pool(14);
    let relations = chemistry_web(&players);
    let config = BalanceConfig::default();
    let (one, _, _) = solve_with(&players, &relations, None, &config, 1);
    let (two, _, _) = solve_with(&players, &relations, None, &config, 2);
    let (eight, _, _) = solve_with(&players, &relations, None, &config, 8);
    let one = one.unwrap();
    assert_eq!(one, two.unwrap());
    assert_eq!(one, eight.unwrap());
}

#[test]
fn test_ties_break_to_smallest_team_a() {
    let players: Vec<Player> = (0..8).map(|i| rated(&format!("p{i}"), 5.0)).collect();
    let config = BalanceConfig::default();
    for threads in [1, 2, 8] {
        let (result, pool, _) = solve_with(&players, &Relations::default(), None, &config, threads);
        let split = result.unwrap();
        let ids: Vec<&str> = split
            .members(Team::A)
            .iter()
            .map(|&i| pool.player(i).id.as_str())
            .collect();
        // Equal skill keeps id order: buckets p0-p1, p2-p4, p5-p7.
        assert_eq!(ids, vec!["p0", "p2", "p3", "p5"]);
    }
}

#[test]
fn test_ceiling_refuses_large_space() {
    let players = balanced_pool(18);
    let config = BalanceConfig::default().with_max_candidates(7_999);
    let (result, _, _) = solve_with(&players, &Relations::default(), None, &config, 1);
    assert_eq!(
        result.unwrap_err(),
        BalanceError::CandidateCeilingExceeded {
            candidates: 8_000,
            ceiling: 7_999
        }
    );
}

#[test]
fn test_infeasible_bucket_halves_relax_once() {
    let players: Vec<Player> = (0..8).map(|i| rated(&format!("p{i}"), 9.0 - i as f64)).collect();
    let mut pins = vec![None; 8];
    for slot in pins.iter_mut().take(3) {
        *slot = Some(Team::A);
    }
    let config = BalanceConfig::default();
    let (result, _, scope) = solve_with(&players, &Relations::default(), Some(pins), &config, 2);
    let split = result.unwrap();
    assert_eq!(split.team_size(Team::A), 4);
    assert!(split.members(Team::A).starts_with(&[0, 1, 2]));
    assert!(scope
        .trace()
        .contains(|e| matches!(e, TraceEvent::SpreadRelaxed { .. })));
}

#[test]
fn test_guard_violations_everywhere_are_infeasible() {
    use teamforge_core::Position;
    use teamforge_test::PlayerBuilder;

    // Strikers pinned together leave the defenders no choice but Team B,
    // so every split has an attack and a defence gap of two.
    let players = vec![
        PlayerBuilder::new("p0").position(Position::Striker, 90.0).build(),
        PlayerBuilder::new("p1").position(Position::Striker, 90.0).build(),
        PlayerBuilder::new("p2").position(Position::CenterBack, 90.0).build(),
        PlayerBuilder::new("p3").position(Position::CenterBack, 90.0).build(),
    ];
    let config = BalanceConfig {
        constraints: ConstraintConfig {
            max_position_gap: 1,
            ..ConstraintConfig::default()
        },
        ..BalanceConfig::default()
    };
    let mut pins = vec![None; 4];
    pins[0] = Some(Team::A);
    pins[1] = Some(Team::A);
    let (result, _, scope) = solve_with(&players, &Relations::default(), Some(pins), &config, 1);

    assert!(matches!(result, Err(BalanceError::InfeasibleConstraint(_))));
    let relaxed_at = scope
        .trace()
        .events()
        .iter()
        .position(|e| matches!(e, TraceEvent::SpreadRelaxed { .. }));
    assert!(relaxed_at.is_some());
    assert!(scope.stats().guard_rejections >= 2);
}

#[test]
fn test_odd_pool_honours_remainder_policy() {
    let players = balanced_pool(11);
    let config = BalanceConfig::default();
    let (result, pool, scope) = solve_with(&players, &Relations::default(), None, &config, 4);
    let split = result.unwrap();
    let partition = Partition::new(&pool, vec![None; pool.len()], &config.constraints).unwrap();
    assert!(remainder_policy_holds(&pool, &partition, &split));
    assert_eq!(split.team_size(Team::A) + split.team_size(Team::B), 11);
    assert!(scope.stats().candidates_evaluated > 0);
}
