//! Properties that must hold for every balancing run.

use std::collections::BTreeSet;

use teamforge_config::{BalanceConfig, ComponentWeights, SearchMode, ThreadCount};
use teamforge_core::{Player, PlayerId, PositionCategory, Team};
use teamforge_scoring::{Pool, Relations, Scorer, Split};
use teamforge_solver::partition::Partition;
use teamforge_solver::{BalanceRequest, Balancer, PositionGuard};
use teamforge_test::{balanced_pool, chemistry_web, PlayerBuilder};

fn request(n: usize) -> BalanceRequest {
    let players = balanced_pool(n);
    let relations = chemistry_web(&players);
    BalanceRequest::new(players).with_relations(relations)
}

#[test]
fn every_player_lands_on_exactly_one_team() {
    for (n, mode) in [
        (12, SearchMode::Exact),
        (15, SearchMode::Exact),
        (22, SearchMode::Heuristic),
    ] {
        let request = request(n);
        let result = Balancer::new(BalanceConfig::default().with_mode(mode))
            .balance(&request)
            .unwrap();
        let team_a: BTreeSet<&PlayerId> = result.team(Team::A).iter().collect();
        let team_b: BTreeSet<&PlayerId> = result.team(Team::B).iter().collect();
        assert!(team_a.is_disjoint(&team_b));
        let all: BTreeSet<&PlayerId> = request.players.iter().map(|p| &p.id).collect();
        let union: BTreeSet<&PlayerId> = team_a.union(&team_b).copied().collect();
        assert_eq!(all, union);
    }
}

#[test]
fn position_gaps_stay_below_limit() {
    let config = BalanceConfig::default();
    for (n, mode) in [(14, SearchMode::Exact), (24, SearchMode::Heuristic)] {
        let result = Balancer::new(config.clone().with_mode(mode))
            .balance(&request(n))
            .unwrap();
        for category in PositionCategory::ALL {
            let gap = result
                .summary(Team::A)
                .category_count(category)
                .abs_diff(result.summary(Team::B).category_count(category));
            assert!(gap < config.constraints.max_position_gap as usize);
        }
    }
}

#[test]
fn repeated_runs_are_bit_identical() {
    for mode in [SearchMode::Exact, SearchMode::Heuristic] {
        let balancer = Balancer::new(BalanceConfig::default().with_mode(mode));
        let request = request(16);
        let first = balancer.balance(&request).unwrap();
        let second = balancer.balance(&request).unwrap();
        assert_eq!(first.assignment, second.assignment);
        assert_eq!(first.breakdown, second.breakdown);
        assert_eq!(first.total().to_bits(), second.total().to_bits());
    }
}

#[test]
fn input_order_does_not_matter() {
    for mode in [SearchMode::Exact, SearchMode::Heuristic] {
        let balancer = Balancer::new(BalanceConfig::default().with_mode(mode));
        let forward = request(14);
        let mut backward = forward.clone();
        backward.players.reverse();
        backward.relations.pairs.reverse();
        let a = balancer.balance(&forward).unwrap();
        let b = balancer.balance(&backward).unwrap();
        assert_eq!(a.assignment, b.assignment);
        assert_eq!(a.total().to_bits(), b.total().to_bits());
    }
}

#[test]
fn worker_count_does_not_change_exact_result() {
    let request = request(16);
    let results: Vec<_> = [1, 2, 8]
        .into_iter()
        .map(|workers| {
            Balancer::new(
                BalanceConfig::default()
                    .with_mode(SearchMode::Exact)
                    .with_thread_count(ThreadCount::Count(workers)),
            )
            .balance(&request)
            .unwrap()
        })
        .collect();
    assert_eq!(results[0].assignment, results[1].assignment);
    assert_eq!(results[0].assignment, results[2].assignment);
    assert_eq!(results[0].breakdown, results[2].breakdown);
}

/// Checks every split of the pool by brute force, independently of the
/// candidate enumeration.
#[test]
fn exact_result_is_optimal_among_valid_splits() {
    let players = balanced_pool(10);
    let relations = chemistry_web(&players);
    let config = BalanceConfig::default();
    let result = Balancer::new(config.clone().with_mode(SearchMode::Exact))
        .balance(&BalanceRequest::new(players.clone()).with_relations(relations.clone()))
        .unwrap();

    let pool = Pool::new(&players, &relations, &config).unwrap();
    let partition = Partition::new(&pool, vec![None; pool.len()], &config.constraints).unwrap();
    let scorer = Scorer::new(&pool, &config);
    let guard = PositionGuard::new(config.constraints.max_position_gap);

    let n = pool.len();
    for mask in 0u32..(1 << n) {
        if mask.count_ones() as usize != n / 2 {
            continue;
        }
        let split = Split::from_sides(
            (0..n)
                .map(|i| if mask & (1 << i) != 0 { Team::A } else { Team::B })
                .collect(),
        );
        let spread_ok = partition.buckets().iter().all(|bucket| {
            let on_a = bucket.iter().filter(|&&i| split.side(i) == Team::A).count();
            on_a == bucket.len() / 2 || on_a == bucket.len().div_ceil(2)
        });
        if !spread_ok || !guard.allows(&pool, &split) {
            continue;
        }
        assert!(scorer.score(&split).total() >= result.total());
    }
}

#[test]
fn raising_chemistry_weight_never_raises_chosen_chemistry() {
    // Identical core ratings, so shifting weight from core ratings to
    // chemistry changes only how much chemistry counts.
    let players: Vec<Player> = (0..12)
        .map(|i| {
            PlayerBuilder::new(&format!("p{i:02}"))
                .attributes(0.2 + 0.05 * i as f64)
                .build()
        })
        .collect();
    let relations = chemistry_web(&players);
    let request = BalanceRequest::new(players).with_relations(relations);

    let mut previous = f64::INFINITY;
    for chemistry in [0.05, 0.15, 0.3, 0.45, 0.55] {
        let weights = ComponentWeights::new(0.6 - chemistry, chemistry, 0.15, 0.15, 0.1);
        let result = Balancer::new(
            BalanceConfig::default()
                .with_mode(SearchMode::Exact)
                .with_weights(weights),
        )
        .balance(&request)
        .unwrap();
        let chosen = result.breakdown.chemistry().combined;
        assert!(chosen <= previous + 1e-9, "{chosen} > {previous} at {chemistry}");
        previous = chosen;
    }
}

#[test]
fn no_relations_and_no_chemistry_data_are_the_same() {
    let players = balanced_pool(12);
    let with_empty = Balancer::default()
        .balance(&BalanceRequest::new(players.clone()).with_relations(Relations::new()))
        .unwrap();
    let without = Balancer::default()
        .balance(&BalanceRequest::new(players))
        .unwrap();
    assert_eq!(with_empty.assignment, without.assignment);
}
