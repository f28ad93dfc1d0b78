//! Tests for balancer configuration.

use super::*;

#[test]
fn test_defaults_are_valid() {
    let config = BalanceConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.mode, SearchMode::Auto);
    assert_eq!(config.constraints.max_position_gap, 3);
    assert_eq!(config.constraints.bucket_count, 3);
    assert_eq!(config.heuristic.penalty.weight, 0.1);
    assert_eq!(config.heuristic.penalty.catastrophic_gap, 4);
    assert_eq!(config.chemistry.min_pair_games, 3);
    assert_eq!(config.chemistry.min_rivalry_games, 3);
    assert_eq!(config.chemistry.min_trio_games, 3);
}

#[test]
fn test_toml_parsing() {
    let toml = r#"
        mode = "heuristic"

        [heuristic]
        seed = 42
        passes = 5
        time_limit_ms = 250

        [heuristic.penalty]
        weight = 0.2

        [exact]
        max_candidates = 1000
        thread_count = { count = 4 }
    "#;

    let config = BalanceConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.mode, SearchMode::Heuristic);
    assert_eq!(config.heuristic.seed, Some(42));
    assert_eq!(config.heuristic.passes, 5);
    assert_eq!(config.heuristic.penalty.weight, 0.2);
    // Unspecified fields keep their defaults
    assert_eq!(config.heuristic.penalty.catastrophic_gap, 4);
    assert_eq!(config.exact.thread_count, ThreadCount::Count(4));
    assert_eq!(config.time_limit(), Some(Duration::from_millis(250)));
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        mode: exact
        weights:
          core_ratings: 0.6
          chemistry: 0.1
          performance: 0.1
          position: 0.1
          attributes: 0.1
        constraints:
          bucket_count: 2
    "#;

    let config = BalanceConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.mode, SearchMode::Exact);
    assert_eq!(config.weights.core_ratings, 0.6);
    assert_eq!(config.constraints.bucket_count, 2);
    assert!(config.validate().is_ok());
}

#[test]
fn test_missing_file_is_io_error() {
    let err = BalanceConfig::load("/nonexistent/balance.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_builder() {
    let config = BalanceConfig::new()
        .with_mode(SearchMode::Exact)
        .with_seed(7)
        .with_thread_count(ThreadCount::Count(2))
        .with_max_candidates(10);

    assert_eq!(config.mode, SearchMode::Exact);
    assert_eq!(config.heuristic.seed, Some(7));
    assert_eq!(config.exact.thread_count.resolve(), 2);
    assert_eq!(config.exact.max_candidates, 10);
}

#[test]
fn test_weights_must_sum_to_one() {
    let config = BalanceConfig::new().with_weights(ComponentWeights::new(0.5, 0.5, 0.5, 0.0, 0.0));
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("sum to 1.0"));
}

#[test]
fn test_negative_weight_rejected() {
    let config =
        BalanceConfig::new().with_weights(ComponentWeights::new(1.2, -0.2, 0.0, 0.0, 0.0));
    assert!(config.validate().is_err());
}

#[test]
fn test_zero_position_gap_rejected() {
    let mut config = BalanceConfig::new();
    config.constraints.max_position_gap = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_chemistry_sub_weights_validated() {
    let mut config = BalanceConfig::new();
    config.chemistry.trio_weight = 0.5;
    assert!(config.validate().is_err());
}

#[test]
fn test_threshold_floor_above_minimum_rejected() {
    let mut config = BalanceConfig::new();
    config.heuristic.acceptance.threshold_floor = 0.1;
    assert!(config.validate().is_err());
}

#[test]
fn test_config_error_maps_to_balance_error() {
    let err: BalanceError = ConfigError::Invalid("bad".to_string()).into();
    assert!(matches!(err, BalanceError::Configuration(_)));
}

#[test]
fn test_weights_array_round_trip() {
    let weights = ComponentWeights::default();
    assert_eq!(ComponentWeights::from_array(weights.as_array()), weights);
    assert!((weights.sum() - 1.0).abs() < WEIGHT_SUM_TOLERANCE);
}

#[test]
fn test_thread_count_zero_clamped() {
    assert_eq!(ThreadCount::Count(0).resolve(), 1);
    assert!(ThreadCount::Auto.resolve() >= 1);
}
