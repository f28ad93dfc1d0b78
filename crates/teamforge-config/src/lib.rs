//! Configuration system for teamforge.
//!
//! Every threshold the balancer uses is a named field here. All sections
//! are optional in TOML/YAML and fall back to documented defaults.
//!
//! # Examples
//!
//! ```
//! use teamforge_config::{BalanceConfig, SearchMode};
//!
//! let config = BalanceConfig::from_toml_str(r#"
//!     mode = "exact"
//!
//!     [weights]
//!     core_ratings = 0.5
//!     chemistry = 0.2
//!     performance = 0.1
//!     position = 0.1
//!     attributes = 0.1
//!
//!     [constraints]
//!     max_position_gap = 2
//! "#).unwrap();
//!
//! assert_eq!(config.mode, SearchMode::Exact);
//! assert_eq!(config.constraints.max_position_gap, 2);
//! assert!(config.validate().is_ok());
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use teamforge_config::BalanceConfig;
//!
//! let config = BalanceConfig::load("balance.toml").unwrap_or_default();
//! assert_eq!(config.constraints.bucket_count, 3);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use teamforge_core::BalanceError;
use thiserror::Error;

/// Tolerance when checking that weight vectors sum to one.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<ConfigError> for BalanceError {
    fn from(err: ConfigError) -> Self {
        BalanceError::Configuration(err.to_string())
    }
}

/// Main balancer configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct BalanceConfig {
    /// Which engine to run.
    pub mode: SearchMode,

    /// Component weight vector.
    pub weights: ComponentWeights,

    /// Rating scale.
    pub ratings: RatingConfig,

    /// Chemistry sub-weights and inclusion thresholds.
    pub chemistry: ChemistryConfig,

    /// Recent-form scoring.
    pub performance: PerformanceConfig,

    /// Position sub-weights.
    pub position: PositionConfig,

    /// Hard constraints and spread bucketing.
    pub constraints: ConstraintConfig,

    /// Exact engine limits.
    pub exact: ExactSearchConfig,

    /// Heuristic engine parameters.
    pub heuristic: LocalSearchConfig,

    /// Structured trace limits.
    pub trace: TraceConfig,
}

impl BalanceConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the search mode.
    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the component weights.
    pub fn with_weights(mut self, weights: ComponentWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Sets the heuristic draft seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.heuristic.seed = Some(seed);
        self
    }

    /// Sets the exact engine worker count.
    pub fn with_thread_count(mut self, thread_count: ThreadCount) -> Self {
        self.exact.thread_count = thread_count;
        self
    }

    /// Sets the exact engine candidate ceiling.
    pub fn with_max_candidates(mut self, max_candidates: u64) -> Self {
        self.exact.max_candidates = max_candidates;
        self
    }

    /// Returns the heuristic wall-clock limit, if configured.
    pub fn time_limit(&self) -> Option<Duration> {
        self.heuristic.time_limit_ms.map(Duration::from_millis)
    }

    /// Validates weights and thresholds.
    ///
    /// Called at the start of every balancing request.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.weights.validate()?;
        self.ratings.validate()?;
        self.chemistry.validate()?;
        self.performance.validate()?;
        self.position.validate()?;
        self.constraints.validate()?;
        self.exact.validate()?;
        self.heuristic.validate()?;
        Ok(())
    }
}

fn ensure(condition: bool, message: impl FnOnce() -> String) -> Result<(), ConfigError> {
    if condition {
        Ok(())
    } else {
        Err(ConfigError::Invalid(message()))
    }
}

fn ensure_fraction(name: &str, value: f64) -> Result<(), ConfigError> {
    ensure(value.is_finite() && (0.0..=1.0).contains(&value), || {
        format!("{name} must lie in [0, 1], got {value}")
    })
}

fn ensure_positive(name: &str, value: f64) -> Result<(), ConfigError> {
    ensure(value.is_finite() && value > 0.0, || {
        format!("{name} must be positive, got {value}")
    })
}

/// Engine selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Exact search, falling back to heuristic above the candidate ceiling.
    #[default]
    Auto,

    /// Exact search only; refuses above the candidate ceiling.
    Exact,

    /// Heuristic search only.
    Heuristic,
}

/// Weights of the five score components. Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ComponentWeights {
    pub core_ratings: f64,
    pub chemistry: f64,
    pub performance: f64,
    pub position: f64,
    pub attributes: f64,
}

impl Default for ComponentWeights {
    fn default() -> Self {
        Self {
            core_ratings: 0.40,
            chemistry: 0.20,
            performance: 0.15,
            position: 0.15,
            attributes: 0.10,
        }
    }
}

impl ComponentWeights {
    pub fn new(
        core_ratings: f64,
        chemistry: f64,
        performance: f64,
        position: f64,
        attributes: f64,
    ) -> Self {
        Self {
            core_ratings,
            chemistry,
            performance,
            position,
            attributes,
        }
    }

    /// Weights in `Component::ALL` order.
    pub fn as_array(&self) -> [f64; 5] {
        [
            self.core_ratings,
            self.chemistry,
            self.performance,
            self.position,
            self.attributes,
        ]
    }

    pub fn from_array(weights: [f64; 5]) -> Self {
        Self::new(weights[0], weights[1], weights[2], weights[3], weights[4])
    }

    pub fn sum(&self) -> f64 {
        self.as_array().iter().sum()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("weights.core_ratings", self.core_ratings),
            ("weights.chemistry", self.chemistry),
            ("weights.performance", self.performance),
            ("weights.position", self.position),
            ("weights.attributes", self.attributes),
        ] {
            ensure_fraction(name, value)?;
        }
        let sum = self.sum();
        ensure((sum - 1.0).abs() <= WEIGHT_SUM_TOLERANCE, || {
            format!("component weights must sum to 1.0, got {sum}")
        })
    }
}

/// Core rating scale. Ratings lie in `[0, scale_max]`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct RatingConfig {
    pub scale_max: f64,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self { scale_max: 10.0 }
    }
}

impl RatingConfig {
    /// Value used for unrated fields.
    pub fn neutral(&self) -> f64 {
        self.scale_max / 2.0
    }

    fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("ratings.scale_max", self.scale_max)
    }
}

/// Chemistry sub-weights and minimum-sample thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ChemistryConfig {
    pub pairwise_weight: f64,
    pub rivalry_weight: f64,
    pub trio_weight: f64,
    /// Minimum shared games for a pair to count.
    pub min_pair_games: u32,
    /// Minimum head-to-head games for a rivalry edge to count.
    pub min_rivalry_games: u32,
    /// Minimum shared games for a trio to count.
    pub min_trio_games: u32,
    /// Full scale of chemistry strengths and rivalry advantages.
    pub strength_scale: f64,
    /// Stand-in average for a team with no qualifying relations.
    pub neutral_strength: f64,
}

impl Default for ChemistryConfig {
    fn default() -> Self {
        Self {
            pairwise_weight: 0.5,
            rivalry_weight: 0.3,
            trio_weight: 0.2,
            min_pair_games: 3,
            min_rivalry_games: 3,
            min_trio_games: 3,
            strength_scale: 100.0,
            neutral_strength: 50.0,
        }
    }
}

impl ChemistryConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        ensure_fraction("chemistry.pairwise_weight", self.pairwise_weight)?;
        ensure_fraction("chemistry.rivalry_weight", self.rivalry_weight)?;
        ensure_fraction("chemistry.trio_weight", self.trio_weight)?;
        let sum = self.pairwise_weight + self.rivalry_weight + self.trio_weight;
        ensure((sum - 1.0).abs() <= WEIGHT_SUM_TOLERANCE, || {
            format!("chemistry sub-weights must sum to 1.0, got {sum}")
        })?;
        ensure_positive("chemistry.strength_scale", self.strength_scale)?;
        ensure(
            self.neutral_strength.is_finite()
                && (0.0..=self.strength_scale).contains(&self.neutral_strength),
            || "chemistry.neutral_strength must lie within the strength scale".to_string(),
        )
    }
}

/// Recent-form scoring.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct PerformanceConfig {
    /// Minimum windowed games for a player's form to count.
    pub min_form_games: u32,
    /// Goal-differential gap that maps to a full component score.
    pub goal_differential_scale: f64,
    /// Win rate used for a team with no qualifying players.
    pub neutral_win_rate: f64,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            min_form_games: 3,
            goal_differential_scale: 5.0,
            neutral_win_rate: 50.0,
        }
    }
}

impl PerformanceConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive(
            "performance.goal_differential_scale",
            self.goal_differential_scale,
        )?;
        ensure(
            (0.0..=100.0).contains(&self.neutral_win_rate),
            || "performance.neutral_win_rate must lie in [0, 100]".to_string(),
        )
    }
}

/// Sub-weights of the position component.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct PositionConfig {
    /// Striker and attacking-slot distribution.
    pub attacking_slot_weight: f64,
    /// Per-category head count balance.
    pub category_balance_weight: f64,
    /// Teams missing a whole outfield category.
    pub missing_category_weight: f64,
}

impl Default for PositionConfig {
    fn default() -> Self {
        Self {
            attacking_slot_weight: 0.60,
            category_balance_weight: 0.25,
            missing_category_weight: 0.15,
        }
    }
}

impl PositionConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        ensure_fraction("position.attacking_slot_weight", self.attacking_slot_weight)?;
        ensure_fraction("position.category_balance_weight", self.category_balance_weight)?;
        ensure_fraction("position.missing_category_weight", self.missing_category_weight)?;
        let sum =
            self.attacking_slot_weight + self.category_balance_weight + self.missing_category_weight;
        ensure((sum - 1.0).abs() <= WEIGHT_SUM_TOLERANCE, || {
            format!("position sub-weights must sum to 1.0, got {sum}")
        })
    }
}

/// Hard constraints and spread bucketing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ConstraintConfig {
    /// A split is rejected when any category gap reaches this value.
    pub max_position_gap: u32,
    /// Number of skill tiers for the spread constraint.
    pub bucket_count: usize,
    /// Smallest allowed team.
    pub min_team_size: usize,
    /// Total games at which a player counts as experienced.
    pub experienced_games: u32,
}

impl Default for ConstraintConfig {
    fn default() -> Self {
        Self {
            max_position_gap: 3,
            bucket_count: 3,
            min_team_size: 2,
            experienced_games: 10,
        }
    }
}

impl ConstraintConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        ensure(self.max_position_gap >= 1, || {
            "constraints.max_position_gap must be at least 1".to_string()
        })?;
        ensure(self.bucket_count >= 1, || {
            "constraints.bucket_count must be at least 1".to_string()
        })?;
        ensure(self.min_team_size >= 1, || {
            "constraints.min_team_size must be at least 1".to_string()
        })
    }
}

/// Worker count for the exact engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadCount {
    /// Use the available parallelism.
    #[default]
    Auto,

    /// Use a specific number of workers.
    Count(usize),
}

impl ThreadCount {
    /// Resolves to a concrete worker count of at least one.
    pub fn resolve(&self) -> usize {
        match self {
            ThreadCount::Auto => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            ThreadCount::Count(n) => (*n).max(1),
        }
    }
}

/// Exact engine limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ExactSearchConfig {
    /// Above this many candidates the exact engine refuses.
    pub max_candidates: u64,
    pub thread_count: ThreadCount,
}

impl Default for ExactSearchConfig {
    fn default() -> Self {
        Self {
            max_candidates: 50_000,
            thread_count: ThreadCount::Auto,
        }
    }
}

impl ExactSearchConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        ensure(self.max_candidates >= 1, || {
            "exact.max_candidates must be at least 1".to_string()
        })?;
        ensure(self.thread_count != ThreadCount::Count(0), || {
            "exact.thread_count must be at least 1".to_string()
        })
    }
}

/// Heuristic engine parameters.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct LocalSearchConfig {
    /// Draft seed. Derived from the pool when absent.
    pub seed: Option<u64>,
    /// Number of improvement passes.
    pub passes: usize,
    /// Extra core-ratings weight on the first pass, as a multiple.
    pub skill_emphasis: f64,
    /// Step cap per pass.
    pub max_steps_per_pass: u64,
    /// Wall-clock cap for the whole heuristic run.
    pub time_limit_ms: Option<u64>,
    /// Best total at or below which the run counts as converged.
    pub quality_target: f64,
    pub penalty: SoftPenaltyConfig,
    pub acceptance: AcceptanceConfig,
}

impl Default for LocalSearchConfig {
    fn default() -> Self {
        Self {
            seed: None,
            passes: 3,
            skill_emphasis: 1.0,
            max_steps_per_pass: 200,
            time_limit_ms: None,
            quality_target: 0.08,
            penalty: SoftPenaltyConfig::default(),
            acceptance: AcceptanceConfig::default(),
        }
    }
}

impl LocalSearchConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        ensure(self.passes >= 1, || {
            "heuristic.passes must be at least 1".to_string()
        })?;
        ensure(
            self.skill_emphasis.is_finite() && self.skill_emphasis >= 0.0,
            || "heuristic.skill_emphasis must be non-negative".to_string(),
        )?;
        ensure(self.max_steps_per_pass >= 1, || {
            "heuristic.max_steps_per_pass must be at least 1".to_string()
        })?;
        ensure(
            self.quality_target.is_finite() && self.quality_target >= 0.0,
            || "heuristic.quality_target must be non-negative".to_string(),
        )?;
        self.penalty.validate()?;
        self.acceptance.validate()
    }
}

/// Soft penalties for the heuristic engine.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SoftPenaltyConfig {
    /// Multiplier applied to penalty deltas in the net improvement.
    pub weight: f64,
    /// A gap above this on any penalised dimension blocks a swap outright.
    pub catastrophic_gap: u32,
    /// Aggregate penalty at or above which multi-objective acceptance is refused.
    pub cutoff: f64,
    /// Tolerated per-tier count gap.
    pub tier_spread_threshold: u32,
    /// Tolerated per-category count gap.
    pub position_threshold: u32,
    /// Tolerated experienced-player count gap.
    pub experience_threshold: u32,
}

impl Default for SoftPenaltyConfig {
    fn default() -> Self {
        Self {
            weight: 0.1,
            catastrophic_gap: 4,
            cutoff: 4.0,
            tier_spread_threshold: 1,
            position_threshold: 1,
            experience_threshold: 2,
        }
    }
}

impl SoftPenaltyConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        ensure(self.weight.is_finite() && self.weight >= 0.0, || {
            "heuristic.penalty.weight must be non-negative".to_string()
        })?;
        ensure_positive("heuristic.penalty.cutoff", self.cutoff)
    }
}

/// Swap acceptance and its dynamic threshold.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct AcceptanceConfig {
    /// Largest relative worsening of any component in a multi-objective swap.
    pub max_component_regression: f64,
    /// Required net improvement, as a fraction of the pre-swap total.
    pub min_relative_improvement: f64,
    /// The dynamic threshold never relaxes below this fraction.
    pub threshold_floor: f64,
    /// Failed attempts that halve the threshold.
    pub relaxation_interval: u64,
    /// Total at which poor balance halves the threshold.
    pub balance_reference: f64,
}

impl Default for AcceptanceConfig {
    fn default() -> Self {
        Self {
            max_component_regression: 0.20,
            min_relative_improvement: 0.05,
            threshold_floor: 0.005,
            relaxation_interval: 25,
            balance_reference: 0.25,
        }
    }
}

impl AcceptanceConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        ensure_fraction(
            "heuristic.acceptance.max_component_regression",
            self.max_component_regression,
        )?;
        ensure_fraction(
            "heuristic.acceptance.min_relative_improvement",
            self.min_relative_improvement,
        )?;
        ensure_fraction("heuristic.acceptance.threshold_floor", self.threshold_floor)?;
        ensure(
            self.threshold_floor <= self.min_relative_improvement,
            || "heuristic.acceptance.threshold_floor exceeds min_relative_improvement".to_string(),
        )?;
        ensure(self.relaxation_interval >= 1, || {
            "heuristic.acceptance.relaxation_interval must be at least 1".to_string()
        })?;
        ensure_positive(
            "heuristic.acceptance.balance_reference",
            self.balance_reference,
        )
    }
}

/// Structured trace limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct TraceConfig {
    /// Events beyond this are counted but not stored.
    pub max_events: usize,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self { max_events: 512 }
    }
}

#[cfg(test)]
mod tests;
