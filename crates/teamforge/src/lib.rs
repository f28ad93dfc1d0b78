//! teamforge - constrained two-team balancing
//!
//! Splits a pool of players into two teams that are as even as possible
//! across core ratings, chemistry, recent form, position coverage and
//! playstyle attributes.
//!
//! # Example
//!
//! ```rust
//! use teamforge::prelude::*;
//!
//! let players: Vec<Player> = (0..10)
//!     .map(|i| {
//!         let r = 4.0 + i as f64 * 0.4;
//!         Player::new(format!("p{i:02}")).with_ratings(CoreRatings::new(r, r, r, r))
//!     })
//!     .collect();
//!
//! let result = Balancer::new(BalanceConfig::default())
//!     .balance(&BalanceRequest::new(players))
//!     .unwrap();
//! assert_eq!(result.team(Team::A).len(), 5);
//! ```

pub mod assemble;
pub mod console;

pub use assemble::{
    assemble, Assembled, DegradedSource, PlayerDataSource, SourceError, SourceKind, SourceResult,
};

pub use teamforge_config::{
    AcceptanceConfig, BalanceConfig, ChemistryConfig, ComponentWeights, ConfigError,
    ConstraintConfig, ExactSearchConfig, LocalSearchConfig, PerformanceConfig, PositionConfig,
    RatingConfig, SearchMode, SoftPenaltyConfig, ThreadCount, TraceConfig,
};
pub use teamforge_core::{
    AttributeKind, BalanceError, BalanceWarning, ChemistryBreakdown, Component, CoreRatings,
    ImbalanceScore, NonConvergenceReason, PairChemistry, Player, PlayerId, PlaystyleAttributes,
    Position, PositionCategory, PositionPreference, RatingKind, RecentForm, Result, RivalryEdge,
    ScoreBreakdown, Team, TeamAssignment, TrioChemistry,
};
pub use teamforge_scoring::{Pool, Relations, Scorer, Split};
pub use teamforge_solver::{
    BalanceRequest, BalanceResult, Balancer, EngineKind, SolveTrace, SolverStats, TeamSummary,
    TraceEvent,
};

pub mod prelude {
    pub use super::{
        BalanceConfig, BalanceError, BalanceRequest, BalanceResult, Balancer, ComponentWeights,
        CoreRatings, EngineKind, PairChemistry, Player, Position, RecentForm, Relations,
        RivalryEdge, SearchMode, Team, TrioChemistry,
    };
}
