//! The balancing entry point.

use std::collections::BTreeMap;

use serde::Serialize;
use teamforge_config::{BalanceConfig, SearchMode};
use teamforge_core::{
    BalanceError, BalanceWarning, Player, PlayerId, Result, ScoreBreakdown, Team, TeamAssignment,
};
use teamforge_scoring::{Pool, Relations};
use tracing::{info, warn};

use crate::event::{SolveTrace, TraceEvent};
use crate::partition::Partition;
use crate::phase::{ExhaustiveSearch, LocalSearchPhase, Phase, SearchContext};
use crate::scope::SolverScope;
use crate::stats::SolverStats;
use crate::summary::TeamSummary;

/// One balancing request: the players, their relations and any pins.
#[derive(Debug, Clone, Default)]
pub struct BalanceRequest {
    pub players: Vec<Player>,
    pub relations: Relations,
    /// Players that must end up on a given team.
    pub fixed_teams: BTreeMap<PlayerId, Team>,
}

impl BalanceRequest {
    pub fn new(players: Vec<Player>) -> Self {
        Self {
            players,
            ..Self::default()
        }
    }

    pub fn with_relations(mut self, relations: Relations) -> Self {
        self.relations = relations;
        self
    }

    pub fn with_fixed(mut self, player: impl Into<PlayerId>, team: Team) -> Self {
        self.fixed_teams.insert(player.into(), team);
        self
    }
}

/// Which engine produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineKind {
    /// Provably optimal within the spread constraint.
    Exact,
    /// Best found by local search; not guaranteed optimal.
    Heuristic,
}

/// Everything a caller needs to render and audit one balancing run.
#[derive(Debug, Clone, Serialize)]
pub struct BalanceResult {
    pub assignment: TeamAssignment,
    /// Scored under the nominal weights.
    pub breakdown: ScoreBreakdown,
    pub engine: EngineKind,
    pub trace: SolveTrace,
    pub warnings: Vec<BalanceWarning>,
    pub stats: SolverStats,
    pub summaries: [TeamSummary; 2],
}

impl BalanceResult {
    pub fn total(&self) -> f64 {
        self.breakdown.total()
    }

    pub fn is_exact(&self) -> bool {
        self.engine == EngineKind::Exact
    }

    pub fn team(&self, team: Team) -> &[PlayerId] {
        self.assignment.members(team)
    }

    pub fn summary(&self, team: Team) -> &TeamSummary {
        &self.summaries[team.index()]
    }
}

/// Splits a pool into two balanced teams.
///
/// # Example
///
/// ```
/// use teamforge_config::BalanceConfig;
/// use teamforge_core::{CoreRatings, Player};
/// use teamforge_solver::{BalanceRequest, Balancer};
///
/// let players: Vec<Player> = (0..8)
///     .map(|i| {
///         let r = 3.0 + i as f64 * 0.5;
///         Player::new(format!("p{i}")).with_ratings(CoreRatings::new(r, r, r, r))
///     })
///     .collect();
///
/// let result = Balancer::new(BalanceConfig::default())
///     .balance(&BalanceRequest::new(players))
///     .unwrap();
/// assert_eq!(result.assignment.player_count(), 8);
/// assert!(result.is_exact());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Balancer {
    config: BalanceConfig,
}

impl Balancer {
    pub fn new(config: BalanceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BalanceConfig {
        &self.config
    }

    /// Balances `request`.
    ///
    /// Configuration, data and sizing problems are reported before any
    /// search starts.
    ///
    /// # Errors
    ///
    /// - `Configuration` when the config fails validation
    /// - `Data` for invalid or incomplete player data
    /// - `Sizing` when the pool or its pins cannot form two teams
    /// - `CandidateCeilingExceeded` in exact mode when the space is too large
    /// - `InfeasibleConstraint` when no split satisfies the position guard
    pub fn balance(&self, request: &BalanceRequest) -> Result<BalanceResult> {
        let config = &self.config;
        config.validate()?;

        let pool = Pool::new(&request.players, &request.relations, config)?;
        let mut scope = SolverScope::new(config.trace.max_events);
        let pins = resolve_pins(&pool, &request.fixed_teams, &mut scope)?;
        let pinned = pins.iter().flatten().count();
        let partition = Partition::new(&pool, pins, &config.constraints)?;

        scope.record(TraceEvent::SolveStarted {
            players: pool.len(),
            pinned,
        });
        info!(
            event = "solve_start",
            players = pool.len(),
            pinned = pinned,
            mode = ?config.mode,
        );

        let context = SearchContext::new(&pool, &partition, config);
        let (split, engine) = match config.mode {
            SearchMode::Exact => (
                ExhaustiveSearch::new(context).solve(&mut scope)?,
                EngineKind::Exact,
            ),
            SearchMode::Heuristic => (
                LocalSearchPhase::new(context).solve(&mut scope)?,
                EngineKind::Heuristic,
            ),
            SearchMode::Auto => match ExhaustiveSearch::new(context).solve(&mut scope) {
                Ok(split) => (split, EngineKind::Exact),
                Err(err) if err.is_fallback_signal() => {
                    if let BalanceError::CandidateCeilingExceeded {
                        candidates,
                        ceiling,
                    } = err
                    {
                        warn!(
                            event = "fallback_to_heuristic",
                            candidates = candidates,
                            ceiling = ceiling,
                        );
                        scope.record(TraceEvent::FallbackToHeuristic {
                            candidates,
                            ceiling,
                        });
                    }
                    (
                        LocalSearchPhase::new(context).solve(&mut scope)?,
                        EngineKind::Heuristic,
                    )
                }
                Err(err) => return Err(err),
            },
        };

        debug_assert!(context.guard.allows(&pool, &split));
        let breakdown = context.scorer.score(&split);
        let summaries = [
            TeamSummary::of(&pool, &split, Team::A),
            TeamSummary::of(&pool, &split, Team::B),
        ];
        let assignment = split.to_assignment(&pool);

        info!(
            event = "solve_end",
            engine = ?engine,
            total = breakdown.total(),
            duration_ms = scope.elapsed().as_millis() as u64,
        );

        let (stats, trace, warnings) = scope.finish();
        Ok(BalanceResult {
            assignment,
            breakdown,
            engine,
            trace,
            warnings,
            stats,
            summaries,
        })
    }
}

/// Maps explicit pins to pool indices and pins the remaining permanent
/// goalkeepers.
///
/// Unpinned permanent goalkeepers go, in id order, to whichever team has
/// fewer pinned players, Team A on ties.
fn resolve_pins(
    pool: &Pool,
    fixed_teams: &BTreeMap<PlayerId, Team>,
    scope: &mut SolverScope,
) -> Result<Vec<Option<Team>>> {
    let mut pins = vec![None; pool.len()];
    let mut counts = [0usize; 2];

    for (id, &team) in fixed_teams {
        let index = pool.index_of(id).ok_or_else(|| {
            BalanceError::Data(format!("fixed team given for unknown player {id}"))
        })?;
        pins[index] = Some(team);
        counts[team.index()] += 1;
        scope.record(TraceEvent::PlayerPinned {
            player: id.clone(),
            team,
            explicit: true,
        });
    }

    for (index, player) in pool.players().iter().enumerate() {
        if !player.permanent_goalkeeper || pins[index].is_some() {
            continue;
        }
        let team = if counts[1] < counts[0] { Team::B } else { Team::A };
        pins[index] = Some(team);
        counts[team.index()] += 1;
        scope.record(TraceEvent::PlayerPinned {
            player: player.id.clone(),
            team,
            explicit: false,
        });
    }
    Ok(pins)
}
