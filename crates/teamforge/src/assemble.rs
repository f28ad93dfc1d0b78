//! Parallel assembly of a balancing request from independent data sources.
//!
//! Each source is fetched on its own rayon task. Only the core source is
//! mandatory: a failed enrichment source is dropped and reported, and the
//! scorer treats the missing data as neutral.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use teamforge_core::{
    BalanceError, PairChemistry, Player, PlayerId, PlaystyleAttributes, PositionPreference,
    RecentForm, Result, RivalryEdge, TrioChemistry,
};
use teamforge_scoring::Relations;
use teamforge_solver::BalanceRequest;
use thiserror::Error;
use tracing::{debug, info, warn};

/// A failed fetch from one data source.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{message}")]
pub struct SourceError {
    message: String,
}

impl SourceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub type SourceResult<T> = std::result::Result<T, SourceError>;

/// The data sources behind one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    CoreRatings,
    PairChemistry,
    Rivalries,
    Trios,
    RecentForm,
    Positions,
    Attributes,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceKind::CoreRatings => "core_ratings",
            SourceKind::PairChemistry => "pair_chemistry",
            SourceKind::Rivalries => "rivalries",
            SourceKind::Trios => "trios",
            SourceKind::RecentForm => "recent_form",
            SourceKind::Positions => "positions",
            SourceKind::Attributes => "attributes",
        };
        f.write_str(name)
    }
}

/// Supplies the raw records of one balancing request.
///
/// Implementations are called concurrently, one call per source.
pub trait PlayerDataSource: Sync {
    /// The roster with core ratings, game counts and goalkeeper flags.
    fn core_ratings(&self) -> SourceResult<Vec<Player>>;

    fn pair_chemistry(&self) -> SourceResult<Vec<PairChemistry>>;

    fn rivalries(&self) -> SourceResult<Vec<RivalryEdge>>;

    fn trios(&self) -> SourceResult<Vec<TrioChemistry>>;

    fn recent_form(&self) -> SourceResult<Vec<(PlayerId, RecentForm)>>;

    fn positions(&self) -> SourceResult<Vec<(PlayerId, Vec<PositionPreference>)>>;

    fn attributes(&self) -> SourceResult<Vec<(PlayerId, PlaystyleAttributes)>>;
}

/// An enrichment source that failed and was left out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DegradedSource {
    pub source: SourceKind,
    pub message: String,
}

/// Players and relations merged from every source that answered.
#[derive(Debug, Clone, Default)]
pub struct Assembled {
    pub players: Vec<Player>,
    pub relations: Relations,
    pub degraded: Vec<DegradedSource>,
}

impl Assembled {
    pub fn is_degraded(&self) -> bool {
        !self.degraded.is_empty()
    }

    pub fn into_request(self) -> BalanceRequest {
        BalanceRequest::new(self.players).with_relations(self.relations)
    }
}

#[derive(Default)]
struct Fetched {
    core: Option<SourceResult<Vec<Player>>>,
    pairs: Option<SourceResult<Vec<PairChemistry>>>,
    rivalries: Option<SourceResult<Vec<RivalryEdge>>>,
    trios: Option<SourceResult<Vec<TrioChemistry>>>,
    form: Option<SourceResult<Vec<(PlayerId, RecentForm)>>>,
    positions: Option<SourceResult<Vec<(PlayerId, Vec<PositionPreference>)>>>,
    attributes: Option<SourceResult<Vec<(PlayerId, PlaystyleAttributes)>>>,
}

/// Fetches every source of `source` in parallel and merges the results.
///
/// # Errors
///
/// Returns `BalanceError::Data` when the core ratings source fails. Any
/// other failing source is recorded in [`Assembled::degraded`].
pub fn assemble<S: PlayerDataSource + ?Sized>(source: &S) -> Result<Assembled> {
    let mut fetched = Fetched::default();
    {
        let Fetched {
            core,
            pairs,
            rivalries,
            trios,
            form,
            positions,
            attributes,
        } = &mut fetched;
        rayon::scope(|s| {
            s.spawn(|_| *core = Some(source.core_ratings()));
            s.spawn(|_| *pairs = Some(source.pair_chemistry()));
            s.spawn(|_| *rivalries = Some(source.rivalries()));
            s.spawn(|_| *trios = Some(source.trios()));
            s.spawn(|_| *form = Some(source.recent_form()));
            s.spawn(|_| *positions = Some(source.positions()));
            s.spawn(|_| *attributes = Some(source.attributes()));
        });
    }

    let mut players = match fetched.core {
        Some(Ok(players)) => players,
        Some(Err(err)) => {
            return Err(BalanceError::Data(format!(
                "{} source failed: {err}",
                SourceKind::CoreRatings
            )))
        }
        None => {
            return Err(BalanceError::Data(format!(
                "{} source returned nothing",
                SourceKind::CoreRatings
            )))
        }
    };

    let mut degraded = Vec::new();
    let mut relations = Relations::new();
    relations.pairs = take(fetched.pairs, SourceKind::PairChemistry, &mut degraded);
    relations.rivalries = take(fetched.rivalries, SourceKind::Rivalries, &mut degraded);
    relations.trios = take(fetched.trios, SourceKind::Trios, &mut degraded);

    let slots: HashMap<PlayerId, usize> = players
        .iter()
        .enumerate()
        .map(|(i, p)| (p.id.clone(), i))
        .collect();
    let lookup = |id: &PlayerId, kind: SourceKind| {
        let slot = slots.get(id).copied();
        if slot.is_none() {
            debug!(event = "unknown_player", source = %kind, player = %id);
        }
        slot
    };

    for (id, form) in take(fetched.form, SourceKind::RecentForm, &mut degraded) {
        if let Some(i) = lookup(&id, SourceKind::RecentForm) {
            players[i].form = Some(form);
        }
    }
    for (id, preferences) in take(fetched.positions, SourceKind::Positions, &mut degraded) {
        if let Some(i) = lookup(&id, SourceKind::Positions) {
            players[i].positions = preferences.into_iter().collect();
        }
    }
    for (id, attributes) in take(fetched.attributes, SourceKind::Attributes, &mut degraded) {
        if let Some(i) = lookup(&id, SourceKind::Attributes) {
            players[i].attributes = Some(attributes);
        }
    }

    info!(
        event = "assembled",
        players = players.len(),
        pairs = relations.pairs.len(),
        rivalries = relations.rivalries.len(),
        trios = relations.trios.len(),
        degraded = degraded.len(),
    );

    Ok(Assembled {
        players,
        relations,
        degraded,
    })
}

fn take<T>(
    fetched: Option<SourceResult<Vec<T>>>,
    kind: SourceKind,
    degraded: &mut Vec<DegradedSource>,
) -> Vec<T> {
    match fetched {
        Some(Ok(records)) => records,
        Some(Err(err)) => {
            warn!(event = "source_degraded", source = %kind, error = %err);
            degraded.push(DegradedSource {
                source: kind,
                message: err.to_string(),
            });
            Vec::new()
        }
        None => {
            warn!(event = "source_degraded", source = %kind, error = "no response");
            degraded.push(DegradedSource {
                source: kind,
                message: "no response".to_string(),
            });
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests;
