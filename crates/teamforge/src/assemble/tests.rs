use std::collections::HashSet;

use teamforge_core::{Position, Team};
use teamforge_solver::Balancer;
use teamforge_test::{balanced_pool, chemistry_web, PlayerBuilder};

use super::*;

/// In-memory source; any kind listed in `failing` returns an error.
struct StaticSource {
    players: Vec<Player>,
    relations: Relations,
    failing: HashSet<SourceKind>,
}

impl StaticSource {
    fn new(players: Vec<Player>) -> Self {
        let relations = chemistry_web(&players);
        let roster = players
            .into_iter()
            .map(|mut p| {
                p.form = None;
                p.attributes = None;
                p.positions.clear();
                p
            })
            .collect();
        Self {
            players: roster,
            relations,
            failing: HashSet::new(),
        }
    }

    fn failing(mut self, kind: SourceKind) -> Self {
        self.failing.insert(kind);
        self
    }

    fn answer<T>(&self, kind: SourceKind, records: Vec<T>) -> SourceResult<Vec<T>> {
        if self.failing.contains(&kind) {
            Err(SourceError::new(format!("{kind} unavailable")))
        } else {
            Ok(records)
        }
    }
}

impl PlayerDataSource for StaticSource {
    fn core_ratings(&self) -> SourceResult<Vec<Player>> {
        self.answer(SourceKind::CoreRatings, self.players.clone())
    }

    fn pair_chemistry(&self) -> SourceResult<Vec<PairChemistry>> {
        self.answer(SourceKind::PairChemistry, self.relations.pairs.clone())
    }

    fn rivalries(&self) -> SourceResult<Vec<RivalryEdge>> {
        self.answer(SourceKind::Rivalries, self.relations.rivalries.clone())
    }

    fn trios(&self) -> SourceResult<Vec<TrioChemistry>> {
        self.answer(SourceKind::Trios, self.relations.trios.clone())
    }

    fn recent_form(&self) -> SourceResult<Vec<(PlayerId, RecentForm)>> {
        let form = self
            .players
            .iter()
            .map(|p| (p.id.clone(), RecentForm::new(60.0, 1.0, 8)))
            .chain(std::iter::once((
                PlayerId::new("ghost"),
                RecentForm::new(10.0, -3.0, 8),
            )))
            .collect();
        self.answer(SourceKind::RecentForm, form)
    }

    fn positions(&self) -> SourceResult<Vec<(PlayerId, Vec<PositionPreference>)>> {
        let positions = self
            .players
            .iter()
            .map(|p| {
                (
                    p.id.clone(),
                    vec![PositionPreference::new(Position::CentralMidfield, 80.0)],
                )
            })
            .collect();
        self.answer(SourceKind::Positions, positions)
    }

    fn attributes(&self) -> SourceResult<Vec<(PlayerId, PlaystyleAttributes)>> {
        self.answer(SourceKind::Attributes, Vec::new())
    }
}

#[test]
fn merges_every_source() {
    let source = StaticSource::new(balanced_pool(12));
    let assembled = assemble(&source).unwrap();

    assert!(!assembled.is_degraded());
    assert_eq!(assembled.players.len(), 12);
    assert_eq!(assembled.relations, source.relations);
    assert!(assembled
        .players
        .iter()
        .all(|p| p.form.is_some() && p.positions.len() == 1));
}

#[test]
fn failed_enrichment_source_degrades() {
    let source = StaticSource::new(balanced_pool(12))
        .failing(SourceKind::Rivalries)
        .failing(SourceKind::RecentForm);
    let assembled = assemble(&source).unwrap();

    let kinds: Vec<SourceKind> = assembled.degraded.iter().map(|d| d.source).collect();
    assert_eq!(kinds.len(), 2);
    assert!(kinds.contains(&SourceKind::Rivalries));
    assert!(kinds.contains(&SourceKind::RecentForm));
    assert!(assembled.relations.rivalries.is_empty());
    assert!(!assembled.relations.pairs.is_empty());
    assert!(assembled.players.iter().all(|p| p.form.is_none()));
}

#[test]
fn failed_core_source_is_a_data_error() {
    let source = StaticSource::new(balanced_pool(12)).failing(SourceKind::CoreRatings);
    let err = assemble(&source).unwrap_err();
    assert!(matches!(err, BalanceError::Data(msg) if msg.contains("core_ratings")));
}

#[test]
fn assembled_request_balances() {
    let mut players = balanced_pool(11);
    players.push(PlayerBuilder::new("gk1").goalkeeper().build());
    let source = StaticSource::new(players).failing(SourceKind::Trios);
    let assembled = assemble(&source).unwrap();

    let result = Balancer::default()
        .balance(&assembled.into_request())
        .unwrap();
    assert_eq!(result.assignment.team_of(&"gk1".into()), Some(Team::A));
    assert_eq!(result.assignment.player_count(), 12);
}
