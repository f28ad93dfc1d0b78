//! Canonical request snapshot.

use std::collections::HashMap;

use teamforge_config::BalanceConfig;
use teamforge_core::{
    AttributeKind, BalanceError, Player, PlayerId, PositionCategory, RatingKind, Result,
    MAX_POSITION_PREFERENCES,
};

use crate::relation::{RelationIndex, Relations};

/// A player with every optional value resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct PoolPlayer {
    pub id: PlayerId,
    /// Core ratings in `RatingKind::ALL` order, neutral-filled.
    pub ratings: [f64; 4],
    /// Mean of the four core ratings; the skill proxy for tiering.
    pub skill: f64,
    /// Attributes in `AttributeKind::ALL` order, neutral-filled.
    pub attributes: [f64; 6],
    /// `(win_rate, goal_differential)` when enough games back it.
    pub form: Option<(f64, f64)>,
    pub category: Option<PositionCategory>,
    /// Consensus-weighted attacking slot coverage.
    pub attacking_slot: f64,
    pub experienced: bool,
    pub permanent_goalkeeper: bool,
}

/// The immutable, canonically ordered snapshot of one balancing request.
///
/// Players are sorted by id; every index handed out by the pool is a rank in
/// that order, which is what makes scoring independent of input ordering.
#[derive(Debug, Clone)]
pub struct Pool {
    players: Vec<PoolPlayer>,
    index: HashMap<PlayerId, usize>,
    relations: RelationIndex,
    category_totals: [usize; 4],
}

const ATTRIBUTE_NEUTRAL: f64 = 0.5;

impl Pool {
    /// Validates and resolves `players`.
    ///
    /// # Errors
    ///
    /// Returns `BalanceError::Data` on duplicate ids, missing core ratings,
    /// or values outside their scales.
    pub fn new(players: &[Player], relations: &Relations, config: &BalanceConfig) -> Result<Self> {
        let mut sorted: Vec<&Player> = players.iter().collect();
        sorted.sort_by(|a, b| a.id.cmp(&b.id));

        if let Some(pair) = sorted.windows(2).find(|w| w[0].id == w[1].id) {
            return Err(BalanceError::Data(format!(
                "duplicate player id {}",
                pair[0].id
            )));
        }

        let unrated: Vec<&str> = sorted
            .iter()
            .filter(|p| p.ratings.is_none())
            .map(|p| p.id.as_str())
            .collect();
        if !unrated.is_empty() {
            return Err(BalanceError::Data(format!(
                "core ratings missing for players: {}",
                unrated.join(", ")
            )));
        }

        let resolved = sorted
            .iter()
            .map(|p| resolve_player(p, config))
            .collect::<Result<Vec<_>>>()?;

        let index: HashMap<PlayerId, usize> = resolved
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id.clone(), i))
            .collect();

        let mut category_totals = [0usize; 4];
        for player in &resolved {
            if let Some(category) = player.category {
                category_totals[category.index()] += 1;
            }
        }

        let relations = RelationIndex::build(relations, &index, &config.chemistry)?;

        Ok(Self {
            players: resolved,
            index,
            relations,
            category_totals,
        })
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn player(&self, index: usize) -> &PoolPlayer {
        &self.players[index]
    }

    pub fn players(&self) -> &[PoolPlayer] {
        &self.players
    }

    pub fn index_of(&self, id: &PlayerId) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn relations(&self) -> &RelationIndex {
        &self.relations
    }

    /// Pool-wide head count per category, in `PositionCategory::ALL` order.
    pub fn category_totals(&self) -> [usize; 4] {
        self.category_totals
    }
}

fn resolve_player(player: &Player, config: &BalanceConfig) -> Result<PoolPlayer> {
    let scale = config.ratings.scale_max;
    let neutral = config.ratings.neutral();
    let id = &player.id;

    // Presence was checked by the caller.
    let core = player.ratings.unwrap_or_default();
    let mut ratings = [neutral; 4];
    for kind in RatingKind::ALL {
        if let Some(value) = core.get(kind) {
            if !value.is_finite() || !(0.0..=scale).contains(&value) {
                return Err(BalanceError::Data(format!(
                    "player {id}: {kind:?} rating {value} outside [0, {scale}]"
                )));
            }
            ratings[kind.index()] = value;
        }
    }
    let skill = ratings.iter().sum::<f64>() / ratings.len() as f64;

    let mut attributes = [ATTRIBUTE_NEUTRAL; 6];
    if let Some(attrs) = &player.attributes {
        for kind in AttributeKind::ALL {
            if let Some(value) = attrs.get(kind) {
                if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                    return Err(BalanceError::Data(format!(
                        "player {id}: {kind:?} attribute {value} outside [0, 1]"
                    )));
                }
                attributes[kind.index()] = value;
            }
        }
    }

    let form = match &player.form {
        Some(form) => {
            if !(0.0..=100.0).contains(&form.win_rate) || !form.goal_differential.is_finite() {
                return Err(BalanceError::Data(format!(
                    "player {id}: invalid recent form {form:?}"
                )));
            }
            (form.games >= config.performance.min_form_games)
                .then_some((form.win_rate, form.goal_differential))
        }
        None => None,
    };

    if player.positions.len() > MAX_POSITION_PREFERENCES {
        return Err(BalanceError::Data(format!(
            "player {id}: {} position preferences, at most {MAX_POSITION_PREFERENCES} allowed",
            player.positions.len()
        )));
    }
    let mut attacking_slot = 0.0;
    for pref in &player.positions {
        if !(0.0..=100.0).contains(&pref.consensus) {
            return Err(BalanceError::Data(format!(
                "player {id}: consensus {} outside [0, 100]",
                pref.consensus
            )));
        }
        attacking_slot += pref.position.attacking_slot_weight() * pref.consensus / 100.0;
    }

    Ok(PoolPlayer {
        id: id.clone(),
        ratings,
        skill,
        attributes,
        form,
        category: player.primary_category(),
        attacking_slot,
        experienced: player.is_experienced(config.constraints.experienced_games),
        permanent_goalkeeper: player.permanent_goalkeeper,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use teamforge_core::{CoreRatings, PlaystyleAttributes, Position, RecentForm};

    fn rated(id: &str, value: f64) -> Player {
        Player::new(id).with_ratings(CoreRatings::new(value, value, value, value))
    }

    #[test]
    fn test_players_sorted_by_id() {
        let players = vec![rated("c", 5.0), rated("a", 6.0), rated("b", 7.0)];
        let pool = Pool::new(&players, &Relations::default(), &BalanceConfig::default()).unwrap();
        let ids: Vec<&str> = pool.players().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(pool.index_of(&"c".into()), Some(2));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let players = vec![rated("a", 5.0), rated("a", 6.0)];
        let err = Pool::new(&players, &Relations::default(), &BalanceConfig::default())
            .unwrap_err();
        assert!(matches!(err, BalanceError::Data(_)));
    }

    #[test]
    fn test_missing_core_ratings_rejected() {
        let players = vec![rated("a", 5.0), Player::new("b")];
        let err = Pool::new(&players, &Relations::default(), &BalanceConfig::default())
            .unwrap_err();
        assert_eq!(
            err,
            BalanceError::Data("core ratings missing for players: b".to_string())
        );
    }

    #[test]
    fn test_unrated_fields_are_neutral() {
        let players = vec![Player::new("a").with_ratings(CoreRatings {
            attack: Some(9.0),
            ..CoreRatings::unrated()
        })];
        let pool = Pool::new(&players, &Relations::default(), &BalanceConfig::default()).unwrap();
        let player = pool.player(0);
        assert_eq!(player.ratings, [9.0, 5.0, 5.0, 5.0]);
        assert_eq!(player.skill, 6.0);
        assert_eq!(player.attributes, [0.5; 6]);
    }

    #[test]
    fn test_rating_out_of_scale_rejected() {
        let players = vec![rated("a", 11.0)];
        assert!(Pool::new(&players, &Relations::default(), &BalanceConfig::default()).is_err());
    }

    #[test]
    fn test_attribute_out_of_range_rejected() {
        let players = vec![rated("a", 5.0)
            .with_attributes(PlaystyleAttributes::new(0.5, 0.5, 0.5, 0.5, 0.5, 1.5))];
        assert!(Pool::new(&players, &Relations::default(), &BalanceConfig::default()).is_err());
    }

    #[test]
    fn test_form_below_min_games_ignored() {
        let players = vec![
            rated("a", 5.0).with_form(RecentForm::new(70.0, 1.0, 2)),
            rated("b", 5.0).with_form(RecentForm::new(40.0, -1.0, 8)),
        ];
        let pool = Pool::new(&players, &Relations::default(), &BalanceConfig::default()).unwrap();
        assert_eq!(pool.player(0).form, None);
        assert_eq!(pool.player(1).form, Some((40.0, -1.0)));
    }

    #[test]
    fn test_position_preferences_capped() {
        let ranked = [
            Position::Striker,
            Position::Winger,
            Position::CentralMidfield,
            Position::CenterBack,
        ];
        let with_prefs = |count: usize| {
            ranked[..count]
                .iter()
                .fold(rated("a", 5.0), |p, &pos| p.with_position(pos, 25.0))
        };

        let at_cap = vec![with_prefs(MAX_POSITION_PREFERENCES)];
        assert!(Pool::new(&at_cap, &Relations::default(), &BalanceConfig::default()).is_ok());

        let over_cap = vec![with_prefs(MAX_POSITION_PREFERENCES + 1)];
        let err = Pool::new(&over_cap, &Relations::default(), &BalanceConfig::default())
            .unwrap_err();
        assert!(matches!(err, BalanceError::Data(msg) if msg.contains("at most 3 allowed")));
    }

    #[test]
    fn test_attacking_slot_and_categories() {
        let players = vec![
            rated("a", 5.0)
                .with_position(Position::Striker, 80.0)
                .with_position(Position::Winger, 20.0),
            rated("b", 5.0).with_position(Position::CenterBack, 100.0),
            rated("c", 5.0),
        ];
        let pool = Pool::new(&players, &Relations::default(), &BalanceConfig::default()).unwrap();
        assert!((pool.player(0).attacking_slot - 0.9).abs() < 1e-12);
        assert_eq!(pool.player(1).attacking_slot, 0.0);
        assert_eq!(pool.category_totals(), [0, 1, 0, 1]);
        assert_eq!(pool.player(2).category, None);
    }
}
