//! Player records.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::position::{Position, PositionCategory, PositionPreference};

/// Stable identifier of a player.
///
/// Ordering of ids is the canonical ordering of a pool; every tie-break in
/// the balancer is expressed in terms of it.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        PlayerId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlayerId({})", self.0)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        PlayerId::new(id)
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        PlayerId(id)
    }
}

/// The four core skill ratings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingKind {
    Attack,
    Defense,
    GameIq,
    Goalkeeping,
}

impl RatingKind {
    pub const ALL: [RatingKind; 4] = [
        RatingKind::Attack,
        RatingKind::Defense,
        RatingKind::GameIq,
        RatingKind::Goalkeeping,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Core skill ratings on the configured rating scale.
///
/// A `None` field is unrated and is read as the neutral midpoint of the
/// scale, never as zero skill.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CoreRatings {
    pub attack: Option<f64>,
    pub defense: Option<f64>,
    pub game_iq: Option<f64>,
    pub goalkeeping: Option<f64>,
}

impl CoreRatings {
    /// Creates fully rated core ratings.
    pub fn new(attack: f64, defense: f64, game_iq: f64, goalkeeping: f64) -> Self {
        Self {
            attack: Some(attack),
            defense: Some(defense),
            game_iq: Some(game_iq),
            goalkeeping: Some(goalkeeping),
        }
    }

    /// Creates ratings where every field is unrated.
    pub fn unrated() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: RatingKind) -> Option<f64> {
        match kind {
            RatingKind::Attack => self.attack,
            RatingKind::Defense => self.defense,
            RatingKind::GameIq => self.game_iq,
            RatingKind::Goalkeeping => self.goalkeeping,
        }
    }

    /// Returns the rating, or `neutral` when unrated.
    pub fn resolved(&self, kind: RatingKind, neutral: f64) -> f64 {
        self.get(kind).unwrap_or(neutral)
    }
}

/// The six derived playstyle attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    Pace,
    Shooting,
    Passing,
    Dribbling,
    Defending,
    Physical,
}

impl AttributeKind {
    pub const ALL: [AttributeKind; 6] = [
        AttributeKind::Pace,
        AttributeKind::Shooting,
        AttributeKind::Passing,
        AttributeKind::Dribbling,
        AttributeKind::Defending,
        AttributeKind::Physical,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Playstyle attributes in `[0, 1]`. Missing values read as 0.5.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaystyleAttributes {
    pub pace: Option<f64>,
    pub shooting: Option<f64>,
    pub passing: Option<f64>,
    pub dribbling: Option<f64>,
    pub defending: Option<f64>,
    pub physical: Option<f64>,
}

impl PlaystyleAttributes {
    pub fn new(
        pace: f64,
        shooting: f64,
        passing: f64,
        dribbling: f64,
        defending: f64,
        physical: f64,
    ) -> Self {
        Self {
            pace: Some(pace),
            shooting: Some(shooting),
            passing: Some(passing),
            dribbling: Some(dribbling),
            defending: Some(defending),
            physical: Some(physical),
        }
    }

    pub fn get(&self, kind: AttributeKind) -> Option<f64> {
        match kind {
            AttributeKind::Pace => self.pace,
            AttributeKind::Shooting => self.shooting,
            AttributeKind::Passing => self.passing,
            AttributeKind::Dribbling => self.dribbling,
            AttributeKind::Defending => self.defending,
            AttributeKind::Physical => self.physical,
        }
    }
}

/// Windowed recent-form metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecentForm {
    /// Win rate over the window, in percent.
    pub win_rate: f64,
    /// Average goal differential per game over the window.
    pub goal_differential: f64,
    /// Number of games in the window.
    pub games: u32,
}

impl RecentForm {
    pub fn new(win_rate: f64, goal_differential: f64, games: u32) -> Self {
        Self {
            win_rate,
            goal_differential,
            games,
        }
    }
}

/// A canonical player record as delivered by the normalizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    /// `None` when the core ratings source had no record for this player.
    pub ratings: Option<CoreRatings>,
    pub attributes: Option<PlaystyleAttributes>,
    pub form: Option<RecentForm>,
    /// Ranked preferences, best first.
    pub positions: SmallVec<[PositionPreference; 3]>,
    pub total_games: u32,
    pub permanent_goalkeeper: bool,
}

impl Player {
    /// Creates a player with no data attached.
    pub fn new(id: impl Into<PlayerId>) -> Self {
        Self {
            id: id.into(),
            ratings: None,
            attributes: None,
            form: None,
            positions: SmallVec::new(),
            total_games: 0,
            permanent_goalkeeper: false,
        }
    }

    pub fn with_ratings(mut self, ratings: CoreRatings) -> Self {
        self.ratings = Some(ratings);
        self
    }

    pub fn with_attributes(mut self, attributes: PlaystyleAttributes) -> Self {
        self.attributes = Some(attributes);
        self
    }

    pub fn with_form(mut self, form: RecentForm) -> Self {
        self.form = Some(form);
        self
    }

    /// Appends a position preference at the next rank.
    pub fn with_position(mut self, position: Position, consensus: f64) -> Self {
        self.positions
            .push(PositionPreference::new(position, consensus));
        self
    }

    pub fn with_total_games(mut self, total_games: u32) -> Self {
        self.total_games = total_games;
        self
    }

    pub fn as_permanent_goalkeeper(mut self) -> Self {
        self.permanent_goalkeeper = true;
        self
    }

    /// Returns true if the player has at least `threshold` games.
    pub fn is_experienced(&self, threshold: u32) -> bool {
        self.total_games >= threshold
    }

    /// The category used for hard-constraint counting.
    ///
    /// Permanent goalkeepers are always goalkeepers. Otherwise the preference
    /// with the highest consensus wins, earlier rank on ties.
    pub fn primary_category(&self) -> Option<PositionCategory> {
        if self.permanent_goalkeeper {
            return Some(PositionCategory::Goalkeeper);
        }
        let mut best: Option<&PositionPreference> = None;
        for pref in &self.positions {
            match best {
                Some(b) if pref.consensus <= b.consensus => {}
                _ => best = Some(pref),
            }
        }
        best.map(|p| p.position.category())
    }
}
