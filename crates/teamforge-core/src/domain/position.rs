//! Positions, categories and ranked preferences.

use serde::{Deserialize, Serialize};

/// Maximum number of ranked preferences a player may carry.
pub const MAX_POSITION_PREFERENCES: usize = 3;

/// A concrete playing position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Goalkeeper,
    CenterBack,
    FullBack,
    WingBack,
    DefensiveMidfield,
    CentralMidfield,
    AttackingMidfield,
    Winger,
    Striker,
}

impl Position {
    pub fn category(self) -> PositionCategory {
        match self {
            Position::Goalkeeper => PositionCategory::Goalkeeper,
            Position::CenterBack | Position::FullBack | Position::WingBack => {
                PositionCategory::Defense
            }
            Position::DefensiveMidfield
            | Position::CentralMidfield
            | Position::AttackingMidfield => PositionCategory::Midfield,
            Position::Winger | Position::Striker => PositionCategory::Attack,
        }
    }

    /// Share of an attacking slot this position fills.
    pub fn attacking_slot_weight(self) -> f64 {
        match self {
            Position::Striker => 1.0,
            Position::Winger | Position::AttackingMidfield => 0.5,
            _ => 0.0,
        }
    }
}

/// Broad position category used by the hard constraint guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionCategory {
    Goalkeeper,
    Defense,
    Midfield,
    Attack,
}

impl PositionCategory {
    pub const ALL: [PositionCategory; 4] = [
        PositionCategory::Goalkeeper,
        PositionCategory::Defense,
        PositionCategory::Midfield,
        PositionCategory::Attack,
    ];

    pub const OUTFIELD: [PositionCategory; 3] = [
        PositionCategory::Defense,
        PositionCategory::Midfield,
        PositionCategory::Attack,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// One ranked position preference with its weighted consensus (percent).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionPreference {
    pub position: Position,
    pub consensus: f64,
}

impl PositionPreference {
    pub fn new(position: Position, consensus: f64) -> Self {
        Self {
            position,
            consensus,
        }
    }
}
