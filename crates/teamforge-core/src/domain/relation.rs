//! Historical relations between players.
//!
//! Each relation carries the number of games it was observed over. The
//! scorer ignores relations below its minimum-games threshold entirely.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// Symmetric same-team synergy between two players.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairChemistry {
    /// Ordered so that `players.0 < players.1`.
    pub players: (PlayerId, PlayerId),
    pub games: u32,
    /// Synergy strength on the chemistry scale (0..=100 by default).
    pub strength: f64,
}

impl PairChemistry {
    pub fn new(a: impl Into<PlayerId>, b: impl Into<PlayerId>, games: u32, strength: f64) -> Self {
        let (a, b) = (a.into(), b.into());
        let players = if a <= b { (a, b) } else { (b, a) };
        Self {
            players,
            games,
            strength,
        }
    }
}

/// Directed head-to-head bias of `player` against `opponent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RivalryEdge {
    pub player: PlayerId,
    pub opponent: PlayerId,
    pub games: u32,
    /// Net advantage of `player` over `opponent`, in `-100..=100`.
    pub advantage: f64,
}

impl RivalryEdge {
    pub fn new(
        player: impl Into<PlayerId>,
        opponent: impl Into<PlayerId>,
        games: u32,
        advantage: f64,
    ) -> Self {
        Self {
            player: player.into(),
            opponent: opponent.into(),
            games,
            advantage,
        }
    }
}

/// Symmetric three-player same-team synergy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrioChemistry {
    /// Sorted ascending.
    pub players: [PlayerId; 3],
    pub games: u32,
    pub strength: f64,
}

impl TrioChemistry {
    pub fn new(
        a: impl Into<PlayerId>,
        b: impl Into<PlayerId>,
        c: impl Into<PlayerId>,
        games: u32,
        strength: f64,
    ) -> Self {
        let mut players = [a.into(), b.into(), c.into()];
        players.sort();
        Self {
            players,
            games,
            strength,
        }
    }
}
