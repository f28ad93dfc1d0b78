//! Player fixtures.
//!
//! # Example
//!
//! ```
//! use teamforge_test::players::{balanced_pool, PlayerBuilder};
//!
//! let pool = balanced_pool(12);
//! assert_eq!(pool.len(), 12);
//!
//! let keeper = PlayerBuilder::new("gk").skill(6.0).goalkeeper().build();
//! assert!(keeper.permanent_goalkeeper);
//! ```

use teamforge_core::{CoreRatings, Player, PlaystyleAttributes, Position, RecentForm};

/// Fluent builder over [`Player`] with fixture-friendly defaults.
#[derive(Debug, Clone)]
pub struct PlayerBuilder {
    player: Player,
}

impl PlayerBuilder {
    /// A player rated 5.0 everywhere, no positions, no form.
    pub fn new(id: &str) -> Self {
        Self {
            player: Player::new(id).with_ratings(CoreRatings::new(5.0, 5.0, 5.0, 5.0)),
        }
    }

    /// Sets all four core ratings to `value`.
    pub fn skill(mut self, value: f64) -> Self {
        self.player.ratings = Some(CoreRatings::new(value, value, value, value));
        self
    }

    pub fn ratings(mut self, attack: f64, defense: f64, game_iq: f64, goalkeeping: f64) -> Self {
        self.player.ratings = Some(CoreRatings::new(attack, defense, game_iq, goalkeeping));
        self
    }

    pub fn unrated(mut self) -> Self {
        self.player.ratings = None;
        self
    }

    pub fn position(mut self, position: Position, consensus: f64) -> Self {
        self.player = self.player.with_position(position, consensus);
        self
    }

    pub fn form(mut self, win_rate: f64, goal_differential: f64, games: u32) -> Self {
        self.player = self
            .player
            .with_form(RecentForm::new(win_rate, goal_differential, games));
        self
    }

    pub fn attributes(mut self, value: f64) -> Self {
        self.player = self.player.with_attributes(PlaystyleAttributes::new(
            value, value, value, value, value, value,
        ));
        self
    }

    pub fn games(mut self, total: u32) -> Self {
        self.player = self.player.with_total_games(total);
        self
    }

    pub fn goalkeeper(mut self) -> Self {
        self.player = self
            .player
            .with_position(Position::Goalkeeper, 100.0)
            .as_permanent_goalkeeper();
        self
    }

    pub fn build(self) -> Player {
        self.player
    }
}

/// A player rated `value` on every core rating.
pub fn rated(id: &str, value: f64) -> Player {
    PlayerBuilder::new(id).skill(value).build()
}

/// `n` players `p01..` with strictly decreasing uniform skill from 9.0.
pub fn skill_ladder(n: usize) -> Vec<Player> {
    (0..n)
        .map(|i| rated(&format!("p{:02}", i + 1), 9.0 - 6.0 * i as f64 / n.max(1) as f64))
        .collect()
}

const OUTFIELD_ROTATION: [Position; 6] = [
    Position::CenterBack,
    Position::CentralMidfield,
    Position::Striker,
    Position::FullBack,
    Position::DefensiveMidfield,
    Position::Winger,
];

/// `n` varied but deterministic outfield players `p01..`.
///
/// Skills are scrambled across ids, positions rotate through defence,
/// midfield and attack, and every other player has recent form.
pub fn balanced_pool(n: usize) -> Vec<Player> {
    let span = n.saturating_sub(1).max(1) as f64;
    (0..n)
        .map(|i| {
            let base = 3.0 + 6.0 * ((i * 7) % n.max(1)) as f64 / span;
            let tilt = (i % 3) as f64 - 1.0;
            let mut builder = PlayerBuilder::new(&format!("p{:02}", i + 1))
                .ratings(
                    clamp(base + 0.5 * tilt),
                    clamp(base - 0.5 * tilt),
                    clamp(base),
                    clamp(base - 1.0),
                )
                .position(OUTFIELD_ROTATION[i % OUTFIELD_ROTATION.len()], 70.0)
                .attributes(0.3 + 0.4 * ((i * 5) % n.max(1)) as f64 / span)
                .games(if i % 2 == 0 { 25 } else { 6 });
            if i % 2 == 1 {
                builder = builder.form(40.0 + 20.0 * (i % 4) as f64 / 3.0, tilt, 8);
            }
            builder.build()
        })
        .collect()
}

/// [`balanced_pool`] of `outfield` players plus permanent goalkeepers
/// `gk1` and `gk2`.
pub fn pool_with_goalkeepers(outfield: usize) -> Vec<Player> {
    let mut players = balanced_pool(outfield);
    players.push(PlayerBuilder::new("gk1").skill(6.5).goalkeeper().games(30).build());
    players.push(PlayerBuilder::new("gk2").skill(5.5).goalkeeper().games(30).build());
    players
}

fn clamp(value: f64) -> f64 {
    value.clamp(0.0, 10.0)
}
