//! Team labels and complete assignments.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// One of the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Team {
    A,
    B,
}

impl Team {
    pub fn other(self) -> Team {
        match self {
            Team::A => Team::B,
            Team::B => Team::A,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Team::A => 0,
            Team::B => 1,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::A => f.write_str("Team A"),
            Team::B => f.write_str("Team B"),
        }
    }
}

/// A complete, disjoint two-colouring of a pool.
///
/// Both member lists are kept sorted by id so equal assignments compare
/// equal regardless of how they were built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamAssignment {
    team_a: Vec<PlayerId>,
    team_b: Vec<PlayerId>,
}

impl TeamAssignment {
    pub fn new(mut team_a: Vec<PlayerId>, mut team_b: Vec<PlayerId>) -> Self {
        team_a.sort();
        team_b.sort();
        Self { team_a, team_b }
    }

    pub fn members(&self, team: Team) -> &[PlayerId] {
        match team {
            Team::A => &self.team_a,
            Team::B => &self.team_b,
        }
    }

    pub fn team_a(&self) -> &[PlayerId] {
        &self.team_a
    }

    pub fn team_b(&self) -> &[PlayerId] {
        &self.team_b
    }

    /// Returns the team of `id`, or `None` if it is not assigned.
    pub fn team_of(&self, id: &PlayerId) -> Option<Team> {
        if self.team_a.binary_search(id).is_ok() {
            Some(Team::A)
        } else if self.team_b.binary_search(id).is_ok() {
            Some(Team::B)
        } else {
            None
        }
    }

    pub fn player_count(&self) -> usize {
        self.team_a.len() + self.team_b.len()
    }
}
