//! Candidate splits over pool indices.

use teamforge_core::{PlayerId, Team, TeamAssignment};

use crate::pool::Pool;

/// A two-colouring of a pool, addressed by canonical pool index.
///
/// Member lists are kept sorted so that iteration order never depends on
/// how the split was produced.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Split {
    sides: Vec<Team>,
    team_a: Vec<usize>,
    team_b: Vec<usize>,
}

impl Split {
    pub fn from_sides(sides: Vec<Team>) -> Self {
        let mut team_a = Vec::with_capacity(sides.len() / 2 + 1);
        let mut team_b = Vec::with_capacity(sides.len() / 2 + 1);
        for (index, side) in sides.iter().enumerate() {
            match side {
                Team::A => team_a.push(index),
                Team::B => team_b.push(index),
            }
        }
        Self {
            sides,
            team_a,
            team_b,
        }
    }

    pub fn side(&self, index: usize) -> Team {
        self.sides[index]
    }

    pub fn sides(&self) -> &[Team] {
        &self.sides
    }

    pub fn members(&self, team: Team) -> &[usize] {
        match team {
            Team::A => &self.team_a,
            Team::B => &self.team_b,
        }
    }

    pub fn team_size(&self, team: Team) -> usize {
        self.members(team).len()
    }

    pub fn player_count(&self) -> usize {
        self.sides.len()
    }

    /// Returns a copy with `a` and `b` exchanged between teams.
    ///
    /// `a` and `b` must be on opposite teams.
    pub fn swapped(&self, a: usize, b: usize) -> Split {
        debug_assert_ne!(self.sides[a], self.sides[b]);
        let mut sides = self.sides.clone();
        sides.swap(a, b);
        Split::from_sides(sides)
    }

    /// Converts to an id-based assignment.
    pub fn to_assignment(&self, pool: &Pool) -> TeamAssignment {
        let ids = |members: &[usize]| -> Vec<PlayerId> {
            members.iter().map(|&i| pool.player(i).id.clone()).collect()
        };
        TeamAssignment::new(ids(&self.team_a), ids(&self.team_b))
    }
}
