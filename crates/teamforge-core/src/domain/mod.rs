//! Domain model for balancing requests.
//!
//! Records in this module are immutable inputs. They arrive already merged
//! from their sources and are never mutated by the balancer.

mod player;
mod position;
mod relation;
mod team;

pub use player::{
    AttributeKind, CoreRatings, Player, PlayerId, PlaystyleAttributes, RatingKind, RecentForm,
};
pub use position::{Position, PositionCategory, PositionPreference, MAX_POSITION_PREFERENCES};
pub use relation::{PairChemistry, RivalryEdge, TrioChemistry};
pub use team::{Team, TeamAssignment};
