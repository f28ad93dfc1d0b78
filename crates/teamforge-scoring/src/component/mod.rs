//! The five score components.
//!
//! Each component is a pure function of a pool and a split and returns a
//! value in `[0, 1]`, where zero means the teams are indistinguishable.

pub mod attributes;
pub mod chemistry;
pub mod performance;
pub mod position;
pub mod ratings;

pub use attributes::attributes_imbalance;
pub use chemistry::chemistry_imbalance;
pub use performance::performance_imbalance;
pub use position::{category_counts, position_imbalance};
pub use ratings::core_ratings_imbalance;

use crate::pool::{Pool, PoolPlayer};

/// Mean of `value` over `members`, or `None` for an empty team.
pub(crate) fn team_mean<F>(pool: &Pool, members: &[usize], value: F) -> Option<f64>
where
    F: Fn(&PoolPlayer) -> f64,
{
    if members.is_empty() {
        return None;
    }
    let sum: f64 = members.iter().map(|&i| value(pool.player(i))).sum();
    Some(sum / members.len() as f64)
}

/// `|a - b| / scale`, clamped to one; zero when either side is missing.
pub(crate) fn normalized_gap(a: Option<f64>, b: Option<f64>, scale: f64) -> f64 {
    match (a, b) {
        (Some(a), Some(b)) => ((a - b).abs() / scale).min(1.0),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests;
