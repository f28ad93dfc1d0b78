//! Remainder policy for odd pools.

use teamforge_core::Team;
use teamforge_scoring::{Pool, Split};

use super::Partition;

/// Whether the larger team of `split` is the one that earned the extra player.
///
/// The larger team must not out-skill the smaller one once its weakest
/// unpinned member is set aside. On an exact tie the extra player belongs
/// to Team A. Even splits always hold.
pub fn remainder_policy_holds(pool: &Pool, partition: &Partition, split: &Split) -> bool {
    let size_a = split.team_size(Team::A);
    let size_b = split.team_size(Team::B);
    if size_a == size_b {
        return true;
    }
    let (large, small) = if size_a > size_b {
        (Team::A, Team::B)
    } else {
        (Team::B, Team::A)
    };

    let skill_sum =
        |team: Team| -> f64 { split.members(team).iter().map(|&i| pool.player(i).skill).sum() };

    let members = split.members(large);
    let weakest = members
        .iter()
        .copied()
        .filter(|&i| !partition.is_pinned(i))
        .max_by(|&a, &b| {
            pool.player(b)
                .skill
                .total_cmp(&pool.player(a).skill)
                .then(a.cmp(&b))
        })
        .or_else(|| {
            members.iter().copied().min_by(|&a, &b| {
                pool.player(a).skill.total_cmp(&pool.player(b).skill)
            })
        });
    let Some(weakest) = weakest else {
        return true;
    };

    let without_extra = skill_sum(large) - pool.player(weakest).skill;
    match without_extra.total_cmp(&skill_sum(small)) {
        std::cmp::Ordering::Less => true,
        std::cmp::Ordering::Equal => large == Team::A,
        std::cmp::Ordering::Greater => false,
    }
}
