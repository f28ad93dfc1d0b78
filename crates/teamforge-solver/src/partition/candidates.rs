//! Enumeration of spread-constrained splits by mixed-radix index.

use smallvec::SmallVec;
use teamforge_core::Team;
use teamforge_scoring::Split;

use super::combinatorics::{binomial, unrank_combination};
use super::Partition;

/// How many players of each bucket go to Team A, with the resulting block
/// of candidate indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    team_a_counts: SmallVec<[usize; 8]>,
    radices: SmallVec<[u64; 8]>,
    offset: u64,
    count: u64,
}

impl Shape {
    pub fn team_a_counts(&self) -> &[usize] {
        &self.team_a_counts
    }

    pub fn count(&self) -> u64 {
        self.count
    }
}

/// Every split admitted by the bucket constraint, addressable by index.
///
/// Candidate `i` is built directly from `i` without enumerating its
/// predecessors, so the space can be split across workers arbitrarily.
#[derive(Debug, Clone)]
pub struct CandidateSpace<'p> {
    partition: &'p Partition,
    shapes: Vec<Shape>,
    total: u64,
    relaxed: bool,
}

impl<'p> CandidateSpace<'p> {
    /// Each bucket gives Team A exactly half of its players, the odd
    /// buckets' extra players distributed however the team targets allow.
    pub fn strict(partition: &'p Partition) -> Self {
        let sizes = bucket_sizes(partition);
        let floor_sum: usize = sizes.iter().map(|s| s / 2).sum();
        let odd: Vec<usize> = (0..sizes.len()).filter(|&i| sizes[i] % 2 == 1).collect();

        let mut shapes = Vec::new();
        let mut chosen = SmallVec::new();
        for need in team_a_needs(partition) {
            let Some(ceilings) = need.checked_sub(floor_sum) else {
                continue;
            };
            if ceilings > odd.len() {
                continue;
            }
            for rank in 0..binomial(odd.len(), ceilings) {
                unrank_combination(odd.len(), ceilings, rank, &mut chosen);
                let mut counts: SmallVec<[usize; 8]> = sizes.iter().map(|s| s / 2).collect();
                for &o in &chosen {
                    counts[odd[o]] += 1;
                }
                shapes.push(counts);
            }
        }
        Self::from_shapes(partition, shapes, false)
    }

    /// Each bucket may deviate from its half by one player either way.
    pub fn relaxed(partition: &'p Partition) -> Self {
        let sizes = bucket_sizes(partition);
        let mut shapes = Vec::new();
        for need in team_a_needs(partition) {
            let mut current = SmallVec::new();
            relaxed_shapes(&sizes, need, &mut current, &mut shapes);
        }
        Self::from_shapes(partition, shapes, true)
    }

    fn from_shapes(
        partition: &'p Partition,
        counts: Vec<SmallVec<[usize; 8]>>,
        relaxed: bool,
    ) -> Self {
        let sizes = bucket_sizes(partition);
        let mut total = 0u64;
        let shapes = counts
            .into_iter()
            .map(|team_a_counts| {
                let radices: SmallVec<[u64; 8]> = sizes
                    .iter()
                    .zip(&team_a_counts)
                    .map(|(&s, &a)| binomial(s, a))
                    .collect();
                let count = radices.iter().fold(1u64, |acc, &r| acc.saturating_mul(r));
                let shape = Shape {
                    team_a_counts,
                    radices,
                    offset: total,
                    count,
                };
                total = total.saturating_add(count);
                shape
            })
            .collect();
        Self {
            partition,
            shapes,
            total,
            relaxed,
        }
    }

    /// Exact number of candidates.
    pub fn count(&self) -> u64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn is_relaxed(&self) -> bool {
        self.relaxed
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Builds candidate `index`, which must be below [`count`](Self::count).
    pub fn candidate(&self, index: u64) -> Split {
        let shape_index = self
            .shapes
            .partition_point(|shape| shape.offset + shape.count <= index);
        let shape = &self.shapes[shape_index];
        let mut local = index - shape.offset;

        let mut sides: Vec<Team> = self
            .partition
            .pins()
            .iter()
            .map(|pin| pin.unwrap_or(Team::B))
            .collect();

        let mut chosen = SmallVec::new();
        for (bucket, (&take, &radix)) in self
            .partition
            .buckets()
            .iter()
            .zip(shape.team_a_counts.iter().zip(&shape.radices))
        {
            let rank = local % radix;
            local /= radix;
            unrank_combination(bucket.len(), take, rank, &mut chosen);
            for &position in &chosen {
                sides[bucket[position]] = Team::A;
            }
        }
        Split::from_sides(sides)
    }
}

fn bucket_sizes(partition: &Partition) -> SmallVec<[usize; 8]> {
    partition.buckets().iter().map(Vec::len).collect()
}

/// Unpinned players Team A must receive, one entry per orientation.
fn team_a_needs(partition: &Partition) -> SmallVec<[usize; 2]> {
    partition
        .orientations()
        .iter()
        .map(|targets| targets.team_a - partition.pinned_count(Team::A))
        .collect()
}

fn relaxed_shapes(
    sizes: &[usize],
    remaining: usize,
    current: &mut SmallVec<[usize; 8]>,
    out: &mut Vec<SmallVec<[usize; 8]>>,
) {
    let Some((&size, rest)) = sizes.split_first() else {
        if remaining == 0 {
            out.push(current.clone());
        }
        return;
    };
    let low = (size / 2).saturating_sub(1);
    let high = size.min(size.div_ceil(2) + 1);
    let rest_capacity: usize = rest.iter().sum();
    for take in low..=high.min(remaining) {
        if remaining - take > rest_capacity {
            continue;
        }
        current.push(take);
        relaxed_shapes(rest, remaining - take, current, out);
        current.pop();
    }
}
