//! Relation records resolved against a pool.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};

use teamforge_config::ChemistryConfig;
use teamforge_core::{BalanceError, PairChemistry, PlayerId, Result, RivalryEdge, TrioChemistry};
use tracing::debug;

/// Raw relation records for one request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Relations {
    pub pairs: Vec<PairChemistry>,
    pub rivalries: Vec<RivalryEdge>,
    pub trios: Vec<TrioChemistry>,
}

impl Relations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pair(mut self, pair: PairChemistry) -> Self {
        self.pairs.push(pair);
        self
    }

    pub fn with_rivalry(mut self, edge: RivalryEdge) -> Self {
        self.rivalries.push(edge);
        self
    }

    pub fn with_trio(mut self, trio: TrioChemistry) -> Self {
        self.trios.push(trio);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty() && self.rivalries.is_empty() && self.trios.is_empty()
    }
}

/// Qualifying relations keyed by pool index.
///
/// Relations below their minimum-games threshold, or naming players outside
/// the pool, are dropped here and never seen by the scorer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelationIndex {
    pairs: Vec<(usize, usize, f64)>,
    rivalries: Vec<(usize, usize, f64)>,
    trios: Vec<([usize; 3], f64)>,
}

impl RelationIndex {
    pub fn build(
        relations: &Relations,
        index: &HashMap<PlayerId, usize>,
        config: &ChemistryConfig,
    ) -> Result<Self> {
        let scale = config.strength_scale;
        let mut outside_pool = 0usize;

        let mut pairs = BTreeMap::new();
        for pair in &relations.pairs {
            let (a, b) = &pair.players;
            if a == b {
                return Err(BalanceError::Data(format!("pair chemistry of {a} with itself")));
            }
            check_range("pair chemistry", pair.strength, 0.0, scale)?;
            if pair.games < config.min_pair_games {
                continue;
            }
            let (Some(i), Some(j)) = (index.get(a), index.get(b)) else {
                outside_pool += 1;
                continue;
            };
            let key = ((*i).min(*j), (*i).max(*j));
            if pairs.insert(key, pair.strength).is_some() {
                return Err(BalanceError::Data(format!(
                    "duplicate pair chemistry for {a} and {b}"
                )));
            }
        }

        // Net advantage of the lower index over the higher, per direction seen.
        let mut rivalries: BTreeMap<(usize, usize), (Option<f64>, Option<f64>)> = BTreeMap::new();
        for edge in &relations.rivalries {
            if edge.player == edge.opponent {
                return Err(BalanceError::Data(format!(
                    "rivalry of {} with itself",
                    edge.player
                )));
            }
            check_range("rivalry advantage", edge.advantage, -scale, scale)?;
            if edge.games < config.min_rivalry_games {
                continue;
            }
            let (Some(&i), Some(&j)) = (index.get(&edge.player), index.get(&edge.opponent)) else {
                outside_pool += 1;
                continue;
            };
            let entry = rivalries.entry((i.min(j), i.max(j))).or_default();
            let slot = if i < j { &mut entry.0 } else { &mut entry.1 };
            if slot.replace(edge.advantage).is_some() {
                return Err(BalanceError::Data(format!(
                    "duplicate rivalry edge {} -> {}",
                    edge.player, edge.opponent
                )));
            }
        }

        let mut trios = BTreeMap::new();
        for trio in &relations.trios {
            let [a, b, c] = &trio.players;
            if a == b || b == c {
                return Err(BalanceError::Data(format!(
                    "trio chemistry with repeated player {b}"
                )));
            }
            check_range("trio chemistry", trio.strength, 0.0, scale)?;
            if trio.games < config.min_trio_games {
                continue;
            }
            let (Some(&i), Some(&j), Some(&k)) = (index.get(a), index.get(b), index.get(c))
            else {
                outside_pool += 1;
                continue;
            };
            let mut key = [i, j, k];
            key.sort_unstable();
            match trios.entry(key) {
                Entry::Vacant(slot) => {
                    slot.insert(trio.strength);
                }
                Entry::Occupied(_) => {
                    return Err(BalanceError::Data(format!(
                        "duplicate trio chemistry for {a}, {b}, {c}"
                    )));
                }
            }
        }

        if outside_pool > 0 {
            debug!(
                event = "relations_outside_pool",
                skipped = outside_pool as u64,
            );
        }

        Ok(Self {
            pairs: pairs.into_iter().map(|((i, j), s)| (i, j, s)).collect(),
            rivalries: rivalries
                .into_iter()
                .filter_map(|((i, j), (forward, backward))| {
                    let net = match (forward, backward) {
                        (Some(f), Some(b)) => (f - b) / 2.0,
                        (Some(f), None) => f,
                        (None, Some(b)) => -b,
                        (None, None) => return None,
                    };
                    Some((i, j, net))
                })
                .collect(),
            trios: trios.into_iter().collect(),
        })
    }

    /// Qualifying pairs as `(low, high, strength)`, sorted.
    pub fn pairs(&self) -> &[(usize, usize, f64)] {
        &self.pairs
    }

    /// Qualifying rivalries as `(low, high, net advantage of low over high)`, sorted.
    pub fn rivalries(&self) -> &[(usize, usize, f64)] {
        &self.rivalries
    }

    /// Qualifying trios with sorted member indices.
    pub fn trios(&self) -> &[([usize; 3], f64)] {
        &self.trios
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty() && self.rivalries.is_empty() && self.trios.is_empty()
    }
}

fn check_range(what: &str, value: f64, min: f64, max: f64) -> Result<()> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(BalanceError::Data(format!(
            "{what} {value} outside [{min}, {max}]"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(ids: &[&str]) -> HashMap<PlayerId, usize> {
        ids.iter()
            .enumerate()
            .map(|(i, id)| (PlayerId::from(*id), i))
            .collect()
    }

    #[test]
    fn test_below_threshold_pairs_excluded() {
        let relations = Relations::new()
            .with_pair(PairChemistry::new("a", "b", 2, 80.0))
            .with_pair(PairChemistry::new("a", "c", 3, 60.0));
        let built =
            RelationIndex::build(&relations, &index(&["a", "b", "c"]), &ChemistryConfig::default())
                .unwrap();
        assert_eq!(built.pairs(), &[(0, 2, 60.0)]);
    }

    #[test]
    fn test_rivalry_directions_combined() {
        let relations = Relations::new()
            .with_rivalry(RivalryEdge::new("b", "a", 5, -20.0))
            .with_rivalry(RivalryEdge::new("a", "b", 5, 30.0))
            .with_rivalry(RivalryEdge::new("c", "a", 4, 10.0));
        let built =
            RelationIndex::build(&relations, &index(&["a", "b", "c"]), &ChemistryConfig::default())
                .unwrap();
        // a over b: (30 - (-20)) / 2 = 25; a over c: -10
        assert_eq!(built.rivalries(), &[(0, 1, 25.0), (0, 2, -10.0)]);
    }

    #[test]
    fn test_relations_outside_pool_skipped() {
        let relations = Relations::new()
            .with_pair(PairChemistry::new("a", "zz", 10, 80.0))
            .with_trio(TrioChemistry::new("a", "b", "zz", 10, 80.0));
        let built =
            RelationIndex::build(&relations, &index(&["a", "b"]), &ChemistryConfig::default())
                .unwrap();
        assert!(built.is_empty());
    }

    #[test]
    fn test_duplicate_pair_rejected() {
        let relations = Relations::new()
            .with_pair(PairChemistry::new("a", "b", 5, 80.0))
            .with_pair(PairChemistry::new("b", "a", 6, 70.0));
        let err = RelationIndex::build(&relations, &index(&["a", "b"]), &ChemistryConfig::default())
            .unwrap_err();
        assert!(matches!(err, BalanceError::Data(_)));
    }

    #[test]
    fn test_strength_out_of_scale_rejected() {
        let relations = Relations::new().with_pair(PairChemistry::new("a", "b", 5, 180.0));
        assert!(
            RelationIndex::build(&relations, &index(&["a", "b"]), &ChemistryConfig::default())
                .is_err()
        );
    }

    #[test]
    fn test_trio_indices_sorted() {
        let relations = Relations::new().with_trio(TrioChemistry::new("c", "b", "a", 3, 40.0));
        let built = RelationIndex::build(
            &relations,
            &index(&["c", "b", "a"]),
            &ChemistryConfig::default(),
        )
        .unwrap();
        assert_eq!(built.trios(), &[([0, 1, 2], 40.0)]);
    }
}
