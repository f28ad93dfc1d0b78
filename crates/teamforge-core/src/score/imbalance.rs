//! ImbalanceScore - scalar score with a total order

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

/// A single non-negative imbalance value.
///
/// Ordering uses `f64::total_cmp`, so scores can be used directly as
/// reduction keys in parallel searches.
///
/// # Examples
///
/// ```
/// use teamforge_core::ImbalanceScore;
///
/// let even = ImbalanceScore::of(0.02);
/// let lopsided = ImbalanceScore::of(0.30);
///
/// assert!(even < lopsided);
/// assert!(even.is_better_than(&lopsided));
/// ```
#[derive(Clone, Copy, Default, Serialize)]
#[serde(transparent)]
pub struct ImbalanceScore(f64);

impl ImbalanceScore {
    /// Perfect balance.
    pub const ZERO: ImbalanceScore = ImbalanceScore(0.0);

    #[inline]
    pub const fn of(value: f64) -> Self {
        ImbalanceScore(value)
    }

    #[inline]
    pub const fn value(&self) -> f64 {
        self.0
    }

    /// Returns true if this score is strictly more balanced than `other`.
    #[inline]
    pub fn is_better_than(&self, other: &Self) -> bool {
        self < other
    }
}

impl PartialEq for ImbalanceScore {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ImbalanceScore {}

impl Ord for ImbalanceScore {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for ImbalanceScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for ImbalanceScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ImbalanceScore({})", self.0)
    }
}

impl fmt::Display for ImbalanceScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.0)
    }
}
