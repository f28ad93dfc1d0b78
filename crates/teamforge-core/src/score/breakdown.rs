//! Component breakdown of one scoring call.

use serde::Serialize;

use super::imbalance::ImbalanceScore;

/// The five scored components, in weight-vector order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    CoreRatings,
    Chemistry,
    Performance,
    Position,
    Attributes,
}

impl Component {
    pub const ALL: [Component; 5] = [
        Component::CoreRatings,
        Component::Chemistry,
        Component::Performance,
        Component::Position,
        Component::Attributes,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Component::CoreRatings => "core_ratings",
            Component::Chemistry => "chemistry",
            Component::Performance => "performance",
            Component::Position => "position",
            Component::Attributes => "attributes",
        }
    }
}

/// Chemistry sub-scores and their weighted combination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ChemistryBreakdown {
    pub pairwise: f64,
    pub rivalry: f64,
    pub trio: f64,
    pub combined: f64,
}

/// Component scores plus the weighted total.
///
/// Every component lies in `[0, 1]`; the total is the dot product with the
/// weight vector it was built with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    core_ratings: f64,
    chemistry: ChemistryBreakdown,
    performance: f64,
    position: f64,
    attributes: f64,
    total: f64,
}

impl ScoreBreakdown {
    pub fn new(
        core_ratings: f64,
        chemistry: ChemistryBreakdown,
        performance: f64,
        position: f64,
        attributes: f64,
        weights: &[f64; 5],
    ) -> Self {
        let mut breakdown = Self {
            core_ratings,
            chemistry,
            performance,
            position,
            attributes,
            total: 0.0,
        };
        breakdown.total = breakdown.weighted_total(weights);
        breakdown
    }

    pub fn core_ratings(&self) -> f64 {
        self.core_ratings
    }

    pub fn chemistry(&self) -> &ChemistryBreakdown {
        &self.chemistry
    }

    pub fn performance(&self) -> f64 {
        self.performance
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn attributes(&self) -> f64 {
        self.attributes
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn score(&self) -> ImbalanceScore {
        ImbalanceScore::of(self.total)
    }

    pub fn component(&self, component: Component) -> f64 {
        match component {
            Component::CoreRatings => self.core_ratings,
            Component::Chemistry => self.chemistry.combined,
            Component::Performance => self.performance,
            Component::Position => self.position,
            Component::Attributes => self.attributes,
        }
    }

    pub fn components(&self) -> [f64; 5] {
        Component::ALL.map(|c| self.component(c))
    }

    /// Dot product of the components with `weights`.
    pub fn weighted_total(&self, weights: &[f64; 5]) -> f64 {
        Component::ALL
            .iter()
            .map(|c| weights[c.index()] * self.component(*c))
            .sum()
    }
}
