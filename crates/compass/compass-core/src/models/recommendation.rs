use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::graph::{Effort, Rate};

/// Which candidate generator proposed a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateSource {
    /// The node matched the context directly.
    Relevance,
    /// Reached by following an edge from a relevant or existing node.
    Expansion,
    /// Suggested by a contextual usage pattern.
    Pattern,
}

/// A ranked recommendation for one standard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub standard_id: String,
    pub title: String,
    pub confidence: Rate,
    pub priority: u8,
    pub effort: Effort,
    pub estimated_roi: f64,
    /// Human-readable reasons, unioned across merged candidates.
    pub reasoning: Vec<String>,
    pub dependencies: Vec<String>,
    pub conflicts: Vec<String>,
    pub sources: BTreeSet<CandidateSource>,
}

impl Recommendation {
    /// Append a reason unless it is already present.
    pub fn add_reason(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        if !self.reasoning.contains(&reason) {
            self.reasoning.push(reason);
        }
    }
}
