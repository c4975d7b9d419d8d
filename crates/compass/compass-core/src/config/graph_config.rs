use serde::{Deserialize, Serialize};

use super::defaults;
use crate::graph::Effort;

/// Fixed relevance increments, one per context signal category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RelevanceWeights {
    pub language: f64,
    pub framework: f64,
    pub project_type: f64,
    pub existing_standard: f64,
    pub security: f64,
    pub performance: f64,
}

impl Default for RelevanceWeights {
    fn default() -> Self {
        Self {
            language: defaults::DEFAULT_LANGUAGE_INCREMENT,
            framework: defaults::DEFAULT_FRAMEWORK_INCREMENT,
            project_type: defaults::DEFAULT_PROJECT_TYPE_INCREMENT,
            existing_standard: defaults::DEFAULT_EXISTING_STANDARD_INCREMENT,
            security: defaults::DEFAULT_SECURITY_INCREMENT,
            performance: defaults::DEFAULT_PERFORMANCE_INCREMENT,
        }
    }
}

/// One row of the priority weight table: nodes with `priority >= min_priority`
/// get `weight`. Rows are evaluated highest `min_priority` first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityBand {
    pub min_priority: u8,
    pub weight: f64,
}

/// Weight per effort level. Lower effort ranks higher.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EffortWeights {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

impl EffortWeights {
    pub fn weight(&self, effort: Effort) -> f64 {
        match effort {
            Effort::Low => self.low,
            Effort::Medium => self.medium,
            Effort::High => self.high,
        }
    }
}

impl Default for EffortWeights {
    fn default() -> Self {
        Self {
            low: 1.0,
            medium: 0.7,
            high: 0.4,
        }
    }
}

/// Weights of the final ranking sum.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RankWeights {
    pub confidence: f64,
    pub priority: f64,
    pub effort: f64,
    pub roi: f64,
}

impl Default for RankWeights {
    fn default() -> Self {
        Self {
            confidence: defaults::DEFAULT_RANK_CONFIDENCE_WEIGHT,
            priority: defaults::DEFAULT_RANK_PRIORITY_WEIGHT,
            effort: defaults::DEFAULT_RANK_EFFORT_WEIGHT,
            roi: defaults::DEFAULT_RANK_ROI_WEIGHT,
        }
    }
}

/// Entity store and recommendation scorer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub relevance: RelevanceWeights,
    /// Minimum relevance for a node to qualify in `find_relevant`.
    pub relevance_threshold: f64,
    pub priority_weights: Vec<PriorityBand>,
    pub effort_weights: EffortWeights,
    pub rank_weights: RankWeights,
    /// Success-rate step applied per explicit feedback.
    pub feedback_delta: f64,
    pub max_recommendations: usize,
    /// Share of a contextual group that must use a standard for the pattern
    /// to record it as an outcome.
    pub pattern_usage_share: f64,
}

impl GraphConfig {
    /// Look up the weight for a node priority in the band table.
    pub fn priority_weight(&self, priority: u8) -> f64 {
        let mut bands: Vec<&PriorityBand> = self.priority_weights.iter().collect();
        bands.sort_by(|a, b| b.min_priority.cmp(&a.min_priority));
        bands
            .into_iter()
            .find(|band| priority >= band.min_priority)
            .map(|band| band.weight)
            .unwrap_or(0.0)
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            relevance: RelevanceWeights::default(),
            relevance_threshold: defaults::DEFAULT_RELEVANCE_THRESHOLD,
            priority_weights: vec![
                PriorityBand { min_priority: 9, weight: 1.0 },
                PriorityBand { min_priority: 7, weight: 0.8 },
                PriorityBand { min_priority: 4, weight: 0.6 },
                PriorityBand { min_priority: 0, weight: 0.4 },
            ],
            effort_weights: EffortWeights::default(),
            rank_weights: RankWeights::default(),
            feedback_delta: defaults::DEFAULT_FEEDBACK_DELTA,
            max_recommendations: defaults::DEFAULT_MAX_RECOMMENDATIONS,
            pattern_usage_share: defaults::DEFAULT_PATTERN_USAGE_SHARE,
        }
    }
}
