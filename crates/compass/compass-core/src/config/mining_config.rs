use serde::{Deserialize, Serialize};

use super::defaults;

/// Pattern miner configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MiningConfig {
    /// Number of most recent interactions scanned per mining run.
    pub window: usize,
    /// Minimum occurrences of a 3-gram before it becomes a sequential pattern.
    pub sequential_min_frequency: u64,
    /// Minimum (project_type, experience_level) group size.
    pub contextual_min_group: usize,
    /// Minimum hour-of-day bucket size.
    pub temporal_min_bucket: usize,
    /// Fixed, non-adaptive confidence attached to temporal patterns.
    pub temporal_confidence: f64,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            window: defaults::DEFAULT_MINING_WINDOW,
            sequential_min_frequency: defaults::DEFAULT_SEQUENTIAL_MIN_FREQUENCY,
            contextual_min_group: defaults::DEFAULT_CONTEXTUAL_MIN_GROUP,
            temporal_min_bucket: defaults::DEFAULT_TEMPORAL_MIN_BUCKET,
            temporal_confidence: defaults::DEFAULT_TEMPORAL_CONFIDENCE,
        }
    }
}
