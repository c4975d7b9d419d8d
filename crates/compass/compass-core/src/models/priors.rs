use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ExperienceLevel;

/// Persisted inputs of the loading predictor, maintained by the adaptation
/// loop.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadingPriors {
    /// Minimum compression level for new strategies.
    pub compression_floor: u8,
    /// Overrides the configured preload candidate cap when set.
    pub preload_limit: Option<usize>,
    /// Maximum priority items per experience level.
    pub level_item_limits: BTreeMap<ExperienceLevel, usize>,
    /// Priority boost for items that recur in mined patterns.
    pub item_boosts: BTreeMap<String, f64>,
    /// item → (next item → probability it is loaded later in the session).
    pub follow_probabilities: BTreeMap<String, BTreeMap<String, f64>>,
}
