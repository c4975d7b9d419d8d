use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::Impact;

/// Adaptation loop configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdaptationConfig {
    /// Interval between scheduled cycles (seconds).
    pub cycle_interval_secs: u64,
    /// Queued feedback records that trigger an early cycle.
    pub feedback_trigger: usize,
    /// Insights below this impact are reported but not applied.
    pub min_apply_impact: Impact,
    /// Follow-probability entries kept per item.
    pub follow_prior_limit: usize,
    /// Priority boost given to items that recur in mined patterns.
    pub pattern_prior_boost: f64,
}

impl Default for AdaptationConfig {
    fn default() -> Self {
        Self {
            cycle_interval_secs: defaults::DEFAULT_CYCLE_INTERVAL_SECS,
            feedback_trigger: defaults::DEFAULT_FEEDBACK_TRIGGER,
            min_apply_impact: Impact::High,
            follow_prior_limit: defaults::DEFAULT_FOLLOW_PRIOR_LIMIT,
            pattern_prior_boost: defaults::DEFAULT_PATTERN_PRIOR_BOOST,
        }
    }
}
