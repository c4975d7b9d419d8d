use serde::{Deserialize, Serialize};

use super::defaults;

/// Signal analyzer thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Number of most recent metrics compared against the all-time mean.
    pub performance_recent_window: usize,
    /// Relative response-time increase that counts as degradation.
    pub response_degradation_ratio: f64,
    pub error_rate_threshold: f64,
    pub memory_usage_threshold: f64,
    /// Minimum group size for task-type groups.
    pub behavior_min_group: usize,
    pub low_satisfaction_threshold: f64,
    pub low_completion_threshold: f64,
    /// Number of most recent feedback records scanned.
    pub feedback_window: usize,
    pub feedback_min_samples: usize,
    pub negative_ratio_threshold: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            performance_recent_window: defaults::DEFAULT_PERFORMANCE_RECENT_WINDOW,
            response_degradation_ratio: defaults::DEFAULT_RESPONSE_DEGRADATION_RATIO,
            error_rate_threshold: defaults::DEFAULT_ERROR_RATE_THRESHOLD,
            memory_usage_threshold: defaults::DEFAULT_MEMORY_USAGE_THRESHOLD,
            behavior_min_group: defaults::DEFAULT_BEHAVIOR_MIN_GROUP,
            low_satisfaction_threshold: defaults::DEFAULT_LOW_SATISFACTION_THRESHOLD,
            low_completion_threshold: defaults::DEFAULT_LOW_COMPLETION_THRESHOLD,
            feedback_window: defaults::DEFAULT_FEEDBACK_WINDOW,
            feedback_min_samples: defaults::DEFAULT_FEEDBACK_MIN_SAMPLES,
            negative_ratio_threshold: defaults::DEFAULT_NEGATIVE_RATIO_THRESHOLD,
        }
    }
}
