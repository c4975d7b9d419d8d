use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Persistence and history retention configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the JSON state documents.
    pub state_dir: PathBuf,
    pub max_interactions: usize,
    pub max_feedback: usize,
    pub max_metrics: usize,
    pub max_pending_cache_ops: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            state_dir: PathBuf::from(defaults::DEFAULT_STATE_DIR),
            max_interactions: defaults::DEFAULT_MAX_INTERACTIONS,
            max_feedback: defaults::DEFAULT_MAX_FEEDBACK,
            max_metrics: defaults::DEFAULT_MAX_METRICS,
            max_pending_cache_ops: defaults::DEFAULT_MAX_PENDING_CACHE_OPS,
        }
    }
}
