use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Tag → weight table.
pub type WeightTable = BTreeMap<String, f64>;

/// Loading strategy predictor and optimizer configuration.
///
/// The phase and task-domain tables map a phase name (or domain name) to the
/// per-tag weights added to an item's loading priority.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadingConfig {
    pub chunk_size: usize,
    pub parallelism: usize,
    pub compression_level: u8,
    pub cache_duration_secs: u64,
    pub max_priority_items: usize,
    /// Chunk size multiplier applied when the token budget is exceeded.
    pub token_chunk_shrink: f64,
    /// Item count multiplier applied when the token budget is exceeded.
    pub token_item_trim: f64,
    /// Base load time per item (milliseconds).
    pub per_item_ms: f64,
    /// Fraction of load time saved at 100% cache utilization.
    pub cache_time_bonus: f64,
    /// Relative time penalty per compression level.
    pub compression_time_penalty: f64,
    pub low_bandwidth_preload_cap: usize,
    pub phase_weights: BTreeMap<String, WeightTable>,
    pub domain_weights: BTreeMap<String, WeightTable>,
}

fn table(entries: &[(&str, f64)]) -> WeightTable {
    entries
        .iter()
        .map(|(tag, weight)| (tag.to_string(), *weight))
        .collect()
}

impl Default for LoadingConfig {
    fn default() -> Self {
        let phase_weights = BTreeMap::from([
            (
                "planning".to_string(),
                table(&[("architecture", 0.3), ("documentation", 0.2), ("security", 0.1)]),
            ),
            (
                "development".to_string(),
                table(&[("coding", 0.3), ("testing", 0.2), ("security", 0.1)]),
            ),
            (
                "testing".to_string(),
                table(&[("testing", 0.4), ("quality", 0.2)]),
            ),
            (
                "deployment".to_string(),
                table(&[("devops", 0.3), ("security", 0.3), ("monitoring", 0.2)]),
            ),
            (
                "maintenance".to_string(),
                table(&[("monitoring", 0.3), ("performance", 0.2), ("documentation", 0.1)]),
            ),
        ]);
        let domain_weights = BTreeMap::from([
            (
                "security".to_string(),
                table(&[("security", 0.4), ("compliance", 0.2)]),
            ),
            (
                "frontend".to_string(),
                table(&[("frontend", 0.3), ("accessibility", 0.2), ("performance", 0.1)]),
            ),
            (
                "backend".to_string(),
                table(&[("api", 0.3), ("database", 0.2), ("security", 0.1)]),
            ),
            (
                "devops".to_string(),
                table(&[("devops", 0.3), ("cloud", 0.2), ("monitoring", 0.1)]),
            ),
            (
                "data".to_string(),
                table(&[("data", 0.3), ("database", 0.2), ("ml", 0.1)]),
            ),
            ("testing".to_string(), table(&[("testing", 0.4)])),
        ]);

        Self {
            chunk_size: defaults::DEFAULT_CHUNK_SIZE,
            parallelism: defaults::DEFAULT_PARALLELISM,
            compression_level: defaults::DEFAULT_COMPRESSION_LEVEL,
            cache_duration_secs: defaults::DEFAULT_CACHE_DURATION_SECS,
            max_priority_items: defaults::DEFAULT_MAX_PRIORITY_ITEMS,
            token_chunk_shrink: defaults::DEFAULT_TOKEN_CHUNK_SHRINK,
            token_item_trim: defaults::DEFAULT_TOKEN_ITEM_TRIM,
            per_item_ms: defaults::DEFAULT_PER_ITEM_MS,
            cache_time_bonus: defaults::DEFAULT_CACHE_TIME_BONUS,
            compression_time_penalty: defaults::DEFAULT_COMPRESSION_TIME_PENALTY,
            low_bandwidth_preload_cap: defaults::DEFAULT_LOW_BANDWIDTH_PRELOAD_CAP,
            phase_weights,
            domain_weights,
        }
    }
}
