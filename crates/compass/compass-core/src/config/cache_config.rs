use serde::{Deserialize, Serialize};

use super::defaults;

/// Smart cache and preload manager configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Predicted probability a candidate must exceed to be preloaded.
    pub preload_probability: f64,
    /// Share of `memory_limit` the preload set may occupy.
    pub preload_memory_share: f64,
    /// Share of `max_load_time` the preload set may consume.
    pub preload_time_share: f64,
    pub max_preload_candidates: usize,
    pub max_entries: usize,
    pub max_bytes: u64,
    /// Entries accessed within this window are never evicted.
    pub session_window_secs: i64,
    /// Priority given to entries inserted by preloading.
    pub preload_priority: u8,
    /// Memoized recommendation lists kept per engine.
    pub memo_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            preload_probability: defaults::DEFAULT_PRELOAD_PROBABILITY,
            preload_memory_share: defaults::DEFAULT_PRELOAD_MEMORY_SHARE,
            preload_time_share: defaults::DEFAULT_PRELOAD_TIME_SHARE,
            max_preload_candidates: defaults::DEFAULT_MAX_PRELOAD_CANDIDATES,
            max_entries: defaults::DEFAULT_CACHE_MAX_ENTRIES,
            max_bytes: defaults::DEFAULT_CACHE_MAX_BYTES,
            session_window_secs: defaults::DEFAULT_SESSION_WINDOW_SECS,
            preload_priority: defaults::DEFAULT_PRELOAD_PRIORITY,
            memo_capacity: defaults::DEFAULT_MEMO_CAPACITY,
        }
    }
}
