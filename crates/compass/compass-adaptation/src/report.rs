//! Summary of one adaptation cycle.

use chrono::{DateTime, Utc};
use serde::Serialize;

use compass_core::models::Insight;

/// Everything one cycle observed and changed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CycleReport {
    pub cycle: u64,
    pub started_at: Option<DateTime<Utc>>,
    pub interactions_scanned: usize,

    // Phase 1
    pub patterns_mined: usize,
    pub insights: Vec<Insight>,

    // Phase 2
    pub patterns_inserted: usize,
    pub patterns_replaced: usize,
    pub pattern_nodes: usize,
    pub supports_edges: usize,

    // Phase 3
    pub feedback_applied: usize,
    pub feedback_skipped: usize,
    pub insights_applied: usize,
    /// Qualifying insights left alone because their evidence did not move.
    pub insights_unchanged: usize,
    pub actions_applied: usize,
    /// `action: error` for every handler that failed or was unknown.
    pub action_failures: Vec<String>,

    // Phase 4
    pub follow_items: usize,
    pub boosted_items: usize,
    pub cache_ops_replayed: usize,
    pub cache_promoted: usize,
    pub cache_demoted: usize,
    pub cache_expired: usize,
    pub cache_evicted: usize,

    // Phase 5
    pub persisted: bool,
    pub persistence_error: Option<String>,
}
