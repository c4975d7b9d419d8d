use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Optimizer branch applied to a strategy. Each applies at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Adjustment {
    TokenBudget,
    LoadTime,
    LowBandwidth,
}

/// The ordered, resource-bounded plan for delivering a set of items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadingStrategy {
    pub priority_items: Vec<String>,
    pub chunk_size: usize,
    pub parallelism: usize,
    /// 0–9.
    pub compression_level: u8,
    pub cache_duration_secs: u64,
    pub preload_candidates: Vec<String>,
    #[serde(default)]
    pub applied_adjustments: BTreeSet<Adjustment>,
}

impl LoadingStrategy {
    /// `priority_items.len() × chunk_size`.
    pub fn estimated_tokens(&self) -> usize {
        self.priority_items.len().saturating_mul(self.chunk_size)
    }
}

/// A preload candidate with the evidence behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreloadCandidate {
    pub item: String,
    pub probability: f64,
    pub estimated_bytes: u64,
}

/// Result of `optimize_loading`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadingOptimization {
    pub strategy: LoadingStrategy,
    pub estimated_tokens: usize,
    pub estimated_time_ms: f64,
    pub cache_utilization: f64,
    /// Whether the final strategy fits both the token and time budgets.
    pub constraints_satisfied: bool,
    /// Branches applied during this call, in order.
    pub adjustments: Vec<Adjustment>,
    pub preload: Vec<PreloadCandidate>,
}
