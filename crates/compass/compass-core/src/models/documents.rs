//! Persisted JSON documents, one per logical store.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CacheEntry, CacheOp, FeedbackRecord, Interaction, LoadingPriors, PerformanceMetric, UsagePattern};
use crate::constants::DOCUMENT_VERSION;
use crate::graph::{GraphEdge, GraphNode};

fn document_version() -> u32 {
    DOCUMENT_VERSION
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphMetadata {
    pub last_updated: DateTime<Utc>,
    pub total_nodes: usize,
    pub total_edges: usize,
    #[serde(default = "document_version")]
    pub version: u32,
}

/// Entity store snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default)]
    pub nodes: Vec<GraphNode>,
    #[serde(default)]
    pub edges: Vec<GraphEdge>,
    pub metadata: GraphMetadata,
}

/// Pattern book plus the bounded event history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryDocument {
    pub version: u32,
    pub patterns: Vec<UsagePattern>,
    pub interactions: Vec<Interaction>,
    pub feedback: Vec<FeedbackRecord>,
    pub metrics: Vec<PerformanceMetric>,
    pub pending_cache_ops: Vec<CacheOp>,
    /// Next sequence number handed to an ingested event.
    pub next_sequence: u64,
    /// Highest feedback sequence already folded into the graph.
    pub applied_feedback_sequence: u64,
    /// Metrics ever appended, including ones since dropped by the cap.
    pub metrics_recorded: u64,
    /// Insight fingerprint -> evidence mark it was last acted on at.
    pub applied_insights: BTreeMap<String, u64>,
}

impl Default for HistoryDocument {
    fn default() -> Self {
        Self {
            version: DOCUMENT_VERSION,
            patterns: Vec::new(),
            interactions: Vec::new(),
            feedback: Vec::new(),
            metrics: Vec::new(),
            pending_cache_ops: Vec::new(),
            next_sequence: 1,
            applied_feedback_sequence: 0,
            metrics_recorded: 0,
            applied_insights: BTreeMap::new(),
        }
    }
}

/// Smart cache entries and loading priors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheDocument {
    pub version: u32,
    pub entries: Vec<CacheEntry>,
    pub priors: LoadingPriors,
    pub last_updated: Option<DateTime<Utc>>,
}

impl Default for CacheDocument {
    fn default() -> Self {
        Self {
            version: DOCUMENT_VERSION,
            entries: Vec::new(),
            priors: LoadingPriors::default(),
            last_updated: None,
        }
    }
}
