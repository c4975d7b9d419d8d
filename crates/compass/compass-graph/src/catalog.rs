//! Graph catalog: the seed document a graph is built from.
//!
//! A catalog lists standards with their relations by id. Relations become
//! edges with fixed default strengths; references to ids that are not in the
//! catalog are skipped.

use serde::{Deserialize, Serialize};

use compass_core::graph::{Effort, GraphEdge, GraphNode, NodeType, Relationship};

use crate::store::EntityStore;

const REQUIRES_STRENGTH: f64 = 0.9;
const ENHANCES_STRENGTH: f64 = 0.7;
const IMPLEMENTS_STRENGTH: f64 = 0.8;
const SIMILAR_STRENGTH: f64 = 0.6;
const CONFLICTS_STRENGTH: f64 = 1.0;

fn default_node_type() -> NodeType {
    NodeType::Standard
}

fn default_priority() -> u8 {
    5
}

/// One catalog row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    #[serde(default = "default_node_type")]
    pub node_type: NodeType,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default = "default_priority")]
    pub priority: u8,
    #[serde(default)]
    pub effort: Effort,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub requires: Vec<String>,
    #[serde(default)]
    pub enhances: Vec<String>,
    #[serde(default)]
    pub implements: Vec<String>,
    #[serde(default)]
    pub similar: Vec<String>,
    #[serde(default)]
    pub conflicts: Vec<String>,
}

impl CatalogEntry {
    fn relations(&self) -> Vec<(Relationship, f64, &str)> {
        let groups = [
            (&self.requires, Relationship::Requires, REQUIRES_STRENGTH),
            (&self.enhances, Relationship::Enhances, ENHANCES_STRENGTH),
            (&self.implements, Relationship::Implements, IMPLEMENTS_STRENGTH),
            (&self.similar, Relationship::Similar, SIMILAR_STRENGTH),
            (&self.conflicts, Relationship::Conflicts, CONFLICTS_STRENGTH),
        ];
        groups
            .into_iter()
            .flat_map(|(list, r, s)| list.iter().map(move |to| (r, s, to.as_str())))
            .collect()
    }

    fn to_node(&self) -> GraphNode {
        let mut node = GraphNode::new(self.id.clone(), self.node_type)
            .with_priority(self.priority)
            .with_effort(self.effort)
            .with_tags(self.tags.iter().cloned())
            .with_dependencies(self.requires.iter().cloned())
            .with_conflicts(self.conflicts.iter().cloned());
        if let Some(title) = &self.title {
            node.title = title.clone();
        }
        if let Some(category) = &self.category {
            node = node.with_category(category.clone());
        }
        node
    }
}

/// Build a store from catalog entries. Returns the store and the number of
/// relations that were skipped.
pub fn build_from_catalog(entries: &[CatalogEntry]) -> (EntityStore, usize) {
    let mut store = EntityStore::new();
    for entry in entries {
        store.upsert_node(entry.to_node());
    }

    let mut skipped = 0;
    for entry in entries {
        for (relationship, strength, to) in entry.relations() {
            let edge = GraphEdge::new(entry.id.as_str(), to, relationship, strength);
            if let Err(e) = store.upsert_edge(edge) {
                tracing::warn!(from = %entry.id, to = %to, error = %e, "skipping catalog relation");
                skipped += 1;
            }
        }
    }
    tracing::info!(
        nodes = store.node_count(),
        edges = store.edge_count(),
        skipped,
        "graph built from catalog"
    );
    (store, skipped)
}
