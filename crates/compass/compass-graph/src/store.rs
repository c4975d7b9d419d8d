//! petgraph::StableGraph wrapper holding graph nodes and weighted edges.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use petgraph::{Directed, Direction};

use compass_core::constants::DOCUMENT_VERSION;
use compass_core::errors::{CompassResult, GraphError};
use compass_core::graph::{GraphEdge, GraphNode, Rate, Relationship};
use compass_core::models::{GraphDocument, GraphMetadata};

/// Weight stored on a petgraph edge.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeWeight {
    pub relationship: Relationship,
    pub strength: Rate,
}

type Inner = StableGraph<GraphNode, EdgeWeight, Directed>;

/// In-memory entity store. Edges can only be added between existing nodes,
/// so the graph never holds a dangling edge.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    graph: Inner,
    index: HashMap<String, NodeIndex>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node, or replace the stored node with the same id.
    pub fn upsert_node(&mut self, node: GraphNode) -> NodeIndex {
        if let Some(&idx) = self.index.get(&node.id) {
            if let Some(slot) = self.graph.node_weight_mut(idx) {
                *slot = node;
            }
            return idx;
        }
        let id = node.id.clone();
        let idx = self.graph.add_node(node);
        self.index.insert(id, idx);
        idx
    }

    /// Add a new edge. Fails on missing endpoints, self loops, and duplicate
    /// (from, to, relationship) triples.
    pub fn add_edge(&mut self, edge: GraphEdge) -> CompassResult<()> {
        let (from, to) = self.endpoints(&edge)?;
        if self.find_edge(from, to, edge.relationship).is_some() {
            return Err(GraphError::DuplicateEdge {
                from: edge.from,
                to: edge.to,
                relationship: edge.relationship.to_string(),
            }
            .into());
        }
        self.graph.add_edge(
            from,
            to,
            EdgeWeight {
                relationship: edge.relationship,
                strength: edge.strength,
            },
        );
        Ok(())
    }

    /// Add an edge or overwrite the strength of the existing triple.
    pub fn upsert_edge(&mut self, edge: GraphEdge) -> CompassResult<()> {
        let (from, to) = self.endpoints(&edge)?;
        match self.find_edge(from, to, edge.relationship) {
            Some(e) => {
                if let Some(w) = self.graph.edge_weight_mut(e) {
                    w.strength = edge.strength;
                }
            }
            None => {
                self.graph.add_edge(
                    from,
                    to,
                    EdgeWeight {
                        relationship: edge.relationship,
                        strength: edge.strength,
                    },
                );
            }
        }
        Ok(())
    }

    fn endpoints(&self, edge: &GraphEdge) -> CompassResult<(NodeIndex, NodeIndex)> {
        if edge.from == edge.to {
            return Err(GraphError::SelfEdge {
                id: edge.from.clone(),
            }
            .into());
        }
        match (self.index.get(&edge.from), self.index.get(&edge.to)) {
            (Some(&from), Some(&to)) => Ok((from, to)),
            _ => Err(GraphError::DanglingEdge {
                from: edge.from.clone(),
                to: edge.to.clone(),
            }
            .into()),
        }
    }

    fn find_edge(
        &self,
        from: NodeIndex,
        to: NodeIndex,
        relationship: Relationship,
    ) -> Option<petgraph::stable_graph::EdgeIndex> {
        self.graph
            .edges_connecting(from, to)
            .find(|e| e.weight().relationship == relationship)
            .map(|e| e.id())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.index
            .get(id)
            .and_then(|&idx| self.graph.node_weight(idx))
    }

    pub(crate) fn node_mut(&mut self, id: &str) -> Option<&mut GraphNode> {
        match self.index.get(id) {
            Some(&idx) => self.graph.node_weight_mut(idx),
            None => None,
        }
    }

    /// All nodes sorted by id.
    pub fn nodes(&self) -> Vec<&GraphNode> {
        let mut nodes: Vec<&GraphNode> = self
            .graph
            .node_indices()
            .filter_map(|i| self.graph.node_weight(i))
            .collect();
        nodes.sort_by(|a, b| a.id.cmp(&b.id));
        nodes
    }

    /// All edges sorted by (from, to, relationship).
    pub fn edges(&self) -> Vec<GraphEdge> {
        let mut edges: Vec<GraphEdge> = self
            .graph
            .edge_references()
            .filter_map(|e| self.to_edge(e.source(), e.target(), e.weight()))
            .collect();
        edges.sort_by(|a, b| {
            (&a.from, &a.to, a.relationship).cmp(&(&b.from, &b.to, b.relationship))
        });
        edges
    }

    /// Edges leaving `id`, unsorted. Empty for unknown ids.
    pub fn outgoing(&self, id: &str) -> Vec<GraphEdge> {
        self.directed(id, Direction::Outgoing)
    }

    /// Edges entering `id`, unsorted. Empty for unknown ids.
    pub fn incoming(&self, id: &str) -> Vec<GraphEdge> {
        self.directed(id, Direction::Incoming)
    }

    fn directed(&self, id: &str, direction: Direction) -> Vec<GraphEdge> {
        let Some(&idx) = self.index.get(id) else {
            return Vec::new();
        };
        self.graph
            .edges_directed(idx, direction)
            .filter_map(|e| self.to_edge(e.source(), e.target(), e.weight()))
            .collect()
    }

    fn to_edge(&self, from: NodeIndex, to: NodeIndex, weight: &EdgeWeight) -> Option<GraphEdge> {
        let from = self.graph.node_weight(from)?;
        let to = self.graph.node_weight(to)?;
        Some(GraphEdge {
            from: from.id.clone(),
            to: to.id.clone(),
            relationship: weight.relationship,
            strength: weight.strength,
        })
    }

    /// True if any edge connects `a` and `b` in either direction.
    pub fn adjacent(&self, a: &str, b: &str) -> bool {
        match (self.index.get(a), self.index.get(b)) {
            (Some(&a), Some(&b)) => {
                self.graph.find_edge(a, b).is_some() || self.graph.find_edge(b, a).is_some()
            }
            _ => false,
        }
    }

    /// Shift a node's success rate by `delta`, clamped. Returns the new rate.
    pub fn adjust_success_rate(&mut self, id: &str, delta: f64) -> CompassResult<Rate> {
        let node = self.node_mut(id).ok_or_else(|| GraphError::NodeNotFound {
            id: id.to_string(),
        })?;
        node.success_rate = node.success_rate.adjusted(delta);
        Ok(node.success_rate)
    }

    /// Add to a node's usage frequency. Returns the new frequency.
    pub fn add_usage(&mut self, id: &str, count: u64) -> CompassResult<u64> {
        let node = self.node_mut(id).ok_or_else(|| GraphError::NodeNotFound {
            id: id.to_string(),
        })?;
        node.usage_frequency = node.usage_frequency.saturating_add(count);
        Ok(node.usage_frequency)
    }

    /// Shift the strength of one edge triple by `delta`, clamped.
    pub fn adjust_edge_strength(
        &mut self,
        from: &str,
        to: &str,
        relationship: Relationship,
        delta: f64,
    ) -> CompassResult<Rate> {
        let (Some(&a), Some(&b)) = (self.index.get(from), self.index.get(to)) else {
            return Err(GraphError::DanglingEdge {
                from: from.to_string(),
                to: to.to_string(),
            }
            .into());
        };
        let e = self
            .find_edge(a, b, relationship)
            .ok_or_else(|| GraphError::NodeNotFound {
                id: format!("{from}-[{relationship}]->{to}"),
            })?;
        let weight = self
            .graph
            .edge_weight_mut(e)
            .ok_or_else(|| GraphError::NodeNotFound {
                id: format!("{from}-[{relationship}]->{to}"),
            })?;
        weight.strength = weight.strength.adjusted(delta);
        Ok(weight.strength)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Borrow the underlying petgraph graph for algorithms.
    pub(crate) fn inner(&self) -> &Inner {
        &self.graph
    }

    pub(crate) fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    /// Snapshot the store into its persisted form.
    pub fn to_document(&self, now: DateTime<Utc>) -> GraphDocument {
        let nodes: Vec<GraphNode> = self.nodes().into_iter().cloned().collect();
        let edges = self.edges();
        GraphDocument {
            metadata: GraphMetadata {
                last_updated: now,
                total_nodes: nodes.len(),
                total_edges: edges.len(),
                version: DOCUMENT_VERSION,
            },
            nodes,
            edges,
        }
    }

    /// Rebuild a store from its persisted form. Edges that reference missing
    /// nodes or repeat a triple are skipped and counted.
    pub fn from_document(doc: &GraphDocument) -> (Self, usize) {
        let mut store = Self::new();
        for node in &doc.nodes {
            store.upsert_node(node.clone());
        }
        let mut skipped = 0;
        for edge in &doc.edges {
            if let Err(e) = store.add_edge(edge.clone()) {
                tracing::warn!(error = %e, "skipping edge while loading graph");
                skipped += 1;
            }
        }
        (store, skipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compass_core::graph::NodeType;

    fn two_nodes() -> EntityStore {
        let mut store = EntityStore::new();
        store.upsert_node(GraphNode::new("a", NodeType::Standard));
        store.upsert_node(GraphNode::new("b", NodeType::Standard));
        store
    }

    #[test]
    fn rejects_dangling_edges() {
        let mut store = two_nodes();
        let err = store
            .add_edge(GraphEdge::new("a", "missing", Relationship::Requires, 0.5))
            .unwrap_err();
        assert!(err.to_string().contains("missing node"));
        assert_eq!(store.edge_count(), 0);
    }

    #[test]
    fn rejects_duplicate_triples_but_allows_other_relationships() {
        let mut store = two_nodes();
        store
            .add_edge(GraphEdge::new("a", "b", Relationship::Requires, 0.5))
            .unwrap();
        assert!(store
            .add_edge(GraphEdge::new("a", "b", Relationship::Requires, 0.9))
            .is_err());
        store
            .add_edge(GraphEdge::new("a", "b", Relationship::Enhances, 0.9))
            .unwrap();
        assert_eq!(store.edge_count(), 2);
    }

    #[test]
    fn upsert_edge_overwrites_strength() {
        let mut store = two_nodes();
        store
            .upsert_edge(GraphEdge::new("a", "b", Relationship::Similar, 0.2))
            .unwrap();
        store
            .upsert_edge(GraphEdge::new("a", "b", Relationship::Similar, 0.6))
            .unwrap();
        let edges = store.outgoing("a");
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].strength.value(), 0.6);
    }

    #[test]
    fn edge_strength_adjustment_is_clamped() {
        let mut store = two_nodes();
        store
            .add_edge(GraphEdge::new("a", "b", Relationship::Requires, 0.98))
            .unwrap();
        let s = store
            .adjust_edge_strength("a", "b", Relationship::Requires, 0.1)
            .unwrap();
        assert_eq!(s.value(), 1.0);
    }

    #[test]
    fn document_round_trip_preserves_structure() {
        let mut store = two_nodes();
        store
            .add_edge(GraphEdge::new("a", "b", Relationship::Requires, 0.9))
            .unwrap();
        let doc = store.to_document(Utc::now());
        assert_eq!(doc.metadata.total_nodes, 2);
        assert_eq!(doc.metadata.total_edges, 1);

        let (loaded, skipped) = EntityStore::from_document(&doc);
        assert_eq!(skipped, 0);
        assert_eq!(loaded.to_document(doc.metadata.last_updated), doc);
    }

    #[test]
    fn loading_skips_dangling_edges() {
        let store = two_nodes();
        let mut doc = store.to_document(Utc::now());
        doc.edges
            .push(GraphEdge::new("a", "ghost", Relationship::Supports, 0.4));
        let (loaded, skipped) = EntityStore::from_document(&doc);
        assert_eq!(skipped, 1);
        assert_eq!(loaded.edge_count(), 0);
    }
}
