//! Phase 2: merge mined patterns into the pattern book and fold the book into
//! the graph as pattern nodes with `supports` edges to the standards they use.

use compass_analysis::{merge_patterns, MergeStats};
use compass_core::graph::{GraphEdge, GraphNode, NodeType, Relationship};
use compass_core::models::UsagePattern;
use compass_graph::EntityStore;

use crate::state::AdaptiveState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FoldStats {
    pub merge: MergeStats,
    pub pattern_nodes: usize,
    pub supports_edges: usize,
}

pub fn merge_and_fold(state: &mut AdaptiveState, mined: Vec<UsagePattern>) -> FoldStats {
    let merge = merge_patterns(state.history.patterns_mut(), mined);
    let mut stats = FoldStats {
        merge,
        ..Default::default()
    };
    for pattern in state.history.patterns() {
        let (node, edges) = fold_pattern(&mut state.graph, pattern);
        stats.pattern_nodes += usize::from(node);
        stats.supports_edges += edges;
    }
    stats
}

/// Upsert one pattern node and its `supports` edges. Returns whether the
/// node was written and how many edges were.
fn fold_pattern(graph: &mut EntityStore, pattern: &UsagePattern) -> (bool, usize) {
    if let Some(existing) = graph.node(&pattern.pattern_id) {
        if existing.node_type != NodeType::Pattern {
            tracing::warn!(
                pattern_id = %pattern.pattern_id,
                "pattern id collides with a non-pattern node, skipping"
            );
            return (false, 0);
        }
    }

    let mut node = GraphNode::new(pattern.pattern_id.clone(), NodeType::Pattern)
        .with_success_rate(pattern.success_rate.value())
        .with_tags([pattern.pattern_type.as_str()]);
    node.title = format!("{} pattern", pattern.pattern_type.as_str());
    node.usage_frequency = pattern.frequency;
    graph.upsert_node(node);

    let mut edges = 0;
    for (standard, score) in pattern.standard_targets() {
        if !graph.contains(standard) {
            continue;
        }
        let edge = GraphEdge::new(
            pattern.pattern_id.clone(),
            standard,
            Relationship::Supports,
            score,
        );
        match graph.upsert_edge(edge) {
            Ok(()) => edges += 1,
            Err(e) => tracing::debug!(error = %e, "supports edge skipped"),
        }
    }
    (true, edges)
}
