//! Explicit feedback folded into node and edge weights.

use serde::{Deserialize, Serialize};

use compass_core::graph::{Rate, Relationship};
use compass_core::models::Sentiment;

use crate::store::EntityStore;

/// Outcome of one recommendation as reported by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackOutcome {
    Positive,
    Negative,
}

impl FeedbackOutcome {
    /// Neutral sentiment carries no outcome.
    pub fn from_sentiment(sentiment: Sentiment) -> Option<Self> {
        match sentiment {
            Sentiment::Positive => Some(FeedbackOutcome::Positive),
            Sentiment::Negative => Some(FeedbackOutcome::Negative),
            Sentiment::Neutral => None,
        }
    }

    fn sign(self) -> f64 {
        match self {
            FeedbackOutcome::Positive => 1.0,
            FeedbackOutcome::Negative => -1.0,
        }
    }
}

/// State of a node after feedback was applied.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackResult {
    pub node_id: String,
    pub success_rate: Rate,
    pub usage_frequency: u64,
    pub edges_adjusted: usize,
}

/// Incoming edge relationships nudged alongside the node.
const NUDGED: [Relationship; 2] = [Relationship::Requires, Relationship::Enhances];

/// Apply one piece of feedback to `node_id`.
///
/// Success rate moves by ±`delta`; positive feedback also counts one use.
/// Incoming `requires`/`enhances` edges move by ±`delta / 2`. All values are
/// clamped. Unknown ids are a logged no-op returning `None`.
pub fn learn_from_feedback(
    store: &mut EntityStore,
    node_id: &str,
    outcome: FeedbackOutcome,
    delta: f64,
) -> Option<FeedbackResult> {
    if !store.contains(node_id) {
        tracing::warn!(node_id, "feedback for unknown node ignored");
        return None;
    }
    let step = outcome.sign() * delta;

    let success_rate = store.adjust_success_rate(node_id, step).ok()?;
    if outcome == FeedbackOutcome::Positive {
        store.add_usage(node_id, 1).ok()?;
    }

    let mut edges_adjusted = 0;
    for edge in store.incoming(node_id) {
        if !NUDGED.contains(&edge.relationship) {
            continue;
        }
        if store
            .adjust_edge_strength(&edge.from, &edge.to, edge.relationship, step / 2.0)
            .is_ok()
        {
            edges_adjusted += 1;
        }
    }

    let usage_frequency = store.node(node_id).map(|n| n.usage_frequency)?;
    tracing::debug!(
        node_id,
        outcome = ?outcome,
        success_rate = success_rate.value(),
        edges_adjusted,
        "feedback applied"
    );
    Some(FeedbackResult {
        node_id: node_id.to_string(),
        success_rate,
        usage_frequency,
        edges_adjusted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use compass_core::graph::{GraphEdge, GraphNode, NodeType};

    fn store() -> EntityStore {
        let mut store = EntityStore::new();
        store.upsert_node(GraphNode::new("a", NodeType::Standard).with_success_rate(0.5));
        store.upsert_node(GraphNode::new("b", NodeType::Standard).with_success_rate(0.5));
        store.upsert_node(GraphNode::new("c", NodeType::Standard));
        store
            .add_edge(GraphEdge::new("a", "b", Relationship::Requires, 0.6))
            .unwrap();
        store
            .add_edge(GraphEdge::new("c", "b", Relationship::Similar, 0.6))
            .unwrap();
        store
    }

    #[test]
    fn positive_feedback_raises_rate_usage_and_requires_edge() {
        let mut store = store();
        let result = learn_from_feedback(&mut store, "b", FeedbackOutcome::Positive, 0.05).unwrap();
        assert!((result.success_rate.value() - 0.55).abs() < 1e-12);
        assert_eq!(result.usage_frequency, 1);
        assert_eq!(result.edges_adjusted, 1);

        let edges = store.incoming("b");
        let requires = edges
            .iter()
            .find(|e| e.relationship == Relationship::Requires)
            .unwrap();
        let similar = edges
            .iter()
            .find(|e| e.relationship == Relationship::Similar)
            .unwrap();
        assert!((requires.strength.value() - 0.625).abs() < 1e-12);
        assert_eq!(similar.strength.value(), 0.6);
    }

    #[test]
    fn negative_feedback_does_not_count_usage() {
        let mut store = store();
        let result = learn_from_feedback(&mut store, "b", FeedbackOutcome::Negative, 0.05).unwrap();
        assert!((result.success_rate.value() - 0.45).abs() < 1e-12);
        assert_eq!(result.usage_frequency, 0);
    }

    #[test]
    fn unknown_node_is_a_no_op() {
        let mut store = store();
        assert!(learn_from_feedback(&mut store, "ghost", FeedbackOutcome::Positive, 0.05).is_none());
        assert_eq!(store.node_count(), 3);
    }

    #[test]
    fn neutral_sentiment_has_no_outcome() {
        assert_eq!(FeedbackOutcome::from_sentiment(Sentiment::Neutral), None);
        assert_eq!(
            FeedbackOutcome::from_sentiment(Sentiment::Negative),
            Some(FeedbackOutcome::Negative)
        );
    }
}
