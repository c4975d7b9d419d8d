use std::collections::HashSet;

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use compass_core::graph::Relationship;
use compass_core::models::Recommendation;

use crate::store::EntityStore;

/// Order recommended ids so that every standard comes after the standards it
/// requires.
///
/// Only `requires` edges and declared dependencies between recommended ids
/// count. If they form a cycle the input (rank) order is returned unchanged.
pub fn implementation_order(store: &EntityStore, ranked: &[Recommendation]) -> Vec<String> {
    let ids: Vec<&str> = ranked.iter().map(|r| r.standard_id.as_str()).collect();
    let members: HashSet<&str> = ids.iter().copied().collect();

    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();
    for &id in &ids {
        graph.add_node(id);
    }
    for rec in ranked {
        let dependent = rec.standard_id.as_str();
        let required = store
            .outgoing(dependent)
            .into_iter()
            .filter(|e| e.relationship == Relationship::Requires)
            .map(|e| e.to);
        for dep in required.chain(rec.dependencies.iter().cloned()) {
            if let Some(&dep) = members.get(dep.as_str()) {
                if dep != dependent {
                    graph.add_edge(dep, dependent, ());
                }
            }
        }
    }

    match toposort(&graph, None) {
        Ok(order) => order.into_iter().map(str::to_string).collect(),
        Err(cycle) => {
            tracing::warn!(
                node = cycle.node_id(),
                "requires cycle among recommendations, keeping rank order"
            );
            ids.into_iter().map(str::to_string).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compass_core::graph::{Effort, GraphEdge, GraphNode, NodeType, Rate};
    use std::collections::BTreeSet;

    fn rec(id: &str) -> Recommendation {
        Recommendation {
            standard_id: id.to_string(),
            title: id.to_string(),
            confidence: Rate::new(0.5),
            priority: 5,
            effort: Effort::Medium,
            estimated_roi: 0.5,
            reasoning: vec![],
            dependencies: vec![],
            conflicts: vec![],
            sources: BTreeSet::new(),
        }
    }

    fn store(edges: &[(&str, &str)]) -> EntityStore {
        let mut store = EntityStore::new();
        for id in ["a", "b", "c"] {
            store.upsert_node(GraphNode::new(id, NodeType::Standard));
        }
        for (from, to) in edges {
            store
                .add_edge(GraphEdge::new(*from, *to, Relationship::Requires, 0.9))
                .unwrap();
        }
        store
    }

    #[test]
    fn required_standards_come_first() {
        let store = store(&[("a", "b"), ("b", "c")]);
        let order = implementation_order(&store, &[rec("a"), rec("b"), rec("c")]);
        assert_eq!(order, vec!["c", "b", "a"]);
    }

    #[test]
    fn cycles_fall_back_to_rank_order() {
        let store = store(&[("a", "b"), ("b", "a")]);
        let order = implementation_order(&store, &[rec("a"), rec("b"), rec("c")]);
        assert_eq!(order, vec!["a", "b", "c"]);
    }
}
