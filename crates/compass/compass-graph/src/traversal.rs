use compass_core::graph::{GraphNode, Rate, Relationship};

use crate::store::EntityStore;

/// A node reached by following one outgoing edge.
#[derive(Debug, Clone)]
pub struct Expansion<'a> {
    pub node: &'a GraphNode,
    pub relationship: Relationship,
    pub strength: Rate,
}

/// Follow outgoing edges of `node_id` whose relationship is in `filter`.
///
/// Targets that cannot be resolved are skipped. Results are ordered by
/// strength descending, then target id.
pub fn expand<'a>(
    store: &'a EntityStore,
    node_id: &str,
    filter: &[Relationship],
) -> Vec<Expansion<'a>> {
    let mut out: Vec<Expansion<'a>> = store
        .outgoing(node_id)
        .into_iter()
        .filter(|e| filter.contains(&e.relationship))
        .filter_map(|e| {
            let node = store.node(&e.to);
            if node.is_none() {
                tracing::debug!(from = %e.from, to = %e.to, "skipping unresolved edge target");
            }
            node.map(|node| Expansion {
                node,
                relationship: e.relationship,
                strength: e.strength,
            })
        })
        .collect();
    out.sort_by(|a, b| {
        b.strength
            .partial_cmp(&a.strength)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.node.id.cmp(&b.node.id))
            .then_with(|| a.relationship.cmp(&b.relationship))
    });
    out
}
