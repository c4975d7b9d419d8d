use compass_core::config::GraphConfig;
use compass_core::graph::GraphNode;
use compass_core::models::RecommendationContext;

use crate::store::EntityStore;

const SECURITY_TAG: &str = "security";

/// A node that qualified against a context, with the signals that matched.
#[derive(Debug, Clone)]
pub struct RelevantNode<'a> {
    pub node: &'a GraphNode,
    pub relevance: f64,
    pub reasons: Vec<String>,
}

/// Score every node against the context's signal categories.
///
/// Each category whose values intersect the node's tags or category adds its
/// fixed increment. Nodes at or above the relevance threshold qualify.
/// Results are ordered by relevance descending, then id.
pub fn find_relevant<'a>(
    store: &'a EntityStore,
    context: &RecommendationContext,
    config: &GraphConfig,
) -> Vec<RelevantNode<'a>> {
    let w = &config.relevance;
    let project_type: Vec<String> = context.project_type.iter().cloned().collect();

    let mut out: Vec<RelevantNode<'a>> = store
        .nodes()
        .into_iter()
        .filter_map(|node| {
            let mut relevance = 0.0;
            let mut reasons = Vec::new();

            if node.matches_any(&context.languages) {
                relevance += w.language;
                reasons.push("matches project language".to_string());
            }
            if node.matches_any(&context.frameworks) {
                relevance += w.framework;
                reasons.push("matches project framework".to_string());
            }
            if node.matches_any(&project_type) {
                relevance += w.project_type;
                reasons.push("fits project type".to_string());
            }
            if let Some(existing) = related_existing(store, node, &context.existing_standards) {
                relevance += w.existing_standard;
                reasons.push(format!("related to existing standard {existing}"));
            }
            if is_security_tagged(node) && node.matches_any(&context.security_requirements) {
                relevance += w.security;
                reasons.push("addresses security requirements".to_string());
            }
            if node.matches_any(&context.performance_requirements) {
                relevance += w.performance;
                reasons.push("addresses performance requirements".to_string());
            }

            (relevance >= config.relevance_threshold).then_some(RelevantNode {
                node,
                relevance,
                reasons,
            })
        })
        .collect();

    out.sort_by(|a, b| {
        b.relevance
            .partial_cmp(&a.relevance)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.node.id.cmp(&b.node.id))
    });
    out
}

fn is_security_tagged(node: &GraphNode) -> bool {
    node.tags.contains(SECURITY_TAG) || node.category.as_deref() == Some(SECURITY_TAG)
}

/// First existing standard the node is connected to, by edge or declared
/// dependency.
fn related_existing<'e>(
    store: &EntityStore,
    node: &GraphNode,
    existing: &'e [String],
) -> Option<&'e str> {
    existing
        .iter()
        .filter(|id| id.as_str() != node.id)
        .find(|id| {
            store.adjacent(&node.id, id)
                || node.dependencies.contains(id.as_str())
                || store
                    .node(id)
                    .is_some_and(|other| other.dependencies.contains(&node.id))
        })
        .map(String::as_str)
}
