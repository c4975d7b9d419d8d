//! Node scoring, recommendation deduplication, and ranking.
//!
//! Ranking is a pure function: it consumes candidates and returns a new
//! ordered sequence without touching caller-owned data.

use std::cmp::Ordering;
use std::collections::HashMap;

use compass_core::config::GraphConfig;
use compass_core::graph::{Effort, GraphNode, Rate};
use compass_core::models::Recommendation;

/// `anchor.success_rate × (edge_strength or 1.0) × priorityWeight(target.priority)`.
///
/// For a node scored on its own, pass the same node as anchor and target.
pub fn score(
    anchor: &GraphNode,
    edge_strength: Option<Rate>,
    target: &GraphNode,
    config: &GraphConfig,
) -> f64 {
    weighted(anchor.success_rate, edge_strength, target, config)
}

/// [`score`] with an arbitrary anchor rate, e.g. a pattern's success rate.
pub fn weighted(
    anchor_rate: Rate,
    edge_strength: Option<Rate>,
    target: &GraphNode,
    config: &GraphConfig,
) -> f64 {
    let strength = edge_strength.map(Rate::value).unwrap_or(1.0);
    anchor_rate.value() * strength * config.priority_weight(target.priority)
}

/// Estimated return of adopting a node, in [0, 1].
pub fn estimated_roi(node: &GraphNode, config: &GraphConfig) -> f64 {
    let roi = 0.5 * node.success_rate.value()
        + 0.3 * config.priority_weight(node.priority)
        + 0.2 * config.effort_weights.weight(node.effort);
    roi.clamp(0.0, 1.0)
}

/// Weighted ranking sum for one recommendation.
pub fn rank_score(rec: &Recommendation, config: &GraphConfig) -> f64 {
    let w = &config.rank_weights;
    w.confidence * rec.confidence.value()
        + w.priority * config.priority_weight(rec.priority)
        + w.effort * effort_weight(rec.effort, config)
        + w.roi * rec.estimated_roi
}

fn effort_weight(effort: Effort, config: &GraphConfig) -> f64 {
    config.effort_weights.weight(effort)
}

/// Merge candidates that share a standard id.
///
/// The higher-confidence candidate wins outright (ties keep the earlier one);
/// reasoning and sources are unioned. Confidences are never averaged.
/// Output order follows first appearance.
pub fn deduplicate(candidates: Vec<Recommendation>) -> Vec<Recommendation> {
    let mut order: Vec<String> = Vec::new();
    let mut merged: HashMap<String, Recommendation> = HashMap::new();

    for candidate in candidates {
        match merged.get_mut(&candidate.standard_id) {
            Some(existing) => {
                if candidate.confidence > existing.confidence {
                    let mut winner = candidate;
                    let mut reasons = std::mem::take(&mut existing.reasoning);
                    for r in winner.reasoning.drain(..) {
                        if !reasons.contains(&r) {
                            reasons.push(r);
                        }
                    }
                    winner.reasoning = reasons;
                    winner.sources.extend(existing.sources.iter().copied());
                    *existing = winner;
                } else {
                    for r in candidate.reasoning {
                        existing.add_reason(r);
                    }
                    existing.sources.extend(candidate.sources);
                }
            }
            None => {
                order.push(candidate.standard_id.clone());
                merged.insert(candidate.standard_id.clone(), candidate);
            }
        }
    }

    order
        .into_iter()
        .filter_map(|id| merged.remove(&id))
        .collect()
}

/// Rank recommendations by the weighted sum, descending, ties by id.
pub fn rank(recommendations: &[Recommendation], config: &GraphConfig) -> Vec<Recommendation> {
    let mut scored: Vec<(f64, &Recommendation)> = recommendations
        .iter()
        .map(|r| (rank_score(r, config), r))
        .collect();
    scored.sort_by(|(sa, a), (sb, b)| {
        sb.partial_cmp(sa)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.standard_id.cmp(&b.standard_id))
    });
    scored.into_iter().map(|(_, r)| r.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use compass_core::graph::NodeType;
    use compass_core::models::CandidateSource;
    use std::collections::BTreeSet;

    fn rec(id: &str, confidence: f64, reason: &str) -> Recommendation {
        Recommendation {
            standard_id: id.to_string(),
            title: id.to_string(),
            confidence: Rate::new(confidence),
            priority: 5,
            effort: Effort::Medium,
            estimated_roi: 0.5,
            reasoning: vec![reason.to_string()],
            dependencies: vec![],
            conflicts: vec![],
            sources: BTreeSet::from([CandidateSource::Relevance]),
        }
    }

    #[test]
    fn direct_score_uses_own_success_rate() {
        let config = GraphConfig::default();
        let node = GraphNode::new("a", NodeType::Standard)
            .with_success_rate(0.5)
            .with_priority(9);
        assert!((score(&node, None, &node, &config) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn higher_confidence_wins_and_reasons_union() {
        let merged = deduplicate(vec![
            rec("x", 0.6, "matches rust"),
            rec("x", 0.9, "required by auth"),
        ]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].confidence.value(), 0.9);
        assert!(merged[0].reasoning.contains(&"matches rust".to_string()));
        assert!(merged[0].reasoning.contains(&"required by auth".to_string()));
    }

    #[test]
    fn lower_confidence_arrival_does_not_override() {
        let merged = deduplicate(vec![rec("x", 0.9, "a"), rec("x", 0.6, "b")]);
        assert_eq!(merged[0].confidence.value(), 0.9);
        assert_eq!(merged[0].reasoning, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn rank_ties_break_on_id() {
        let config = GraphConfig::default();
        let input = vec![rec("b", 0.7, "r"), rec("a", 0.7, "r"), rec("c", 0.9, "r")];
        let ranked = rank(&input, &config);
        let ids: Vec<&str> = ranked.iter().map(|r| r.standard_id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
        // Input untouched.
        assert_eq!(input[0].standard_id, "b");
    }

    #[test]
    fn rank_score_matches_weighted_sum() {
        let config = GraphConfig::default();
        let r = rec("a", 0.8, "r");
        let expected = 0.4 * 0.8 + 0.3 * 0.6 + 0.2 * 0.7 + 0.1 * 0.5;
        assert!((rank_score(&r, &config) - expected).abs() < 1e-12);
    }
}
