//! Recommendation read path: candidate generation, conflict filtering,
//! deduplication, and ranking over one immutable snapshot.

use std::collections::{BTreeSet, HashSet};

use compass_core::config::GraphConfig;
use compass_core::graph::{Effort, GraphNode, Rate, Relationship};
use compass_core::models::{
    CandidateSource, Insight, PatternCondition, PatternType, Recommendation,
    RecommendationContext, UsagePattern,
};

use crate::relevance::find_relevant;
use crate::scoring::{deduplicate, estimated_roi, rank, score, weighted};
use crate::store::EntityStore;
use crate::traversal::expand;

/// Action name that marks an experience level as needing simpler guidance.
pub const SIMPLIFY_ACTION: &str = "simplify_for_level";

/// Confidence multiplier for high-effort candidates shown to a level flagged
/// by [`SIMPLIFY_ACTION`].
const SIMPLIFY_FACTOR: f64 = 0.8;

/// Borrowing recommender over a store snapshot, the pattern book, and the
/// latest insights.
pub struct Recommender<'a> {
    store: &'a EntityStore,
    config: &'a GraphConfig,
    patterns: &'a [UsagePattern],
    insights: &'a [Insight],
}

impl<'a> Recommender<'a> {
    pub fn new(store: &'a EntityStore, config: &'a GraphConfig) -> Self {
        Self {
            store,
            config,
            patterns: &[],
            insights: &[],
        }
    }

    pub fn with_patterns(mut self, patterns: &'a [UsagePattern]) -> Self {
        self.patterns = patterns;
        self
    }

    pub fn with_insights(mut self, insights: &'a [Insight]) -> Self {
        self.insights = insights;
        self
    }

    /// Ranked recommendations for `context`, at most `max_recommendations`.
    pub fn recommend(&self, context: &RecommendationContext) -> Vec<Recommendation> {
        let ctx = context.normalized();
        let existing: HashSet<&str> = ctx.existing_standards.iter().map(String::as_str).collect();

        let mut candidates = Vec::new();
        let relevant = find_relevant(self.store, &ctx, self.config);

        for r in &relevant {
            if !self.eligible(r.node, &existing) {
                continue;
            }
            let confidence = score(r.node, None, r.node, self.config);
            let mut rec = self.candidate(r.node, confidence, CandidateSource::Relevance);
            for reason in &r.reasons {
                rec.add_reason(reason.clone());
            }
            candidates.push(rec);
        }

        let anchors = relevant
            .iter()
            .map(|r| r.node)
            .chain(ctx.existing_standards.iter().filter_map(|id| self.store.node(id)));
        for anchor in anchors {
            for hop in expand(self.store, &anchor.id, &Relationship::EXPANSION) {
                if !self.eligible(hop.node, &existing) {
                    continue;
                }
                let confidence = score(anchor, Some(hop.strength), hop.node, self.config);
                let mut rec = self.candidate(hop.node, confidence, CandidateSource::Expansion);
                rec.add_reason(format!("{} {} this standard", anchor.id, hop.relationship));
                candidates.push(rec);
            }
        }

        for pattern in self.patterns.iter().filter(|p| pattern_applies(p, &ctx)) {
            for (target, share) in pattern.standard_targets() {
                let Some(node) = self.store.node(target) else {
                    continue;
                };
                if !self.eligible(node, &existing) {
                    continue;
                }
                let confidence =
                    weighted(pattern.success_rate, Some(Rate::new(share)), node, self.config);
                let mut rec = self.candidate(node, confidence, CandidateSource::Pattern);
                rec.add_reason(format!(
                    "used by {:.0}% of similar projects",
                    share.clamp(0.0, 1.0) * 100.0
                ));
                candidates.push(rec);
            }
        }

        let mut merged = deduplicate(candidates);
        merged.retain(|rec| !self.conflicts_with_existing(&rec.standard_id, &existing));
        if self.level_flagged(&ctx) {
            for rec in merged.iter_mut().filter(|r| r.effort == Effort::High) {
                rec.confidence = rec.confidence * SIMPLIFY_FACTOR;
                rec.add_reason(format!(
                    "high effort for {} users",
                    ctx.experience_level.as_str()
                ));
            }
        }

        let mut ranked = rank(&merged, self.config);
        ranked.truncate(self.config.max_recommendations);
        tracing::debug!(
            relevant = relevant.len(),
            returned = ranked.len(),
            "recommendations ranked"
        );
        ranked
    }

    fn eligible(&self, node: &GraphNode, existing: &HashSet<&str>) -> bool {
        node.node_type.is_recommendable() && !existing.contains(node.id.as_str())
    }

    fn candidate(&self, node: &GraphNode, confidence: f64, source: CandidateSource) -> Recommendation {
        Recommendation {
            standard_id: node.id.clone(),
            title: node.title.clone(),
            confidence: Rate::new(confidence),
            priority: node.priority,
            effort: node.effort,
            estimated_roi: estimated_roi(node, self.config),
            reasoning: Vec::new(),
            dependencies: node.dependencies.iter().cloned().collect(),
            conflicts: node.conflicts.iter().cloned().collect(),
            sources: BTreeSet::from([source]),
        }
    }

    /// Declared conflicts in either direction, or a `conflicts` edge.
    fn conflicts_with_existing(&self, id: &str, existing: &HashSet<&str>) -> bool {
        let declared = self
            .store
            .node(id)
            .is_some_and(|n| n.conflicts.iter().any(|c| existing.contains(c.as_str())));
        declared
            || existing.iter().any(|e| {
                self.store.node(e).is_some_and(|n| n.conflicts.contains(id))
                    || has_conflict_edge(self.store, id, e)
                    || has_conflict_edge(self.store, e, id)
            })
    }

    fn level_flagged(&self, ctx: &RecommendationContext) -> bool {
        let level = ctx.experience_level.as_str();
        self.insights.iter().any(|insight| {
            insight.recommended_actions.iter().any(|a| {
                a.action == SIMPLIFY_ACTION && a.target.as_deref() == Some(level)
            })
        })
    }
}

fn has_conflict_edge(store: &EntityStore, from: &str, to: &str) -> bool {
    store
        .outgoing(from)
        .iter()
        .any(|e| e.to == to && e.relationship == Relationship::Conflicts)
}

/// Contextual patterns apply when every condition matches the context.
/// A missing project type matches the `unknown` group.
fn pattern_applies(pattern: &UsagePattern, ctx: &RecommendationContext) -> bool {
    if pattern.pattern_type != PatternType::Contextual || pattern.conditions.is_empty() {
        return false;
    }
    let project_type = ctx.project_type.as_deref().unwrap_or("unknown");
    pattern.conditions.iter().all(|c| match c {
        PatternCondition::ProjectType { value } => value.eq_ignore_ascii_case(project_type),
        PatternCondition::ExperienceLevel { value } => *value == ctx.experience_level,
        PatternCondition::Sequence { .. } | PatternCondition::HourOfDay { .. } => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use compass_core::graph::{GraphEdge, NodeType};
    use compass_core::models::{ExperienceLevel, Impact, InsightType, PatternOutcome, RecommendedAction};

    fn store() -> EntityStore {
        let mut store = EntityStore::new();
        store.upsert_node(
            GraphNode::new("api", NodeType::Standard)
                .with_tags(["rust", "axum"])
                .with_success_rate(0.8)
                .with_priority(9),
        );
        store.upsert_node(
            GraphNode::new("errors", NodeType::Standard)
                .with_success_rate(0.7)
                .with_priority(7)
                .with_effort(Effort::High),
        );
        store.upsert_node(GraphNode::new("legacy", NodeType::Standard).with_conflicts(["api"]));
        store.upsert_node(GraphNode::new("axum-tech", NodeType::Technology).with_tags(["rust", "axum"]));
        store
            .add_edge(GraphEdge::new("api", "errors", Relationship::Requires, 0.9))
            .unwrap();
        store
    }

    fn ctx() -> RecommendationContext {
        RecommendationContext {
            languages: vec!["Rust".into()],
            frameworks: vec!["Axum".into()],
            ..Default::default()
        }
    }

    #[test]
    fn expansion_scores_through_edge_strength() {
        let store = store();
        let config = GraphConfig::default();
        let recs = Recommender::new(&store, &config).recommend(&ctx());
        let ids: Vec<&str> = recs.iter().map(|r| r.standard_id.as_str()).collect();
        assert_eq!(ids, vec!["api", "errors"]);

        let errors = &recs[1];
        assert!((errors.confidence.value() - 0.8 * 0.9 * 0.8).abs() < 1e-12);
        assert!(errors.sources.contains(&CandidateSource::Expansion));
        assert!(errors.reasoning.iter().any(|r| r.contains("requires")));
    }

    #[test]
    fn technology_nodes_are_never_recommended() {
        let store = store();
        let config = GraphConfig::default();
        let recs = Recommender::new(&store, &config).recommend(&ctx());
        assert!(recs.iter().all(|r| r.standard_id != "axum-tech"));
    }

    #[test]
    fn existing_conflicts_and_existing_standards_are_excluded() {
        let store = store();
        let config = GraphConfig::default();
        let context = RecommendationContext {
            existing_standards: vec!["legacy".into()],
            ..ctx()
        };
        let recs = Recommender::new(&store, &config).recommend(&context);
        let ids: Vec<&str> = recs.iter().map(|r| r.standard_id.as_str()).collect();
        assert!(!ids.contains(&"api"));
        assert!(!ids.contains(&"legacy"));
    }

    #[test]
    fn contextual_patterns_contribute_candidates() {
        let store = store();
        let config = GraphConfig::default();
        let pattern = UsagePattern {
            pattern_id: UsagePattern::derive_id(PatternType::Contextual, "web|beginner"),
            pattern_type: PatternType::Contextual,
            frequency: 6,
            success_rate: Rate::new(1.0),
            conditions: vec![
                PatternCondition::ProjectType { value: "web".into() },
                PatternCondition::ExperienceLevel { value: ExperienceLevel::Beginner },
            ],
            outcomes: vec![PatternOutcome::targeting("standard_used", "legacy", 0.5)],
            last_seen: Utc::now(),
        };
        let patterns = [pattern];
        let context = RecommendationContext {
            project_type: Some("Web".into()),
            experience_level: ExperienceLevel::Beginner,
            ..Default::default()
        };
        let recs = Recommender::new(&store, &config)
            .with_patterns(&patterns)
            .recommend(&context);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].standard_id, "legacy");
        assert!((recs[0].confidence.value() - 0.5 * 0.6).abs() < 1e-12);
    }

    #[test]
    fn flagged_level_demotes_high_effort() {
        let store = store();
        let config = GraphConfig::default();
        let insight = Insight::new(InsightType::UserBehavior, "beginners struggle", 0.8, Impact::High)
            .with_action(RecommendedAction::targeting(SIMPLIFY_ACTION, "beginner"));
        let insights = [insight];
        let context = RecommendationContext {
            experience_level: ExperienceLevel::Beginner,
            ..ctx()
        };
        let recs = Recommender::new(&store, &config)
            .with_insights(&insights)
            .recommend(&context);
        let errors = recs.iter().find(|r| r.standard_id == "errors").unwrap();
        assert!((errors.confidence.value() - 0.8 * 0.9 * 0.8 * 0.8).abs() < 1e-12);
    }

    #[test]
    fn results_are_bounded() {
        let store = store();
        let config = GraphConfig {
            max_recommendations: 1,
            ..Default::default()
        };
        assert_eq!(Recommender::new(&store, &config).recommend(&ctx()).len(), 1);
    }
}
