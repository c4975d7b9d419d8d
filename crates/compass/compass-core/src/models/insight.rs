use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::graph::Rate;

/// Category of an analyzer insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightType {
    PerformanceTrend,
    UserBehavior,
    FeedbackSentiment,
}

impl InsightType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PerformanceTrend => "performance_trend",
            Self::UserBehavior => "user_behavior",
            Self::FeedbackSentiment => "feedback_sentiment",
        }
    }
}

/// Expected impact of acting on an insight. Ordered low < medium < high.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Impact {
    #[default]
    Low,
    Medium,
    High,
}

/// A named adaptation action, dispatched through the action registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedAction {
    pub action: String,
    #[serde(default)]
    pub target: Option<String>,
}

impl RecommendedAction {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            target: None,
        }
    }

    pub fn targeting(action: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            target: Some(target.into()),
        }
    }
}

/// A scored, actionable observation. Produced per analysis cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub insight_type: InsightType,
    pub description: String,
    pub confidence: Rate,
    pub impact_potential: Impact,
    /// Ordered; applied first to last.
    pub recommended_actions: Vec<RecommendedAction>,
    #[serde(default)]
    pub supporting_data: BTreeMap<String, f64>,
}

impl Insight {
    pub fn new(
        insight_type: InsightType,
        description: impl Into<String>,
        confidence: f64,
        impact_potential: Impact,
    ) -> Self {
        Self {
            insight_type,
            description: description.into(),
            confidence: Rate::new(confidence),
            impact_potential,
            recommended_actions: Vec::new(),
            supporting_data: BTreeMap::new(),
        }
    }

    pub fn with_action(mut self, action: RecommendedAction) -> Self {
        self.recommended_actions.push(action);
        self
    }

    pub fn with_data(mut self, key: impl Into<String>, value: f64) -> Self {
        self.supporting_data.insert(key.into(), value);
        self
    }

    /// Identity of what acting on this insight does: its type plus every
    /// action and target, in order. Descriptions and scores are excluded.
    pub fn fingerprint(&self) -> String {
        let mut key = self.insight_type.as_str().to_string();
        for action in &self.recommended_actions {
            key.push('|');
            key.push_str(&action.action);
            if let Some(target) = &action.target {
                key.push(':');
                key.push_str(target);
            }
        }
        key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_ignores_wording_and_scores() {
        let a = Insight::new(InsightType::FeedbackSentiment, "4 of 6 negative", 0.8, Impact::High)
            .with_action(RecommendedAction::targeting("demote", "api"));
        let b = Insight::new(InsightType::FeedbackSentiment, "5 of 7 negative", 0.6, Impact::High)
            .with_action(RecommendedAction::targeting("demote", "api"))
            .with_data("negative_ratio", 0.7);
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint(), "feedback_sentiment|demote:api");
    }

    #[test]
    fn fingerprint_separates_targets() {
        let a = Insight::new(InsightType::UserBehavior, "x", 0.8, Impact::High)
            .with_action(RecommendedAction::targeting("simplify_for_level", "beginner"));
        let b = Insight::new(InsightType::UserBehavior, "x", 0.8, Impact::High)
            .with_action(RecommendedAction::targeting("simplify_for_level", "expert"));
        assert_ne!(a.fingerprint(), b.fingerprint());
    }
}
