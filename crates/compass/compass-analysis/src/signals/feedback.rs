use std::collections::BTreeMap;

use compass_core::config::AnalysisConfig;
use compass_core::models::{Impact, Insight, InsightType, RecommendedAction, Sentiment};
use compass_core::traits::{AnalysisInput, ISignalAnalyzer};

use crate::actions;

const NEGATIVE_SENTIMENT_CONFIDENCE: f64 = 0.8;

/// Negative-ratio check over the most recent feedback.
///
/// Targets with more negative than positive records in the window are named
/// in the insight's actions.
pub struct FeedbackAnalyzer {
    config: AnalysisConfig,
}

impl FeedbackAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }
}

impl ISignalAnalyzer for FeedbackAnalyzer {
    fn name(&self) -> &'static str {
        "feedback"
    }

    fn analyze(&self, input: &AnalysisInput<'_>) -> Vec<Insight> {
        let feedback = input.feedback;
        let start = feedback.len().saturating_sub(self.config.feedback_window);
        let window = &feedback[start..];
        if window.is_empty() || window.len() < self.config.feedback_min_samples {
            return Vec::new();
        }

        let negative = window
            .iter()
            .filter(|f| f.sentiment == Sentiment::Negative)
            .count();
        let ratio = negative as f64 / window.len() as f64;
        if ratio <= self.config.negative_ratio_threshold {
            return Vec::new();
        }

        // target -> (negative, positive)
        let mut per_target: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
        for record in window {
            let Some(target) = record.target.as_deref() else {
                continue;
            };
            let entry = per_target.entry(target).or_default();
            match record.sentiment {
                Sentiment::Negative => entry.0 += 1,
                Sentiment::Positive => entry.1 += 1,
                Sentiment::Neutral => {}
            }
        }

        let mut insight = Insight::new(
            InsightType::FeedbackSentiment,
            format!(
                "{negative} of the last {} feedback records are negative",
                window.len()
            ),
            NEGATIVE_SENTIMENT_CONFIDENCE,
            Impact::High,
        )
        .with_data("negative_ratio", ratio)
        .with_data("samples", window.len() as f64);

        for (target, (neg, pos)) in per_target {
            if neg > pos {
                insight = insight.with_action(RecommendedAction::targeting(
                    actions::DEMOTE_NEGATIVE_FEEDBACK_TARGETS,
                    target,
                ));
            }
        }
        vec![insight]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compass_core::models::FeedbackRecord;

    fn analyze(feedback: &[FeedbackRecord]) -> Vec<Insight> {
        FeedbackAnalyzer::new(AnalysisConfig::default()).analyze(&AnalysisInput {
            feedback,
            ..Default::default()
        })
    }

    #[test]
    fn mostly_negative_feedback_is_high_impact() {
        let records = test_fixtures::feedback_mix(Some("auth"), 3, 4);
        let insights = analyze(&records);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].impact_potential, Impact::High);
        assert_eq!(
            insights[0].recommended_actions,
            vec![RecommendedAction::targeting(
                actions::DEMOTE_NEGATIVE_FEEDBACK_TARGETS,
                "auth"
            )]
        );
    }

    #[test]
    fn ratio_at_threshold_is_not_flagged() {
        let records = test_fixtures::feedback_mix(None, 7, 3);
        assert!(analyze(&records).is_empty());
    }

    #[test]
    fn too_few_samples_is_silent() {
        let records = test_fixtures::feedback_mix(None, 0, 4);
        assert!(analyze(&records).is_empty());
    }

    #[test]
    fn only_the_recent_window_counts() {
        let mut records = test_fixtures::feedback_mix(None, 0, 50);
        records.extend(test_fixtures::feedback_mix(None, 100, 0));
        assert!(analyze(&records).is_empty());
    }
}
