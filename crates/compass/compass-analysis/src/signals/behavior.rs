use std::collections::BTreeMap;

use compass_core::config::AnalysisConfig;
use compass_core::graph::Rate;
use compass_core::models::{
    ExperienceLevel, Impact, Insight, InsightType, Interaction, RecommendedAction,
};
use compass_core::traits::{AnalysisInput, ISignalAnalyzer};

use super::mean;
use crate::actions;

const LOW_SATISFACTION_CONFIDENCE: f64 = 0.8;
const LOW_COMPLETION_CONFIDENCE: f64 = 0.7;

/// Per-cohort satisfaction and completion checks.
///
/// Experience-level groups with low mean satisfaction produce a high-impact
/// insight; task-type groups with a low success ratio produce a
/// medium-impact one. Task groups smaller than `behavior_min_group` are
/// skipped; level groups only need one rated interaction.
pub struct BehaviorAnalyzer {
    config: AnalysisConfig,
}

impl BehaviorAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    fn by_level(&self, interactions: &[Interaction]) -> Vec<Insight> {
        let mut groups: BTreeMap<ExperienceLevel, Vec<&Interaction>> = BTreeMap::new();
        for i in interactions {
            groups.entry(i.experience_level).or_default().push(i);
        }

        groups
            .into_iter()
            .filter_map(|(level, members)| {
                let satisfaction =
                    mean(members.iter().filter_map(|i| i.satisfaction.map(Rate::value)))?;
                (satisfaction < self.config.low_satisfaction_threshold).then(|| {
                    Insight::new(
                        InsightType::UserBehavior,
                        format!(
                            "{level} users report low satisfaction ({satisfaction:.2})"
                        ),
                        LOW_SATISFACTION_CONFIDENCE,
                        Impact::High,
                    )
                    .with_action(RecommendedAction::targeting(
                        actions::SIMPLIFY_FOR_LEVEL,
                        level.as_str(),
                    ))
                    .with_data("group_size", members.len() as f64)
                    .with_data("mean_satisfaction", satisfaction)
                })
            })
            .collect()
    }

    fn by_task(&self, interactions: &[Interaction]) -> Vec<Insight> {
        let mut groups: BTreeMap<&str, Vec<&Interaction>> = BTreeMap::new();
        for i in interactions {
            if let Some(task) = i.task_type.as_deref().filter(|t| !t.is_empty()) {
                groups.entry(task).or_default().push(i);
            }
        }

        groups
            .into_iter()
            .filter(|(_, members)| members.len() >= self.config.behavior_min_group.max(1))
            .filter_map(|(task, members)| {
                let completion =
                    members.iter().filter(|i| i.success).count() as f64 / members.len() as f64;
                (completion < self.config.low_completion_threshold).then(|| {
                    Insight::new(
                        InsightType::UserBehavior,
                        format!("'{task}' tasks complete only {:.0}% of the time", completion * 100.0),
                        LOW_COMPLETION_CONFIDENCE,
                        Impact::Medium,
                    )
                    .with_action(RecommendedAction::targeting(
                        actions::DEMOTE_TASK_STANDARDS,
                        task,
                    ))
                    .with_data("group_size", members.len() as f64)
                    .with_data("completion_rate", completion)
                })
            })
            .collect()
    }
}

impl ISignalAnalyzer for BehaviorAnalyzer {
    fn name(&self) -> &'static str {
        "behavior"
    }

    fn analyze(&self, input: &AnalysisInput<'_>) -> Vec<Insight> {
        let mut insights = self.by_level(input.interactions);
        insights.extend(self.by_task(input.interactions));
        insights
    }
}
