use std::collections::BTreeMap;

use compass_core::graph::Rate;
use compass_core::models::{
    ExperienceLevel, Interaction, PatternCondition, PatternOutcome, PatternType, UsagePattern,
};

const UNKNOWN_PROJECT: &str = "unknown";

/// Group by (project type, experience level). Groups at or above
/// `min_group` become patterns carrying the mean satisfaction and every
/// standard used by at least `usage_share` of the group.
pub(super) fn mine(window: &[Interaction], min_group: usize, usage_share: f64) -> Vec<UsagePattern> {
    let mut groups: BTreeMap<(String, ExperienceLevel), Vec<&Interaction>> = BTreeMap::new();
    for interaction in window {
        let project = interaction
            .project_type
            .as_deref()
            .map(|p| p.trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| UNKNOWN_PROJECT.to_string());
        groups
            .entry((project, interaction.experience_level))
            .or_default()
            .push(interaction);
    }

    groups
        .into_iter()
        .filter(|(_, members)| members.len() >= min_group.max(1))
        .filter_map(|((project, level), members)| {
            let size = members.len();
            let successes = members.iter().filter(|i| i.success).count();
            let last_seen = members.iter().map(|i| i.timestamp).max()?;

            let mut outcomes = Vec::new();
            let rated: Vec<f64> = members
                .iter()
                .filter_map(|i| i.satisfaction.map(Rate::value))
                .collect();
            if !rated.is_empty() {
                let mean = rated.iter().sum::<f64>() / rated.len() as f64;
                outcomes.push(PatternOutcome::new("satisfaction", mean));
            }

            let mut usage: BTreeMap<&str, usize> = BTreeMap::new();
            for member in &members {
                let mut seen: Vec<&str> = member.standards.iter().map(String::as_str).collect();
                seen.sort_unstable();
                seen.dedup();
                for standard in seen {
                    *usage.entry(standard).or_default() += 1;
                }
            }
            for (standard, count) in usage {
                let share = count as f64 / size as f64;
                if share >= usage_share {
                    outcomes.push(PatternOutcome::targeting("standard_used", standard, share));
                }
            }

            let key = format!("{project}|{level}");
            Some(UsagePattern {
                pattern_id: UsagePattern::derive_id(PatternType::Contextual, &key),
                pattern_type: PatternType::Contextual,
                frequency: size as u64,
                success_rate: Rate::new(successes as f64 / size as f64),
                conditions: vec![
                    PatternCondition::ProjectType { value: project },
                    PatternCondition::ExperienceLevel { value: level },
                ],
                outcomes,
                last_seen,
            })
        })
        .collect()
}
