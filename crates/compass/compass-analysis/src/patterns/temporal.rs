use std::collections::BTreeMap;

use chrono::Timelike;

use compass_core::graph::Rate;
use compass_core::models::{
    Interaction, PatternCondition, PatternOutcome, PatternType, UsagePattern,
};

/// Hour-of-day buckets at or above `min_bucket`.
///
/// Each pattern records its share of the window and the fixed confidence.
pub(super) fn mine(window: &[Interaction], min_bucket: usize, confidence: f64) -> Vec<UsagePattern> {
    let mut buckets: BTreeMap<u32, Vec<&Interaction>> = BTreeMap::new();
    for interaction in window {
        buckets
            .entry(interaction.timestamp.hour())
            .or_default()
            .push(interaction);
    }

    let total = window.len() as f64;
    buckets
        .into_iter()
        .filter(|(_, members)| members.len() >= min_bucket.max(1))
        .filter_map(|(hour, members)| {
            let size = members.len();
            let successes = members.iter().filter(|i| i.success).count();
            Some(UsagePattern {
                pattern_id: UsagePattern::derive_id(PatternType::Temporal, &format!("hour:{hour}")),
                pattern_type: PatternType::Temporal,
                frequency: size as u64,
                success_rate: Rate::new(successes as f64 / size as f64),
                conditions: vec![PatternCondition::HourOfDay { hour }],
                outcomes: vec![
                    PatternOutcome::new("activity_share", size as f64 / total),
                    PatternOutcome::new("confidence", confidence),
                ],
                last_seen: members.iter().map(|i| i.timestamp).max()?,
            })
        })
        .collect()
}
