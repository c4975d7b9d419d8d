use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use compass_core::constants::SEQUENCE_LENGTH;
use compass_core::graph::Rate;
use compass_core::models::{
    Interaction, PatternCondition, PatternOutcome, PatternType, UsagePattern,
};

#[derive(Default)]
struct Tally {
    occurrences: u64,
    successful_endings: u64,
    last_seen: Option<DateTime<Utc>>,
}

/// 3-grams of interaction types in arrival order within each session.
/// Interactions without a session id form one shared session.
///
/// Success rate is the share of occurrences whose third step succeeded.
pub(super) fn mine(window: &[Interaction], min_frequency: u64) -> Vec<UsagePattern> {
    let mut sessions: BTreeMap<&str, Vec<&Interaction>> = BTreeMap::new();
    for interaction in window {
        sessions
            .entry(interaction.session_id.as_str())
            .or_default()
            .push(interaction);
    }

    let mut tallies: BTreeMap<Vec<&str>, Tally> = BTreeMap::new();
    for gram in sessions.values().flat_map(|steps| steps.windows(SEQUENCE_LENGTH)) {
        let steps: Vec<&str> = gram.iter().map(|i| i.interaction_type.as_str()).collect();
        let Some(last) = gram.last() else {
            continue;
        };
        let tally = tallies.entry(steps).or_default();
        tally.occurrences += 1;
        if last.success {
            tally.successful_endings += 1;
        }
        tally.last_seen = tally.last_seen.max(Some(last.timestamp));
    }

    tallies
        .into_iter()
        .filter(|(_, t)| t.occurrences >= min_frequency.max(1))
        .filter_map(|(steps, t)| {
            let key = steps.join(">");
            let success = t.successful_endings as f64 / t.occurrences as f64;
            let last_step = steps.last()?.to_string();
            Some(UsagePattern {
                pattern_id: UsagePattern::derive_id(PatternType::Sequential, &key),
                pattern_type: PatternType::Sequential,
                frequency: t.occurrences,
                success_rate: Rate::new(success),
                conditions: vec![PatternCondition::Sequence {
                    steps: steps.iter().map(|s| s.to_string()).collect(),
                }],
                outcomes: vec![PatternOutcome::targeting("completes_with", last_step, success)],
                last_seen: t.last_seen?,
            })
        })
        .collect()
}
