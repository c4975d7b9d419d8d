//! Phase 4: recompute loading priors from history and the pattern book, then
//! replay queued cache operations and maintain the cache.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use compass_analysis::follow_probabilities;
use compass_core::config::AdaptationConfig;
use compass_core::models::UsagePattern;
use compass_prediction::MaintenanceReport;

use crate::state::AdaptiveState;

#[derive(Debug, Clone, Default)]
pub struct RefreshStats {
    pub follow_items: usize,
    pub boosted_items: usize,
    pub ops_replayed: usize,
    pub cache: MaintenanceReport,
}

pub fn refresh(state: &mut AdaptiveState, config: &AdaptationConfig, now: DateTime<Utc>) -> RefreshStats {
    state.priors.follow_probabilities =
        follow_probabilities(state.history.interactions(), config.follow_prior_limit);
    state.priors.item_boosts = item_boosts(state.history.patterns(), config.pattern_prior_boost);

    let ops = state.history.take_pending_cache_ops();
    state.cache.apply_ops(&ops);
    let cache = state.cache.maintain(now);

    RefreshStats {
        follow_items: state.priors.follow_probabilities.len(),
        boosted_items: state.priors.item_boosts.len(),
        ops_replayed: ops.len(),
        cache,
    }
}

/// Boost per standard: `boost × score × success rate`, keeping the strongest
/// pattern that references it.
pub fn item_boosts(patterns: &[UsagePattern], boost: f64) -> BTreeMap<String, f64> {
    let mut boosts: BTreeMap<String, f64> = BTreeMap::new();
    for pattern in patterns {
        for (item, score) in pattern.standard_targets() {
            let value = boost * score.clamp(0.0, 1.0) * pattern.success_rate.value();
            let slot = boosts.entry(item.to_string()).or_insert(0.0);
            if value > *slot {
                *slot = value;
            }
        }
    }
    boosts.retain(|_, v| *v > 0.0);
    boosts
}

#[cfg(test)]
mod tests {
    use super::*;
    use compass_core::graph::Rate;
    use compass_core::models::{PatternOutcome, PatternType};

    fn pattern(id: &str, success: f64, outcomes: Vec<PatternOutcome>) -> UsagePattern {
        UsagePattern {
            pattern_id: id.into(),
            pattern_type: PatternType::Contextual,
            frequency: 5,
            success_rate: Rate::new(success),
            conditions: vec![],
            outcomes,
            last_seen: test_fixtures::base_time(),
        }
    }

    #[test]
    fn strongest_pattern_wins() {
        let patterns = vec![
            pattern("a", 0.5, vec![PatternOutcome::targeting("standard_used", "api", 1.0)]),
            pattern("b", 1.0, vec![PatternOutcome::targeting("standard_used", "api", 0.8)]),
            pattern("c", 1.0, vec![PatternOutcome::new("satisfaction", 0.9)]),
        ];
        let boosts = item_boosts(&patterns, 0.2);
        assert_eq!(boosts.len(), 1);
        assert!((boosts["api"] - 0.16).abs() < 1e-9);
    }
}
