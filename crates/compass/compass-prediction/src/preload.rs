//! Preload candidate selection.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use compass_core::config::{CacheConfig, LoadingConfig};
use compass_core::constants::BYTES_PER_TOKEN;
use compass_core::graph::Relationship;
use compass_core::models::{LoadingPriors, PerformanceConstraints, PreloadCandidate};
use compass_graph::EntityStore;

use crate::cache::SmartCache;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Inputs to [`select_preload`] borrowed from one state snapshot.
pub struct PreloadInputs<'a> {
    pub store: &'a EntityStore,
    pub priors: &'a LoadingPriors,
    pub cache: &'a SmartCache,
    pub cache_config: &'a CacheConfig,
    pub loading_config: &'a LoadingConfig,
}

/// Items likely to be requested after `requested`.
///
/// A candidate's probability is the highest of its follow probability from
/// any requested item and the strength of a `requires` edge from one. Only
/// candidates above the threshold that are neither requested nor cached are
/// considered; they are taken in probability order while the cumulative size
/// stays within the memory share and the cumulative time within the time
/// share of the constraints.
pub fn select_preload(
    inputs: &PreloadInputs<'_>,
    requested: &[String],
    constraints: &PerformanceConstraints,
    now: DateTime<Utc>,
) -> Vec<PreloadCandidate> {
    let mut probabilities: BTreeMap<&str, f64> = BTreeMap::new();
    for item in requested {
        if let Some(follows) = inputs.priors.follow_probabilities.get(item) {
            for (next, &p) in follows {
                consider(&mut probabilities, next, p);
            }
        }
        for edge in inputs.store.outgoing(item) {
            if edge.relationship == Relationship::Requires {
                if let Some(node) = inputs.store.node(&edge.to) {
                    consider(&mut probabilities, &node.id, edge.strength.value());
                }
            }
        }
    }

    let mut ranked: Vec<(&str, f64)> = probabilities
        .into_iter()
        .filter(|(item, p)| {
            *p > inputs.cache_config.preload_probability
                && !requested.iter().any(|r| r == item)
                && !inputs.cache.is_cached(item, now)
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(b.0))
    });

    let item_bytes = (inputs.loading_config.chunk_size as u64).saturating_mul(BYTES_PER_TOKEN);
    let item_ms = inputs.loading_config.per_item_ms;
    let byte_budget = constraints.memory_limit_mb.max(0.0) * BYTES_PER_MB * inputs.cache_config.preload_memory_share;
    let time_budget = constraints.max_load_time_ms as f64 * inputs.cache_config.preload_time_share;
    let cap = inputs
        .priors
        .preload_limit
        .unwrap_or(inputs.cache_config.max_preload_candidates);

    let mut selected = Vec::new();
    let (mut bytes, mut time) = (0.0, 0.0);
    for (item, probability) in ranked {
        if selected.len() >= cap {
            break;
        }
        let next_bytes = bytes + item_bytes as f64;
        let next_time = time + item_ms;
        if next_bytes > byte_budget || next_time > time_budget {
            break;
        }
        bytes = next_bytes;
        time = next_time;
        selected.push(PreloadCandidate {
            item: item.to_string(),
            probability,
            estimated_bytes: item_bytes,
        });
    }
    selected
}

/// Keep the highest probability seen for `item`.
fn consider<'a>(probabilities: &mut BTreeMap<&'a str, f64>, item: &'a str, p: f64) {
    let slot = probabilities.entry(item).or_insert(0.0);
    *slot = slot.max(p.clamp(0.0, 1.0));
}
