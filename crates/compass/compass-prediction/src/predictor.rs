//! Initial loading strategy from requested items, context, and priors.

use std::cmp::Ordering;

use compass_core::config::LoadingConfig;
use compass_core::constants::{MAX_COMPRESSION_LEVEL, MAX_PRIORITY};
use compass_core::models::{LoadingContext, LoadingPriors, LoadingStrategy};
use compass_graph::EntityStore;

/// Priority of items the graph does not know.
const UNKNOWN_ITEM_PRIORITY: f64 = 0.5;

pub struct LoadingPredictor<'a> {
    store: &'a EntityStore,
    config: &'a LoadingConfig,
    priors: &'a LoadingPriors,
}

impl<'a> LoadingPredictor<'a> {
    pub fn new(store: &'a EntityStore, config: &'a LoadingConfig, priors: &'a LoadingPriors) -> Self {
        Self {
            store,
            config,
            priors,
        }
    }

    /// Node priority scaled to [0, 1], plus the phase and task-domain table
    /// weights of the item's tags, plus any pattern boost.
    pub fn item_priority(&self, item: &str, context: &LoadingContext) -> f64 {
        let mut priority = UNKNOWN_ITEM_PRIORITY;
        if let Some(node) = self.store.node(item) {
            priority = f64::from(node.priority) / f64::from(MAX_PRIORITY);

            let phase_table = context
                .project
                .phase
                .and_then(|p| self.config.phase_weights.get(p.as_str()));
            let domain_table = context
                .project
                .task_domain
                .as_deref()
                .and_then(|d| self.config.domain_weights.get(d));
            for table in [phase_table, domain_table].into_iter().flatten() {
                priority += node
                    .tags
                    .iter()
                    .filter_map(|tag| table.get(tag))
                    .sum::<f64>();
            }
        }
        priority + self.priors.item_boosts.get(item).copied().unwrap_or(0.0)
    }

    /// Item cap: the configured maximum, tightened by any per-level prior.
    pub fn item_limit(&self, context: &LoadingContext) -> usize {
        let configured = self.config.max_priority_items;
        self.priors
            .level_item_limits
            .get(&context.user_profile.experience_level)
            .map_or(configured, |&limit| configured.min(limit))
    }

    pub fn predict(
        &self,
        requested: &[String],
        context: &LoadingContext,
        preload_candidates: Vec<String>,
    ) -> LoadingStrategy {
        let mut items: Vec<(String, f64)> = Vec::with_capacity(requested.len());
        for raw in requested {
            let item = raw.trim();
            if item.is_empty() || items.iter().any(|(seen, _)| seen == item) {
                continue;
            }
            items.push((item.to_string(), self.item_priority(item, context)));
        }
        items.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        items.truncate(self.item_limit(context));

        let compression = context
            .preferences
            .compression_level
            .unwrap_or(self.config.compression_level)
            .max(self.priors.compression_floor)
            .min(MAX_COMPRESSION_LEVEL);

        LoadingStrategy {
            priority_items: items.into_iter().map(|(id, _)| id).collect(),
            chunk_size: self.config.chunk_size.max(1),
            parallelism: self
                .config
                .parallelism
                .min(context.constraints.concurrent_limit)
                .max(1),
            compression_level: compression,
            cache_duration_secs: context
                .preferences
                .cache_duration_secs
                .unwrap_or(self.config.cache_duration_secs),
            preload_candidates,
            applied_adjustments: Default::default(),
        }
    }
}
