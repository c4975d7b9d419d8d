use chrono::{DateTime, Utc};

use compass_core::config::{CacheConfig, LoadingConfig};
use compass_core::models::{LoadingContext, LoadingOptimization, LoadingPriors};
use compass_graph::EntityStore;

use crate::cache::SmartCache;
use crate::optimizer::LoadingOptimizer;
use crate::predictor::LoadingPredictor;
use crate::preload::{select_preload, PreloadInputs};

/// Predict, pick preloads, then optimize, all against one snapshot.
pub struct LoadingPlanner<'a> {
    pub store: &'a EntityStore,
    pub loading_config: &'a LoadingConfig,
    pub cache_config: &'a CacheConfig,
    pub priors: &'a LoadingPriors,
    pub cache: &'a SmartCache,
}

impl LoadingPlanner<'_> {
    pub fn plan(
        &self,
        requested: &[String],
        context: &LoadingContext,
        now: DateTime<Utc>,
    ) -> LoadingOptimization {
        let ctx = context.normalized();
        let predictor = LoadingPredictor::new(self.store, self.loading_config, self.priors);
        let mut strategy = predictor.predict(requested, &ctx, Vec::new());

        let mut preload = if ctx.preferences.enable_preload {
            let inputs = PreloadInputs {
                store: self.store,
                priors: self.priors,
                cache: self.cache,
                cache_config: self.cache_config,
                loading_config: self.loading_config,
            };
            select_preload(&inputs, &strategy.priority_items, &ctx.constraints, now)
        } else {
            Vec::new()
        };
        strategy.preload_candidates = preload.iter().map(|c| c.item.clone()).collect();

        let utilization = self.cache.analyze_utilization(&strategy.priority_items, now);
        let optimizer = LoadingOptimizer::new(self.loading_config.clone());
        let (strategy, adjustments) =
            optimizer.optimize_for_constraints(&strategy, &ctx.constraints, utilization);
        preload.retain(|c| strategy.preload_candidates.contains(&c.item));

        let cache_utilization = self.cache.analyze_utilization(&strategy.priority_items, now);
        let estimated_time_ms = optimizer.estimate_time(&strategy, cache_utilization);
        let constraints_satisfied = optimizer.satisfies(&strategy, &ctx.constraints, cache_utilization);
        if !constraints_satisfied {
            tracing::debug!(
                items = strategy.priority_items.len(),
                estimated_time_ms,
                "loading plan still exceeds constraints after optimization"
            );
        }

        LoadingOptimization {
            estimated_tokens: strategy.estimated_tokens(),
            estimated_time_ms,
            cache_utilization,
            constraints_satisfied,
            adjustments,
            preload,
            strategy,
        }
    }
}
