//! Constraint optimizer for loading strategies.
//!
//! Branches run in order (token budget, load time, low bandwidth) and each is
//! recorded in `applied_adjustments`, so optimizing an optimized strategy
//! returns it unchanged.

use compass_core::config::LoadingConfig;
use compass_core::constants::MAX_COMPRESSION_LEVEL;
use compass_core::models::{Adjustment, Bandwidth, LoadingStrategy, PerformanceConstraints};

#[derive(Debug, Clone)]
pub struct LoadingOptimizer {
    config: LoadingConfig,
}

impl LoadingOptimizer {
    pub fn new(config: LoadingConfig) -> Self {
        Self { config }
    }

    /// Estimated load time in milliseconds.
    pub fn estimate_time(&self, strategy: &LoadingStrategy, utilization: f64) -> f64 {
        let items = strategy.priority_items.len() as f64;
        let parallelism = strategy.parallelism.max(1) as f64;
        let utilization = utilization.clamp(0.0, 1.0);
        items * self.config.per_item_ms * (1.0 - self.config.cache_time_bonus * utilization)
            / (1.0 + parallelism.ln())
            * (1.0 + self.config.compression_time_penalty * f64::from(strategy.compression_level))
    }

    /// Adjust `strategy` to fit `constraints`. Returns the adjusted strategy
    /// and the branches applied by this call.
    pub fn optimize_for_constraints(
        &self,
        strategy: &LoadingStrategy,
        constraints: &PerformanceConstraints,
        utilization: f64,
    ) -> (LoadingStrategy, Vec<Adjustment>) {
        let mut out = strategy.clone();
        let mut applied = Vec::new();

        if !out.applied_adjustments.contains(&Adjustment::TokenBudget)
            && out.estimated_tokens() > constraints.max_tokens
        {
            let chunk = (out.chunk_size as f64 * self.config.token_chunk_shrink).round() as usize;
            out.chunk_size = chunk.max(1);
            let keep = (out.priority_items.len() as f64 * self.config.token_item_trim).round() as usize;
            out.priority_items.truncate(keep.max(1));
            self.mark(&mut out, &mut applied, Adjustment::TokenBudget);
        }

        if !out.applied_adjustments.contains(&Adjustment::LoadTime)
            && self.estimate_time(&out, utilization) > constraints.max_load_time_ms as f64
        {
            out.parallelism = (out.parallelism.max(1) * 2).min(constraints.concurrent_limit.max(1));
            out.compression_level = MAX_COMPRESSION_LEVEL;
            self.mark(&mut out, &mut applied, Adjustment::LoadTime);
        }

        if !out.applied_adjustments.contains(&Adjustment::LowBandwidth)
            && constraints.bandwidth == Bandwidth::Low
        {
            out.compression_level = MAX_COMPRESSION_LEVEL;
            out.cache_duration_secs = out.cache_duration_secs.saturating_mul(2);
            out.preload_candidates
                .truncate(self.config.low_bandwidth_preload_cap);
            self.mark(&mut out, &mut applied, Adjustment::LowBandwidth);
        }

        if !applied.is_empty() {
            tracing::debug!(adjustments = ?applied, "loading strategy adjusted");
        }
        (out, applied)
    }

    fn mark(&self, strategy: &mut LoadingStrategy, applied: &mut Vec<Adjustment>, adj: Adjustment) {
        strategy.applied_adjustments.insert(adj);
        applied.push(adj);
    }

    /// Whether the strategy fits the token and time budgets.
    pub fn satisfies(
        &self,
        strategy: &LoadingStrategy,
        constraints: &PerformanceConstraints,
        utilization: f64,
    ) -> bool {
        strategy.estimated_tokens() <= constraints.max_tokens
            && self.estimate_time(strategy, utilization) <= constraints.max_load_time_ms as f64
    }
}
