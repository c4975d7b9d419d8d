//! AdaptationEngine: owns the miner, analyzers, and action registry, with an
//! `AtomicBool` guard so only one cycle runs at a time.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};

use compass_analysis::{PatternMiner, SignalAnalyzers};
use compass_core::config::CompassConfig;
use compass_core::errors::{CompassError, CompassResult};
use compass_core::traits::IStateStore;

use crate::actions::ActionRegistry;
use crate::pipeline::{self, CycleInputs};
use crate::report::CycleReport;
use crate::scheduling::{evaluate_triggers, TriggerReason, TriggerSignals};
use crate::state::AdaptiveState;

pub struct AdaptationEngine {
    config: CompassConfig,
    miner: PatternMiner,
    analyzers: SignalAnalyzers,
    registry: ActionRegistry,
    is_running: AtomicBool,
}

impl AdaptationEngine {
    pub fn new(config: CompassConfig) -> Self {
        let miner = PatternMiner::new(config.mining.clone(), config.graph.pattern_usage_share);
        let analyzers = SignalAnalyzers::standard(&config.analysis);
        Self {
            config,
            miner,
            analyzers,
            registry: ActionRegistry::standard(),
            is_running: AtomicBool::new(false),
        }
    }

    /// Replace the action registry.
    pub fn with_registry(mut self, registry: ActionRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Replace the analyzer set.
    pub fn with_analyzers(mut self, analyzers: SignalAnalyzers) -> Self {
        self.analyzers = analyzers;
        self
    }

    pub fn config(&self) -> &CompassConfig {
        &self.config
    }

    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    pub fn is_running(&self) -> bool {
        self.is_running.load(Ordering::Relaxed)
    }

    /// Which triggers are active for `state` at `now`. `queued_feedback`
    /// counts records not yet drained into the history.
    pub fn due(
        &self,
        state: &AdaptiveState,
        queued_feedback: usize,
        now: DateTime<Utc>,
    ) -> Vec<TriggerReason> {
        evaluate_triggers(
            &TriggerSignals {
                pending_feedback: state.history.unapplied_feedback().len() + queued_feedback,
                last_cycle: state.last_cycle,
                now,
            },
            &self.config.adaptation,
        )
    }

    /// Run one cycle over `state`. Fails only when another cycle is already
    /// running on this engine.
    pub fn run_cycle(
        &self,
        state: &mut AdaptiveState,
        store: &dyn IStateStore,
        now: DateTime<Utc>,
    ) -> CompassResult<CycleReport> {
        let Some(_running) = RunningGuard::acquire(&self.is_running) else {
            return Err(CompassError::InvalidInput {
                reason: "adaptation cycle already in progress".to_string(),
            });
        };

        let _span = compass_observability::adaptation_span!(state.cycles + 1).entered();
        let report = pipeline::run_cycle(
            state,
            &CycleInputs {
                config: &self.config,
                miner: &self.miner,
                analyzers: &self.analyzers,
                registry: &self.registry,
                store,
                now,
            },
        );
        Ok(report)
    }
}

/// Holds the running flag for one cycle and clears it on drop, including
/// when the pipeline unwinds.
struct RunningGuard<'a>(&'a AtomicBool);

impl<'a> RunningGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use std::panic::{catch_unwind, AssertUnwindSafe};

    use compass_analysis::actions as names;
    use compass_core::models::ExperienceLevel;
    use compass_storage::MemoryStore;

    use super::*;

    #[test]
    fn guard_is_exclusive_and_released_on_drop() {
        let flag = AtomicBool::new(false);
        let held = RunningGuard::acquire(&flag);
        assert!(held.is_some());
        assert!(RunningGuard::acquire(&flag).is_none());
        drop(held);
        assert!(!flag.load(Ordering::SeqCst));
    }

    #[test]
    fn panicking_handler_does_not_wedge_the_engine() {
        let config = CompassConfig::default();
        let registry = ActionRegistry::new().with(names::SIMPLIFY_FOR_LEVEL, |_, _| {
            panic!("handler blew up")
        });
        let engine = AdaptationEngine::new(config.clone()).with_registry(registry);
        let store = MemoryStore::new();

        let mut state = AdaptiveState::empty(&config);
        for interaction in test_fixtures::cohort(6, "web", ExperienceLevel::Beginner, 0.3, true) {
            state.history.append_interaction(interaction);
        }
        let now = test_fixtures::base_time();
        let unwound = catch_unwind(AssertUnwindSafe(|| engine.run_cycle(&mut state, &store, now)));
        assert!(unwound.is_err());
        assert!(!engine.is_running());

        let mut fresh = AdaptiveState::empty(&config);
        assert!(engine.run_cycle(&mut fresh, &store, now).is_ok());
    }
}
