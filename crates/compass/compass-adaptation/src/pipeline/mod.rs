//! 5-phase adaptation pipeline.
//!
//! Phase 1: Analysis → Phase 2: Patterns → Phase 3: Apply →
//! Phase 4: Priors & cache → Phase 5: Persist

pub mod phase1_analysis;
pub mod phase2_patterns;
pub mod phase3_apply;
pub mod phase4_priors;
pub mod phase5_persist;

use chrono::{DateTime, Utc};
use tracing::info;

use compass_analysis::{PatternMiner, SignalAnalyzers};
use compass_core::config::CompassConfig;
use compass_core::traits::IStateStore;

use crate::actions::ActionRegistry;
use crate::report::CycleReport;
use crate::state::AdaptiveState;

/// Everything a cycle needs besides the state it mutates.
pub struct CycleInputs<'a> {
    pub config: &'a CompassConfig,
    pub miner: &'a PatternMiner,
    pub analyzers: &'a SignalAnalyzers,
    pub registry: &'a ActionRegistry,
    pub store: &'a dyn IStateStore,
    pub now: DateTime<Utc>,
}

/// Run one full cycle over `state`. Persistence failures are recorded in the
/// report; the in-memory result is still valid.
pub fn run_cycle(state: &mut AdaptiveState, inputs: &CycleInputs<'_>) -> CycleReport {
    state.cycles += 1;
    let mut report = CycleReport {
        cycle: state.cycles,
        started_at: Some(inputs.now),
        ..Default::default()
    };

    // Phase 1: Analysis.
    let analysis = phase1_analysis::analyze(&state.history, inputs.miner, inputs.analyzers);
    report.interactions_scanned = analysis.scanned;
    report.patterns_mined = analysis.patterns.len();
    info!(
        patterns = analysis.patterns.len(),
        insights = analysis.insights.len(),
        "Phase 1: analysis complete"
    );

    // Phase 2: Patterns.
    let folded = phase2_patterns::merge_and_fold(state, analysis.patterns);
    report.patterns_inserted = folded.merge.inserted;
    report.patterns_replaced = folded.merge.replaced;
    report.pattern_nodes = folded.pattern_nodes;
    report.supports_edges = folded.supports_edges;
    info!(
        inserted = folded.merge.inserted,
        replaced = folded.merge.replaced,
        supports = folded.supports_edges,
        "Phase 2: patterns folded into graph"
    );

    // Phase 3: Apply feedback, then insights.
    let feedback = phase3_apply::apply_feedback(state, inputs.config.graph.feedback_delta);
    report.feedback_applied = feedback.applied;
    report.feedback_skipped = feedback.skipped;
    let applied = phase3_apply::apply_insights(
        state,
        &analysis.insights,
        inputs.registry,
        inputs.config,
    );
    report.insights_applied = applied.insights;
    report.insights_unchanged = applied.unchanged;
    report.actions_applied = applied.actions;
    report.action_failures = applied.failures;
    info!(
        feedback = report.feedback_applied,
        insights = report.insights_applied,
        unchanged = report.insights_unchanged,
        actions = report.actions_applied,
        "Phase 3: feedback and insights applied"
    );
    state.insights = analysis.insights;
    report.insights = state.insights.clone();

    // Phase 4: Priors and cache maintenance.
    let maintained = phase4_priors::refresh(state, &inputs.config.adaptation, inputs.now);
    report.follow_items = maintained.follow_items;
    report.boosted_items = maintained.boosted_items;
    report.cache_ops_replayed = maintained.ops_replayed;
    report.cache_promoted = maintained.cache.promoted;
    report.cache_demoted = maintained.cache.demoted;
    report.cache_expired = maintained.cache.expired;
    report.cache_evicted = maintained.cache.evicted;
    info!(
        follow_items = report.follow_items,
        replayed = report.cache_ops_replayed,
        evicted = report.cache_evicted,
        "Phase 4: priors and cache refreshed"
    );

    state.last_cycle = Some(inputs.now);
    state.bump();

    // Phase 5: Persist.
    match phase5_persist::persist(state, inputs.store, inputs.now) {
        Ok(()) => report.persisted = true,
        Err(e) => {
            tracing::warn!(error = %e, "Phase 5: persistence failed, retrying next cycle");
            report.persistence_error = Some(e.to_string());
        }
    }

    compass_observability::tracing_setup::events::cycle_completed(
        report.cycle,
        report.patterns_mined,
        report.insights.len(),
        report.persisted,
    );
    report
}
