//! Phase 3: fold queued feedback into the graph, then dispatch the actions of
//! insights at or above the configured impact.

use compass_core::config::CompassConfig;
use compass_core::models::Insight;
use compass_graph::{learn_from_feedback, FeedbackOutcome};

use crate::actions::{ActionContext, ActionRegistry};
use crate::state::AdaptiveState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedbackStats {
    pub applied: usize,
    pub skipped: usize,
}

/// Apply every feedback record past the cursor, oldest first, then advance
/// the cursor. Neutral, untargeted, and unknown-target records are skipped.
pub fn apply_feedback(state: &mut AdaptiveState, delta: f64) -> FeedbackStats {
    let pending: Vec<_> = state.history.unapplied_feedback().to_vec();
    let mut stats = FeedbackStats::default();
    let mut last = None;
    for record in &pending {
        last = Some(record.sequence);
        let target = record.target.as_deref();
        let outcome = FeedbackOutcome::from_sentiment(record.sentiment);
        match (target, outcome) {
            (Some(id), Some(outcome)) => {
                match learn_from_feedback(&mut state.graph, id, outcome, delta) {
                    Some(result) => {
                        compass_observability::tracing_setup::events::feedback_applied(
                            &result.node_id,
                            result.success_rate.value(),
                            result.edges_adjusted,
                        );
                        stats.applied += 1;
                    }
                    None => stats.skipped += 1,
                }
            }
            _ => stats.skipped += 1,
        }
    }
    if let Some(sequence) = last {
        state.history.mark_feedback_applied(sequence);
    }
    stats
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InsightStats {
    pub insights: usize,
    /// Qualifying insights skipped because nothing new arrived in their
    /// evidence stream since they were last acted on.
    pub unchanged: usize,
    pub actions: usize,
    pub failures: Vec<String>,
}

/// Dispatch the actions of every insight at or above the configured impact
/// whose evidence advanced since it was last acted on, then record its mark.
pub fn apply_insights(
    state: &mut AdaptiveState,
    insights: &[Insight],
    registry: &ActionRegistry,
    config: &CompassConfig,
) -> InsightStats {
    let mut stats = InsightStats::default();
    let mut fresh = Vec::new();
    for insight in insights
        .iter()
        .filter(|i| i.impact_potential >= config.adaptation.min_apply_impact)
    {
        if state.history.is_insight_applied(insight) {
            tracing::debug!(insight = %insight.fingerprint(), "no new evidence, insight skipped");
            stats.unchanged += 1;
        } else {
            fresh.push(insight);
        }
    }

    let mut ctx = ActionContext {
        graph: &mut state.graph,
        priors: &mut state.priors,
        cache: &mut state.cache,
        interactions: state.history.interactions(),
        config,
    };
    for insight in &fresh {
        stats.insights += 1;
        for action in &insight.recommended_actions {
            match registry.dispatch(&mut ctx, action) {
                Ok(changes) => {
                    compass_observability::tracing_setup::events::insight_applied(
                        &action.action,
                        action.target.as_deref(),
                    );
                    tracing::debug!(action = %action.action, changes, "action applied");
                    stats.actions += 1;
                }
                Err(e) => {
                    tracing::warn!(action = %action.action, error = %e, "action failed");
                    stats.failures.push(format!("{}: {e}", action.action));
                }
            }
        }
    }
    for insight in fresh {
        state.history.mark_insight_applied(insight);
    }
    stats
}
