//! Cycle triggers: scheduled interval and queued feedback pressure.

use chrono::{DateTime, Duration, Utc};

use compass_core::config::AdaptationConfig;

/// Reasons why a cycle should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerReason {
    /// Queued feedback reached the configured trigger.
    FeedbackPressure,
    /// The cycle interval elapsed, or no cycle has run yet.
    Scheduled,
}

/// Input signals for trigger evaluation.
#[derive(Debug, Clone, Copy)]
pub struct TriggerSignals {
    pub pending_feedback: usize,
    pub last_cycle: Option<DateTime<Utc>>,
    pub now: DateTime<Utc>,
}

/// Returns the active trigger reasons (empty = no cycle due).
pub fn evaluate_triggers(signals: &TriggerSignals, config: &AdaptationConfig) -> Vec<TriggerReason> {
    let mut reasons = Vec::new();

    if config.feedback_trigger > 0 && signals.pending_feedback >= config.feedback_trigger {
        reasons.push(TriggerReason::FeedbackPressure);
    }

    let interval = i64::try_from(config.cycle_interval_secs)
        .ok()
        .and_then(Duration::try_seconds)
        .unwrap_or(Duration::MAX);
    match signals.last_cycle {
        Some(last) if signals.now - last < interval => {}
        _ => reasons.push(TriggerReason::Scheduled),
    }

    reasons
}
