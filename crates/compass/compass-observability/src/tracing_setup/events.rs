//! Structured log events for key engine operations.
//!
//! Each function emits a `tracing` event with structured fields.

/// Log a served recommendation batch.
pub fn recommendations_served(count: usize, memoized: bool, state_version: u64) {
    tracing::info!(
        event = "recommendations_served",
        count = count,
        memoized = memoized,
        state_version = state_version,
        "recommendations served"
    );
}

/// Log feedback folded into the graph.
pub fn feedback_applied(node_id: &str, success_rate: f64, edges_adjusted: usize) {
    tracing::info!(
        event = "feedback_applied",
        node_id = %node_id,
        success_rate = success_rate,
        edges_adjusted = edges_adjusted,
        "feedback applied"
    );
}

/// Log an insight action dispatched by the adaptation loop.
pub fn insight_applied(action: &str, target: Option<&str>) {
    tracing::info!(
        event = "insight_applied",
        action = %action,
        target = ?target,
        "insight applied"
    );
}

/// Log a completed adaptation cycle.
pub fn cycle_completed(cycle: u64, patterns: usize, insights: usize, persisted: bool) {
    tracing::info!(
        event = "cycle_completed",
        cycle = cycle,
        patterns = patterns,
        insights = insights,
        persisted = persisted,
        "adaptation cycle completed"
    );
}

/// Log a loading plan that could not meet its constraints.
pub fn constraints_unsatisfied(estimated_tokens: usize, max_tokens: usize, estimated_time_ms: f64) {
    tracing::warn!(
        event = "constraints_unsatisfied",
        estimated_tokens = estimated_tokens,
        max_tokens = max_tokens,
        estimated_time_ms = estimated_time_ms,
        "loading plan exceeds constraints"
    );
}

/// Log a degradation trigger event.
pub fn degradation_triggered(component: &str, failure: &str, fallback: &str) {
    tracing::warn!(
        event = "degradation_triggered",
        component = %component,
        failure = %failure,
        fallback = %fallback,
        "degradation triggered"
    );
}
