//! Record every soft failure: component, failure, fallback used, timestamp,
//! and whether the component has since recovered.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegradationEvent {
    pub component: String,
    pub failure: String,
    pub fallback_used: String,
    pub timestamp: DateTime<Utc>,
    pub recovered_at: Option<DateTime<Utc>>,
}

impl DegradationEvent {
    pub fn is_active(&self) -> bool {
        self.recovered_at.is_none()
    }
}

/// Bounded log of degradation events, newest last.
#[derive(Debug, Clone)]
pub struct DegradationTracker {
    events: Vec<DegradationEvent>,
    capacity: usize,
}

impl Default for DegradationTracker {
    fn default() -> Self {
        Self::with_capacity(256)
    }
}

impl DegradationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Record a new degradation event.
    pub fn record(&mut self, component: &str, failure: &str, fallback: &str) {
        crate::tracing_setup::events::degradation_triggered(component, failure, fallback);
        self.events.push(DegradationEvent {
            component: component.to_string(),
            failure: failure.to_string(),
            fallback_used: fallback.to_string(),
            timestamp: Utc::now(),
            recovered_at: None,
        });
        let excess = self.events.len().saturating_sub(self.capacity);
        self.events.drain(..excess);
    }

    /// Mark every active event for a component as recovered. Returns how many
    /// were closed.
    pub fn mark_recovered(&mut self, component: &str) -> usize {
        let now = Utc::now();
        let mut closed = 0;
        for event in self
            .events
            .iter_mut()
            .filter(|e| e.component == component && e.is_active())
        {
            event.recovered_at = Some(now);
            closed += 1;
        }
        if closed > 0 {
            tracing::info!(component = %component, closed, "component recovered");
        }
        closed
    }

    pub fn events(&self) -> &[DegradationEvent] {
        &self.events
    }

    pub fn active(&self) -> Vec<&DegradationEvent> {
        self.events.iter().filter(|e| e.is_active()).collect()
    }

    pub fn is_degraded(&self, component: &str) -> bool {
        self.events
            .iter()
            .any(|e| e.component == component && e.is_active())
    }
}
