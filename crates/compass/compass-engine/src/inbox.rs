//! Ingested events waiting for the next adaptation cycle.

use compass_core::models::{CacheOp, FeedbackRecord, Interaction, PerformanceMetric};
use compass_storage::{HistoryLimits, HistoryLog};

#[derive(Debug, Default)]
pub(crate) struct Inbox {
    interactions: Vec<Interaction>,
    feedback: Vec<FeedbackRecord>,
    metrics: Vec<PerformanceMetric>,
    cache_ops: Vec<CacheOp>,
    dropped: usize,
}

fn push_bounded<T>(buffer: &mut Vec<T>, item: T, limit: usize) -> usize {
    buffer.push(item);
    let excess = buffer.len().saturating_sub(limit.max(1));
    buffer.drain(..excess);
    excess
}

impl Inbox {
    pub(crate) fn push_interaction(&mut self, interaction: Interaction, limits: &HistoryLimits) {
        self.dropped += push_bounded(&mut self.interactions, interaction, limits.interactions);
    }

    pub(crate) fn push_feedback(&mut self, record: FeedbackRecord, limits: &HistoryLimits) {
        self.dropped += push_bounded(&mut self.feedback, record, limits.feedback);
    }

    pub(crate) fn push_metric(&mut self, metric: PerformanceMetric, limits: &HistoryLimits) {
        self.dropped += push_bounded(&mut self.metrics, metric, limits.metrics);
    }

    pub(crate) fn push_cache_op(&mut self, op: CacheOp, limits: &HistoryLimits) {
        self.dropped += push_bounded(&mut self.cache_ops, op, limits.pending_cache_ops);
    }

    pub(crate) fn pending_feedback(&self) -> usize {
        self.feedback.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.interactions.is_empty()
            && self.feedback.is_empty()
            && self.metrics.is_empty()
            && self.cache_ops.is_empty()
    }

    /// Move everything into `history` in arrival order. Returns the number
    /// of events moved.
    pub(crate) fn drain_into(&mut self, history: &mut HistoryLog) -> usize {
        let moved = self.interactions.len()
            + self.feedback.len()
            + self.metrics.len()
            + self.cache_ops.len();
        for interaction in self.interactions.drain(..) {
            history.append_interaction(interaction);
        }
        for record in self.feedback.drain(..) {
            history.append_feedback(record);
        }
        for metric in self.metrics.drain(..) {
            history.append_metric(metric);
        }
        for op in self.cache_ops.drain(..) {
            history.queue_cache_op(op);
        }
        if self.dropped > 0 {
            tracing::warn!(dropped = self.dropped, "inbox overflowed between cycles");
            self.dropped = 0;
        }
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overflow_keeps_newest() {
        let limits = HistoryLimits {
            interactions: 2,
            ..HistoryLimits::default()
        };
        let mut inbox = Inbox::default();
        for kind in ["a", "b", "c"] {
            inbox.push_interaction(Interaction::new(kind), &limits);
        }
        let mut history = HistoryLog::new(HistoryLimits::default());
        assert_eq!(inbox.drain_into(&mut history), 2);
        assert_eq!(history.interactions()[0].interaction_type, "b");
        assert!(inbox.is_empty());
    }
}
