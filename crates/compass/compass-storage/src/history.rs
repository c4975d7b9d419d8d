//! Bounded event history: interactions, feedback, metrics, and queued cache
//! operations, each capped as a ring buffer (oldest dropped first).

use compass_core::config::StorageConfig;
use compass_core::models::{
    CacheOp, FeedbackRecord, HistoryDocument, Insight, InsightType, Interaction, PerformanceMetric,
};

/// Retention caps per buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryLimits {
    pub interactions: usize,
    pub feedback: usize,
    pub metrics: usize,
    pub pending_cache_ops: usize,
}

impl From<&StorageConfig> for HistoryLimits {
    fn from(config: &StorageConfig) -> Self {
        Self {
            interactions: config.max_interactions,
            feedback: config.max_feedback,
            metrics: config.max_metrics,
            pending_cache_ops: config.max_pending_cache_ops,
        }
    }
}

impl Default for HistoryLimits {
    fn default() -> Self {
        Self::from(&StorageConfig::default())
    }
}

fn cap<T>(buffer: &mut Vec<T>, limit: usize) -> usize {
    let excess = buffer.len().saturating_sub(limit);
    if excess > 0 {
        buffer.drain(..excess);
    }
    excess
}

/// Append-only history over a [`HistoryDocument`]. Assigns sequence numbers
/// on ingestion.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryLog {
    doc: HistoryDocument,
    limits: HistoryLimits,
}

impl HistoryLog {
    pub fn new(limits: HistoryLimits) -> Self {
        Self::from_document(HistoryDocument::default(), limits)
    }

    /// Wrap a loaded document, repairing its cursor and enforcing caps.
    pub fn from_document(mut doc: HistoryDocument, limits: HistoryLimits) -> Self {
        let highest = doc
            .interactions
            .iter()
            .map(|i| i.sequence)
            .chain(doc.feedback.iter().map(|f| f.sequence))
            .max()
            .unwrap_or(0);
        doc.next_sequence = doc.next_sequence.max(highest + 1).max(1);
        doc.metrics_recorded = doc.metrics_recorded.max(doc.metrics.len() as u64);
        let mut log = Self { doc, limits };
        log.prune();
        log
    }

    fn next_sequence(&mut self) -> u64 {
        let seq = self.doc.next_sequence;
        self.doc.next_sequence += 1;
        seq
    }

    pub fn append_interaction(&mut self, mut interaction: Interaction) -> u64 {
        let seq = self.next_sequence();
        interaction.sequence = seq;
        self.doc.interactions.push(interaction);
        cap(&mut self.doc.interactions, self.limits.interactions);
        seq
    }

    pub fn append_feedback(&mut self, mut record: FeedbackRecord) -> u64 {
        let seq = self.next_sequence();
        record.sequence = seq;
        self.doc.feedback.push(record);
        cap(&mut self.doc.feedback, self.limits.feedback);
        seq
    }

    pub fn append_metric(&mut self, metric: PerformanceMetric) {
        self.doc.metrics_recorded += 1;
        self.doc.metrics.push(metric);
        cap(&mut self.doc.metrics, self.limits.metrics);
    }

    /// Queue a cache mutation for the next maintenance pass. Returns the
    /// number of older operations dropped to stay within the cap.
    pub fn queue_cache_op(&mut self, op: CacheOp) -> usize {
        self.doc.pending_cache_ops.push(op);
        cap(&mut self.doc.pending_cache_ops, self.limits.pending_cache_ops)
    }

    pub fn take_pending_cache_ops(&mut self) -> Vec<CacheOp> {
        std::mem::take(&mut self.doc.pending_cache_ops)
    }

    pub fn pending_cache_ops(&self) -> &[CacheOp] {
        &self.doc.pending_cache_ops
    }

    /// Feedback not yet folded into the graph, oldest first.
    pub fn unapplied_feedback(&self) -> &[FeedbackRecord] {
        let cursor = self.doc.applied_feedback_sequence;
        let start = self.doc.feedback.partition_point(|f| f.sequence <= cursor);
        &self.doc.feedback[start..]
    }

    /// Advance the applied-feedback cursor. Never moves backwards.
    pub fn mark_feedback_applied(&mut self, sequence: u64) {
        self.doc.applied_feedback_sequence = self.doc.applied_feedback_sequence.max(sequence);
    }

    /// High-water mark of the evidence stream an insight type is derived
    /// from. Grows only when new events of that stream arrive.
    pub fn evidence_mark(&self, insight_type: InsightType) -> u64 {
        match insight_type {
            InsightType::FeedbackSentiment => self.doc.feedback.last().map_or(0, |f| f.sequence),
            InsightType::UserBehavior => self.doc.interactions.last().map_or(0, |i| i.sequence),
            InsightType::PerformanceTrend => self.doc.metrics_recorded,
        }
    }

    /// Whether `insight` was already acted on at its current evidence mark.
    pub fn is_insight_applied(&self, insight: &Insight) -> bool {
        let mark = self.evidence_mark(insight.insight_type);
        self.doc
            .applied_insights
            .get(&insight.fingerprint())
            .is_some_and(|&applied| applied >= mark)
    }

    /// Record that `insight` was acted on at the current evidence mark.
    pub fn mark_insight_applied(&mut self, insight: &Insight) {
        let mark = self.evidence_mark(insight.insight_type);
        self.doc.applied_insights.insert(insight.fingerprint(), mark);
    }

    pub fn interactions(&self) -> &[Interaction] {
        &self.doc.interactions
    }

    pub fn feedback(&self) -> &[FeedbackRecord] {
        &self.doc.feedback
    }

    pub fn metrics(&self) -> &[PerformanceMetric] {
        &self.doc.metrics
    }

    pub fn patterns(&self) -> &[compass_core::models::UsagePattern] {
        &self.doc.patterns
    }

    pub fn patterns_mut(&mut self) -> &mut Vec<compass_core::models::UsagePattern> {
        &mut self.doc.patterns
    }

    /// Enforce every cap. Returns the number of records dropped.
    pub fn prune(&mut self) -> usize {
        cap(&mut self.doc.interactions, self.limits.interactions)
            + cap(&mut self.doc.feedback, self.limits.feedback)
            + cap(&mut self.doc.metrics, self.limits.metrics)
            + cap(&mut self.doc.pending_cache_ops, self.limits.pending_cache_ops)
    }

    pub fn document(&self) -> &HistoryDocument {
        &self.doc
    }

    pub fn to_document(&self) -> HistoryDocument {
        self.doc.clone()
    }
}
