use crate::models::{FeedbackRecord, Insight, Interaction, PerformanceMetric};

/// Borrowed view of the history an analysis cycle works on.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalysisInput<'a> {
    pub interactions: &'a [Interaction],
    pub feedback: &'a [FeedbackRecord],
    pub metrics: &'a [PerformanceMetric],
}

/// A pure analyzer turning raw history into insights.
///
/// Implementations hold no shared mutable state and may run in parallel.
/// Below their minimum sample size they return no insights.
pub trait ISignalAnalyzer: Send + Sync {
    /// Stable analyzer name, used in logs.
    fn name(&self) -> &'static str;

    fn analyze(&self, input: &AnalysisInput<'_>) -> Vec<Insight>;
}
