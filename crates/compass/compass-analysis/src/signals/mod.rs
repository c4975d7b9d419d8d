//! Signal analyzers. Each is a pure [`ISignalAnalyzer`]; [`SignalAnalyzers`]
//! runs a set of them in parallel.

mod behavior;
mod feedback;
mod performance;

use rayon::prelude::*;

use compass_core::config::AnalysisConfig;
use compass_core::models::Insight;
use compass_core::traits::{AnalysisInput, ISignalAnalyzer};

pub use behavior::BehaviorAnalyzer;
pub use feedback::FeedbackAnalyzer;
pub use performance::PerformanceAnalyzer;

/// An ordered set of analyzers.
pub struct SignalAnalyzers {
    analyzers: Vec<Box<dyn ISignalAnalyzer>>,
}

impl SignalAnalyzers {
    pub fn new() -> Self {
        Self {
            analyzers: Vec::new(),
        }
    }

    /// Performance, behavior, and feedback analyzers.
    pub fn standard(config: &AnalysisConfig) -> Self {
        Self::new()
            .with(PerformanceAnalyzer::new(config.clone()))
            .with(BehaviorAnalyzer::new(config.clone()))
            .with(FeedbackAnalyzer::new(config.clone()))
    }

    pub fn with(mut self, analyzer: impl ISignalAnalyzer + 'static) -> Self {
        self.analyzers.push(Box::new(analyzer));
        self
    }

    pub fn len(&self) -> usize {
        self.analyzers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.analyzers.is_empty()
    }

    /// Run every analyzer in parallel. Output keeps analyzer order.
    pub fn run(&self, input: &AnalysisInput<'_>) -> Vec<Insight> {
        let per_analyzer: Vec<Vec<Insight>> = self
            .analyzers
            .par_iter()
            .map(|analyzer| {
                let insights = analyzer.analyze(input);
                tracing::debug!(analyzer = analyzer.name(), insights = insights.len(), "analyzer finished");
                insights
            })
            .collect();
        per_analyzer.into_iter().flatten().collect()
    }
}

impl Default for SignalAnalyzers {
    fn default() -> Self {
        Self::standard(&AnalysisConfig::default())
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    (count > 0).then(|| sum / count as f64)
}
