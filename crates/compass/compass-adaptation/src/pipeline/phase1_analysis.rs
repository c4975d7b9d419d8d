//! Phase 1: mine patterns and run the signal analyzers over the history.

use compass_analysis::{PatternMiner, SignalAnalyzers};
use compass_core::models::{Insight, UsagePattern};
use compass_core::traits::AnalysisInput;
use compass_storage::HistoryLog;

#[derive(Debug, Clone, Default)]
pub struct AnalysisOutput {
    pub scanned: usize,
    pub patterns: Vec<UsagePattern>,
    pub insights: Vec<Insight>,
}

pub fn analyze(
    history: &HistoryLog,
    miner: &PatternMiner,
    analyzers: &SignalAnalyzers,
) -> AnalysisOutput {
    let _span = compass_observability::mining_span!(history.interactions().len()).entered();
    let patterns = miner.mine(history.interactions());
    let insights = analyzers.run(&AnalysisInput {
        interactions: history.interactions(),
        feedback: history.feedback(),
        metrics: history.metrics(),
    });
    AnalysisOutput {
        scanned: miner.window(history.interactions()).len(),
        patterns,
        insights,
    }
}
